/*
 * Copyright (C) 2023 Asim Ihsan
 * SPDX-License-Identifier: AGPL-3.0-only
 *
 * This program is free software: you can redistribute it and/or modify it under
 * the terms of the GNU Affero General Public License as published by the Free
 * Software Foundation, version 3.
 *
 * This program is distributed in the hope that it will be useful, but WITHOUT ANY
 * WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A
 * PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License along
 * with this program. If not, see <https://www.gnu.org/licenses/>
 */

//! Scenario text format.
//!
//! ```text
//! <width> <height>
//! <start_x> <start_y>
//! <dirt_x> <dirt_y>        (zero or more lines)
//! <INSTRUCTIONS>           (letters from N/S/E/W, any case)
//! ```
//!
//! Parsing never fails. Every numeric field is kept as a [`RawInt`] so that bad tokens can be
//! reported together by [`crate::validate`].

use crate::geometry::{Direction, Position, RoomBounds};
use crate::HashSet;

/// A numeric field as it appeared in the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawInt {
    /// The token parsed as an integer.
    Value(i32),

    /// The token was present but is not an `i32`.
    Invalid(String),

    /// The line ran out of tokens.
    Missing,
}

impl RawInt {
    fn parse(token: Option<&str>) -> Self {
        match token {
            None => RawInt::Missing,
            Some(token) => match token.parse::<i32>() {
                Ok(value) => RawInt::Value(value),
                Err(_) => RawInt::Invalid(token.to_string()),
            },
        }
    }

    /// The parsed value, if there is one.
    pub fn value(&self) -> Option<i32> {
        match self {
            RawInt::Value(value) => Some(*value),
            RawInt::Invalid(_) | RawInt::Missing => None,
        }
    }
}

/// A line holding two whitespace-separated integers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RawPair {
    /// First token.
    pub x: RawInt,

    /// Second token.
    pub y: RawInt,

    /// 1-based line number in the scenario text.
    pub line: usize,
}

impl RawPair {
    fn parse(text: Option<&str>, line: usize) -> Self {
        let mut tokens = text.unwrap_or_default().split_whitespace();
        let x = RawInt::parse(tokens.next());
        let y = RawInt::parse(tokens.next());
        Self { x, y, line }
    }
}

/// Unvalidated scenario, straight out of [`parse_scenario`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawScenario {
    /// Line 1, width then height.
    pub room: RawPair,

    /// Line 2.
    pub start: RawPair,

    /// Every line between the start line and the last line.
    pub dirt: Vec<RawPair>,

    /// The last line, `None` when the text has fewer than three lines.
    pub instructions: Option<String>,
}

/// Split scenario text into its raw fields.
///
/// Each line is trimmed so `\r\n` endings parse the same as `\n`. Trailing blank lines are
/// dropped, except that a room and start line followed only by blank lines keep one empty
/// instruction line.
pub fn parse_scenario(text: &str) -> RawScenario {
    let mut lines: Vec<&str> = text.split('\n').map(str::trim).collect();
    let mut trailing_blank = false;
    while lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
        trailing_blank = true;
    }
    if trailing_blank && lines.len() < 3 {
        lines.push("");
    }

    let room = RawPair::parse(lines.first().copied(), 1);
    let start = RawPair::parse(lines.get(1).copied(), 2);

    let (dirt, instructions) = if lines.len() >= 3 {
        let last = lines.len() - 1;
        let dirt = lines[2..last]
            .iter()
            .enumerate()
            .map(|(index, line)| RawPair::parse(Some(*line), index + 3))
            .collect();
        (dirt, Some(lines[last].to_string()))
    } else {
        (Vec::new(), None)
    };

    RawScenario {
        room,
        start,
        dirt,
        instructions,
    }
}

/// An ordered, immutable list of moves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Instructions(Vec<Direction>);

impl Instructions {
    /// Parse direction letters, ignoring case. Returns the first offending character on failure.
    pub fn parse(text: &str) -> Result<Self, char> {
        text.chars()
            .map(|c| Direction::from_letter(c).ok_or(c))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Iterate the moves in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Direction> {
        self.0.iter()
    }

    /// Number of moves.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no moves.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Direction>> for Instructions {
    fn from(directions: Vec<Direction>) -> Self {
        Self(directions)
    }
}

impl IntoIterator for Instructions {
    type Item = Direction;
    type IntoIter = std::vec::IntoIter<Direction>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Instructions {
    type Item = &'a Direction;
    type IntoIter = std::slice::Iter<'a, Direction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for Instructions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.iter().try_for_each(|d| write!(f, "{}", d))
    }
}

/// A validated scenario, ready to hand to [`crate::engine::SimulationEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    bounds: RoomBounds,
    start: Position,
    dirt: Vec<Position>,
    instructions: Instructions,
}

impl Scenario {
    /// Build a scenario directly. Duplicate dirt positions are dropped, keeping the first.
    pub fn new(
        bounds: RoomBounds,
        start: Position,
        dirt: impl IntoIterator<Item = Position>,
        instructions: Instructions,
    ) -> Self {
        let mut seen = HashSet::default();
        let dirt = dirt.into_iter().filter(|p| seen.insert(*p)).collect();
        Self {
            bounds,
            start,
            dirt,
            instructions,
        }
    }

    pub fn bounds(&self) -> RoomBounds {
        self.bounds
    }

    pub fn start(&self) -> Position {
        self.start
    }

    /// Dirt positions in the order they were listed.
    pub fn dirt(&self) -> &[Position] {
        &self.dirt
    }

    pub fn instructions(&self) -> &Instructions {
        &self.instructions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_scenario() {
        let raw = parse_scenario("5 5\n1 2\n1 0\n2 2\n2 3\nNNESEESWNWW\n");
        assert_eq!(raw.room.x, RawInt::Value(5));
        assert_eq!(raw.room.y, RawInt::Value(5));
        assert_eq!(raw.start.x, RawInt::Value(1));
        assert_eq!(raw.start.y, RawInt::Value(2));
        assert_eq!(raw.dirt.len(), 3);
        assert_eq!(raw.dirt[0].x, RawInt::Value(1));
        assert_eq!(raw.dirt[0].line, 3);
        assert_eq!(raw.dirt[2].line, 5);
        assert_eq!(raw.instructions.as_deref(), Some("NNESEESWNWW"));
    }

    #[test]
    fn test_parse_without_dirt() {
        let raw = parse_scenario("1 1\n0 0\nN");
        assert!(raw.dirt.is_empty());
        assert_eq!(raw.instructions.as_deref(), Some("N"));
    }

    #[test]
    fn test_parse_keeps_bad_tokens_for_validation() {
        let raw = parse_scenario("five 5\n0\nx 1\nN");
        assert_eq!(raw.room.x, RawInt::Invalid("five".to_string()));
        assert_eq!(raw.room.y, RawInt::Value(5));
        assert_eq!(raw.start.x, RawInt::Value(0));
        assert_eq!(raw.start.y, RawInt::Missing);
        assert_eq!(raw.dirt[0].x, RawInt::Invalid("x".to_string()));
    }

    #[test]
    fn test_parse_short_text_has_no_instructions() {
        let raw = parse_scenario("5 5\n0 0");
        assert_eq!(raw.instructions, None);
        assert!(raw.dirt.is_empty());

        let raw = parse_scenario("");
        assert_eq!(raw.room.x, RawInt::Missing);
        assert_eq!(raw.start.x, RawInt::Missing);
        assert_eq!(raw.instructions, None);
    }

    #[test]
    fn test_parse_crlf_and_empty_instruction_line() {
        let raw = parse_scenario("5 5\r\n0 0\r\n\r\n");
        assert_eq!(raw.room.y, RawInt::Value(5));
        assert_eq!(raw.start.y, RawInt::Value(0));
        assert!(raw.dirt.is_empty());
        assert_eq!(raw.instructions.as_deref(), Some(""));
    }

    #[test]
    fn test_parse_ignores_extra_trailing_blank_lines() {
        let raw = parse_scenario("5 5\n0 0\n1 0\nE\n\n");
        assert_eq!(raw.dirt.len(), 1);
        assert_eq!(raw.dirt[0].line, 3);
        assert_eq!(raw.instructions.as_deref(), Some("E"));

        let raw = parse_scenario("5 5\r\n0 0\r\nNE\r\n \r\n\r\n");
        assert!(raw.dirt.is_empty());
        assert_eq!(raw.instructions.as_deref(), Some("NE"));
    }

    #[test]
    fn test_parse_blank_lines_after_start_mean_no_moves() {
        for text in ["5 5\n0 0\n", "5 5\n0 0\n\n\n"] {
            let raw = parse_scenario(text);
            assert!(raw.dirt.is_empty(), "text: {:?}", text);
            assert_eq!(raw.instructions.as_deref(), Some(""), "text: {:?}", text);
        }
    }

    #[test]
    fn test_instructions_parse_reports_first_bad_char() {
        assert_eq!(
            Instructions::parse("nEsw").map(|i| i.to_string()),
            Ok("NESW".to_string())
        );
        assert_eq!(Instructions::parse("NE1X"), Err('1'));
        assert_eq!(Instructions::parse(""), Ok(Instructions::default()));
    }

    #[test]
    fn test_scenario_drops_duplicate_dirt() {
        let scenario = Scenario::new(
            RoomBounds::new(3, 3).unwrap(),
            Position::new(0, 0),
            vec![
                Position::new(1, 1),
                Position::new(2, 2),
                Position::new(1, 1),
            ],
            Instructions::default(),
        );
        assert_eq!(
            scenario.dirt(),
            &[Position::new(1, 1), Position::new(2, 2)]
        );
    }

    #[test]
    fn test_scenario_dedup_keeps_first_seen_order_for_many_lines() {
        let dirt = (0..2000).map(|i| Position::new(i % 50, (i / 50) % 3));
        let scenario = Scenario::new(
            RoomBounds::new(50, 3).unwrap(),
            Position::new(0, 0),
            dirt,
            Instructions::default(),
        );
        assert_eq!(scenario.dirt().len(), 150);
        assert_eq!(scenario.dirt()[0], Position::new(0, 0));
        assert_eq!(scenario.dirt()[50], Position::new(0, 1));
        assert_eq!(scenario.dirt()[149], Position::new(49, 2));
    }
}
