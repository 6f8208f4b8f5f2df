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

//! Coordinates, room bounds and the four compass directions the robot can move in.

use serde::{Deserialize, Serialize};

/// A square in the room. `x` grows to the East, `y` grows to the North.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Column, 0 is the West wall.
    pub x: i32,

    /// Row, 0 is the South wall.
    pub y: i32,
}

impl Position {
    /// Create a new position.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighbouring position one unit step in `direction`. Does not check bounds, see
    /// [`is_valid_move`] for that.
    pub fn step(&self, direction: Direction) -> Self {
        match direction {
            Direction::North => Self::new(self.x, self.y + 1),
            Direction::South => Self::new(self.x, self.y - 1),
            Direction::East => Self::new(self.x + 1, self.y),
            Direction::West => Self::new(self.x - 1, self.y),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Room dimensions. Squares live in the half-open space `[0, width) x [0, height)`.
///
/// Only constructed once the dimensions are known to be at least 1, so every room has at least
/// one square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RoomBounds {
    width: i32,
    height: i32,
}

impl RoomBounds {
    /// Returns `None` unless both dimensions are at least 1.
    pub fn new(width: i32, height: i32) -> Option<Self> {
        if width >= 1 && height >= 1 {
            Some(Self { width, height })
        } else {
            None
        }
    }

    /// Width of the room, the exclusive upper bound for `x`.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Height of the room, the exclusive upper bound for `y`.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Whether `position` is a square of the room.
    pub fn contains(&self, position: &Position) -> bool {
        (0..self.width).contains(&position.x) && (0..self.height).contains(&position.y)
    }
}

/// One single-square move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `y + 1`.
    North,

    /// `y - 1`.
    South,

    /// `x + 1`.
    East,

    /// `x - 1`.
    West,
}

impl Direction {
    /// Parse a direction letter, ignoring case.
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Direction::North),
            'S' => Some(Direction::South),
            'E' => Some(Direction::East),
            'W' => Some(Direction::West),
            _ => None,
        }
    }

    /// The uppercase letter for this direction.
    pub fn letter(&self) -> char {
        match self {
            Direction::North => 'N',
            Direction::South => 'S',
            Direction::East => 'E',
            Direction::West => 'W',
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Whether a unit step in `direction` from `position` stays inside `bounds`.
///
/// Each direction only tests the coordinate it changes, so a position that is already outside
/// the room on the other axis can still move.
pub fn is_valid_move(direction: Direction, position: &Position, bounds: &RoomBounds) -> bool {
    // Written as `v < max - 1` rather than `v + 1 < max` so a position on the upper boundary
    // cannot overflow. `max >= 1` always holds.
    match direction {
        Direction::North => position.y < bounds.height - 1,
        Direction::South => position.y > 0,
        Direction::East => position.x < bounds.width - 1,
        Direction::West => position.x > 0,
    }
}
