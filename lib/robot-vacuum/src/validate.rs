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

//! Checks on a [`RawScenario`]. Every check runs, and every failure is collected.

use crate::geometry::{Position, RoomBounds};
use crate::scenario::{Instructions, RawInt, RawPair, RawScenario, Scenario};

/// Which numeric field of the scenario a message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    RoomWidth,
    RoomHeight,
    StartX,
    StartY,
    DirtX,
    DirtY,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Field::RoomWidth => write!(f, "X in (X,Y) Room Dimension"),
            Field::RoomHeight => write!(f, "Y in (X,Y) Room Dimension"),
            Field::StartX => write!(f, "X in (X,Y) Starting Location"),
            Field::StartY => write!(f, "Y in (X,Y) Starting Location"),
            Field::DirtX => write!(f, "X in (X,Y) Dirt Location"),
            Field::DirtY => write!(f, "Y in (X,Y) Dirt Location"),
        }
    }
}

/// A single failed check. The message names the input line it concerns.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Room height is below 1.
    #[error("Y in (X,Y) Room Dimension must be at least 1. (Line 1)")]
    RoomHeightTooSmall,

    /// Room width is below 1.
    #[error("X in (X,Y) Room Dimension must be at least 1. (Line 1)")]
    RoomWidthTooSmall,

    /// Start is negative or beyond the room dimensions.
    #[error("Starting location must exist in Room Dimensions. (Line 2)")]
    StartOutOfBounds,

    /// Instruction line has a character other than N, S, E or W.
    #[error("Directions must only have N, S, W, or E, found `{0}`. (Last Line)")]
    IllegalDirection(char),

    /// The text has no instruction line.
    #[error("Missing directions. (Last Line)")]
    MissingDirections,

    /// A numeric field holds something that is not an integer.
    #[error("{field} must be an integer, found `{token}`. (Line {line})")]
    NotAnInteger {
        field: Field,
        token: String,
        line: usize,
    },

    /// A numeric field is absent.
    #[error("{field} must be an integer, found nothing. (Line {line})")]
    MissingValue { field: Field, line: usize },
}

/// Outcome of validating a scenario.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    errors: Vec<ValidationError>,
}

impl Validation {
    /// True iff no check failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failed checks, in check order.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Record a numeric failure for `raw` and return its value if it has one.
    fn number(&mut self, raw: &RawInt, field: Field, line: usize) -> Option<i32> {
        match raw {
            RawInt::Value(value) => Some(*value),
            RawInt::Invalid(token) => {
                self.push(ValidationError::NotAnInteger {
                    field,
                    token: token.clone(),
                    line,
                });
                None
            }
            RawInt::Missing => {
                self.push(ValidationError::MissingValue { field, line });
                None
            }
        }
    }

    fn pair(&mut self, pair: &RawPair, x_field: Field, y_field: Field) -> Option<Position> {
        let x = self.number(&pair.x, x_field, pair.line);
        let y = self.number(&pair.y, y_field, pair.line);
        Some(Position::new(x?, y?))
    }
}

// newline-joined, one message per failed check.
impl std::fmt::Display for Validation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Validation {}

/// Run every check against `raw` without building a [`Scenario`].
pub fn validate(raw: &RawScenario) -> Validation {
    match check(raw) {
        Ok(_) => Validation::default(),
        Err(validation) => validation,
    }
}

impl RawScenario {
    /// Validate and convert into a [`Scenario`].
    pub fn into_scenario(self) -> Result<Scenario, Validation> {
        check(&self)
    }
}

fn check(raw: &RawScenario) -> Result<Scenario, Validation> {
    let mut validation = Validation::default();

    let height = validation.number(&raw.room.y, Field::RoomHeight, raw.room.line);
    if matches!(height, Some(h) if h < 1) {
        validation.push(ValidationError::RoomHeightTooSmall);
    }
    let width = validation.number(&raw.room.x, Field::RoomWidth, raw.room.line);
    if matches!(width, Some(w) if w < 1) {
        validation.push(ValidationError::RoomWidthTooSmall);
    }

    let start = validation.pair(&raw.start, Field::StartX, Field::StartY);
    if let (Some(start), Some(width), Some(height)) = (start, width, height) {
        // Inclusive upper bound: a start exactly on `width` or `height` is accepted even though
        // no move could ever reach it.
        if start.x < 0 || start.y < 0 || start.x > width || start.y > height {
            validation.push(ValidationError::StartOutOfBounds);
        }
    }

    let dirt: Vec<Option<Position>> = raw
        .dirt
        .iter()
        .map(|pair| validation.pair(pair, Field::DirtX, Field::DirtY))
        .collect();

    let instructions = match raw.instructions.as_deref() {
        None => {
            validation.push(ValidationError::MissingDirections);
            None
        }
        Some(text) => match Instructions::parse(text) {
            Ok(instructions) => Some(instructions),
            Err(c) => {
                validation.push(ValidationError::IllegalDirection(c));
                None
            }
        },
    };

    if !validation.is_valid() {
        return Err(validation);
    }

    let bounds = width.zip(height).and_then(|(w, h)| RoomBounds::new(w, h));
    let dirt: Option<Vec<Position>> = dirt.into_iter().collect();
    match (bounds, start, dirt, instructions) {
        (Some(bounds), Some(start), Some(dirt), Some(instructions)) => {
            Ok(Scenario::new(bounds, start, dirt, instructions))
        }
        _ => unreachable!("every missing field records an error"),
    }
}
