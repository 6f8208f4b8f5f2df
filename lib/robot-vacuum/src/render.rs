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

//! Text rendering of a finished run.
//!
//! Renders the room with the North wall on top. The start square is marked `S`, the final
//! square `E`, and squares visited in between get heavier glyphs the later they were visited.

use crate::geometry::{Position, RoomBounds};

/// Read-only view of a finished run, everything a visualization needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replay<'a> {
    bounds: RoomBounds,
    original_dirt: &'a [Position],
    trace: &'a [Position],
}

impl<'a> Replay<'a> {
    pub fn new(bounds: RoomBounds, original_dirt: &'a [Position], trace: &'a [Position]) -> Self {
        Self {
            bounds,
            original_dirt,
            trace,
        }
    }

    pub fn bounds(&self) -> RoomBounds {
        self.bounds
    }

    pub fn original_dirt(&self) -> &'a [Position] {
        self.original_dirt
    }

    pub fn trace(&self) -> &'a [Position] {
        self.trace
    }
}

/// Glyphs and limits used by [`GridRenderer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    pub empty: char,
    pub dirt: char,
    pub start: char,
    pub end: char,

    /// Intermediate visits, lightest first.
    pub ramp: Vec<char>,

    /// Largest room, in squares, that gets drawn. Bigger rooms are refused with
    /// [`RenderError::RoomTooLarge`] before anything is allocated.
    pub max_cells: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            empty: '.',
            dirt: 'd',
            start: 'S',
            end: 'E',
            ramp: vec![':', '-', '=', '+', '#', '%'],
            max_cells: 1 << 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// Room area is above [`RenderConfig::max_cells`].
    #[error("room is {width}x{height}, more than the {max_cells} squares the renderer draws")]
    RoomTooLarge {
        width: i32,
        height: i32,
        max_cells: usize,
    },
}

/// Draws a [`Replay`] as text, one character per square.
///
/// Only one frame is held in memory at a time, so the cost of [`GridRenderer::frames`] is
/// bounded by `max_cells` per frame however long the trace is.
#[derive(Debug, Clone, Default)]
pub struct GridRenderer {
    config: RenderConfig,
}

impl GridRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The whole run.
    pub fn render(&self, replay: &Replay<'_>) -> Result<String, RenderError> {
        self.check_size(replay.bounds)?;
        Ok(self.render_prefix(replay, replay.trace.len()))
    }

    /// Frame `index` shows the robot after its `index`-th move. `None` past the end of the
    /// trace.
    pub fn frame(&self, replay: &Replay<'_>, index: usize) -> Result<Option<String>, RenderError> {
        self.check_size(replay.bounds)?;
        Ok((index < replay.trace.len()).then(|| self.render_prefix(replay, index + 1)))
    }

    /// Every frame in order, rendered as the iterator is advanced.
    pub fn frames<'a>(
        &'a self,
        replay: &Replay<'a>,
    ) -> Result<impl Iterator<Item = String> + 'a, RenderError> {
        self.check_size(replay.bounds)?;
        let replay = *replay;
        Ok((1..=replay.trace.len()).map(move |visited| self.render_prefix(&replay, visited)))
    }

    fn check_size(&self, bounds: RoomBounds) -> Result<(), RenderError> {
        let cells = (bounds.width() as usize).checked_mul(bounds.height() as usize);
        match cells {
            Some(cells) if cells <= self.config.max_cells => Ok(()),
            _ => Err(RenderError::RoomTooLarge {
                width: bounds.width(),
                height: bounds.height(),
                max_cells: self.config.max_cells,
            }),
        }
    }

    /// The run up to and including `trace[visited - 1]`. Callers check the room size first.
    fn render_prefix(&self, replay: &Replay<'_>, visited: usize) -> String {
        let bounds = replay.bounds;
        let width = bounds.width() as usize;
        let height = bounds.height() as usize;
        let mut grid = vec![vec![self.config.empty; width]; height];

        let mut paint = |position: &Position, glyph: char| {
            if bounds.contains(position) {
                let row = height - 1 - position.y as usize;
                grid[row][position.x as usize] = glyph;
            }
        };

        for dirt in replay.original_dirt {
            paint(dirt, self.config.dirt);
        }

        let shown = &replay.trace[..visited.min(replay.trace.len())];
        if shown.len() > 2 {
            for (index, position) in shown.iter().enumerate().take(shown.len() - 1).skip(1) {
                paint(position, self.emphasis(index, replay.trace.len()));
            }
        }
        if let Some(start) = shown.first() {
            paint(start, self.config.start);
        }
        if shown.len() > 1 {
            if let Some(end) = shown.last() {
                paint(end, self.config.end);
            }
        }

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // emphasis is relative to the whole trace so a square keeps its glyph across frames.
    fn emphasis(&self, index: usize, trace_len: usize) -> char {
        let ramp = &self.config.ramp;
        if ramp.is_empty() {
            return self.config.empty;
        }
        let level = (index * ramp.len() / trace_len.max(1)).min(ramp.len() - 1);
        ramp[level]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(points: &[(i32, i32)]) -> Vec<Position> {
        points.iter().copied().map(Position::from).collect()
    }

    #[test]
    fn test_render_marks_start_end_and_dirt() {
        let bounds = RoomBounds::new(3, 2).unwrap();
        let dirt = positions(&[(2, 1)]);
        let trace = positions(&[(0, 0), (1, 0)]);
        let replay = Replay::new(bounds, &dirt, &trace);

        assert_eq!(GridRenderer::default().render(&replay).unwrap(), "..d\nSE.");
    }

    #[test]
    fn test_intermediate_visits_get_heavier() {
        let bounds = RoomBounds::new(6, 1).unwrap();
        let trace = positions(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0), (5, 0)]);
        let replay = Replay::new(bounds, &[], &trace);

        assert_eq!(GridRenderer::default().render(&replay).unwrap(), "S-=+#E");
    }

    #[test]
    fn test_frames_step_through_trace() {
        let bounds = RoomBounds::new(3, 1).unwrap();
        let trace = positions(&[(0, 0), (1, 0), (2, 0)]);
        let replay = Replay::new(bounds, &[], &trace);

        let renderer = GridRenderer::default();
        let frames: Vec<String> = renderer.frames(&replay).unwrap().collect();
        assert_eq!(frames, vec!["S..", "SE.", "S=E"]);
        assert_eq!(renderer.frame(&replay, 1).unwrap().as_deref(), Some("SE."));
        assert_eq!(renderer.frame(&replay, 3).unwrap(), None);
    }

    #[test]
    fn test_start_is_drawn_on_top_of_revisits() {
        let bounds = RoomBounds::new(2, 1).unwrap();
        let trace = positions(&[(0, 0), (1, 0), (0, 0), (1, 0)]);
        let replay = Replay::new(bounds, &[], &trace);

        assert_eq!(GridRenderer::default().render(&replay).unwrap(), "SE");
    }

    #[test]
    fn test_positions_outside_room_are_not_drawn() {
        let bounds = RoomBounds::new(2, 2).unwrap();
        let trace = positions(&[(2, 2), (2, 1), (1, 1)]);
        let replay = Replay::new(bounds, &[], &trace);

        assert_eq!(GridRenderer::default().render(&replay).unwrap(), ".E\n..");
    }

    #[test]
    fn test_custom_glyphs() {
        let config = RenderConfig {
            empty: ' ',
            dirt: '*',
            start: '<',
            end: '>',
            ramp: vec!['o'],
            ..RenderConfig::default()
        };
        let bounds = RoomBounds::new(3, 1).unwrap();
        let dirt = positions(&[(2, 0)]);
        let trace = positions(&[(0, 0), (1, 0)]);
        let replay = Replay::new(bounds, &dirt, &trace);

        assert_eq!(GridRenderer::new(config).render(&replay).unwrap(), "<>*");
    }

    #[test]
    fn test_huge_room_is_refused_without_allocating() {
        let bounds = RoomBounds::new(i32::MAX, i32::MAX).unwrap();
        let trace = positions(&[(0, 0), (0, 1)]);
        let replay = Replay::new(bounds, &[], &trace);
        let renderer = GridRenderer::default();

        let expected = RenderError::RoomTooLarge {
            width: i32::MAX,
            height: i32::MAX,
            max_cells: 1 << 20,
        };
        assert_eq!(renderer.render(&replay), Err(expected.clone()));
        assert_eq!(renderer.frame(&replay, 0), Err(expected.clone()));
        assert_eq!(renderer.frames(&replay).err(), Some(expected));
    }

    #[test]
    fn test_max_cells_is_inclusive() {
        let renderer = GridRenderer::new(RenderConfig {
            max_cells: 6,
            ..RenderConfig::default()
        });
        let trace = positions(&[(0, 0)]);

        let fits = Replay::new(RoomBounds::new(3, 2).unwrap(), &[], &trace);
        assert_eq!(renderer.render(&fits).unwrap(), "...\nS..");

        let too_big = Replay::new(RoomBounds::new(7, 1).unwrap(), &[], &trace);
        assert!(matches!(
            renderer.render(&too_big),
            Err(RenderError::RoomTooLarge { width: 7, height: 1, max_cells: 6 })
        ));
    }
}
