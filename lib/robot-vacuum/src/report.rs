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

use serde::{Deserialize, Serialize};

use crate::engine::FinishedRun;
use crate::geometry::{Position, RoomBounds};

/// Final position and dirt count of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Report {
    pub position: Position,
    pub dirt_collected: usize,
}

impl Report {
    pub fn new(position: Position, dirt_collected: usize) -> Self {
        Self {
            position,
            dirt_collected,
        }
    }
}

// line 1 is "x y", line 2 is the dirt count.
impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.position)?;
        write!(f, "{}", self.dirt_collected)
    }
}

/// Machine-readable view of a finished run: the report plus everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary<'a> {
    #[serde(flatten)]
    pub report: Report,
    pub bounds: RoomBounds,
    pub original_dirt: &'a [Position],
    pub trace: &'a [Position],
}

impl<'a> From<&'a FinishedRun> for RunSummary<'a> {
    fn from(run: &'a FinishedRun) -> Self {
        Self {
            report: run.report(),
            bounds: run.bounds(),
            original_dirt: run.original_dirt(),
            trace: run.state().trace(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimulationEngine;
    use crate::scenario::parse_scenario;

    #[test]
    fn test_report_is_two_lines() {
        let report = Report::new(Position::new(1, 3), 1);
        assert_eq!(report.to_string(), "1 3\n1");
    }

    #[test]
    fn test_summary_serializes_report_fields_at_top_level() {
        let scenario = parse_scenario("2 2\n0 0\n1 0\nE")
            .into_scenario()
            .expect("valid scenario");
        let run = SimulationEngine::new(scenario).run();
        let json = serde_json::to_value(RunSummary::from(&run)).expect("serialize");

        assert_eq!(json["position"], serde_json::json!({"x": 1, "y": 0}));
        assert_eq!(json["dirt_collected"], 1);
        assert_eq!(json["bounds"], serde_json::json!({"width": 2, "height": 2}));
        assert_eq!(json["original_dirt"], serde_json::json!([{"x": 1, "y": 0}]));
        assert_eq!(
            json["trace"],
            serde_json::json!([{"x": 0, "y": 0}, {"x": 1, "y": 0}])
        );
    }
}
