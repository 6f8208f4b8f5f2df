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

use tracing::{debug, info};

use crate::geometry::{self, Direction, Position, RoomBounds};
use crate::render::Replay;
use crate::report::Report;
use crate::scenario::{Instructions, Scenario};
use crate::{Agent, Environment, HashSet, Simulation};

/// What the robot's dirt sensor reports for the square it is on.
///
/// [`ScriptedAgent`] never looks at it; it is here for agents that steer by what they sense.
/// Dirt is vacuumed on arrival, so `on_dirt` reads false between steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VacuumPercept {
    pub location: Position,
    pub on_dirt: bool,
}

/// Replays a fixed instruction sequence, one direction per call to `act`, regardless of what it
/// perceives.
#[derive(Debug, Clone)]
pub struct ScriptedAgent {
    instructions: std::vec::IntoIter<Direction>,
}

impl ScriptedAgent {
    pub fn new(instructions: Instructions) -> Self {
        Self {
            instructions: instructions.into_iter(),
        }
    }
}

impl Agent for ScriptedAgent {
    type Action = Direction;
    type Percept = VacuumPercept;

    fn act(&mut self, _percept: &Self::Percept) -> Option<Self::Action> {
        self.instructions.next()
    }
}

/// Mutable state of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    current_position: Position,
    dirt_collected: usize,
    remaining_dirt: HashSet<Position>,
    trace: Vec<Position>,
}

impl SimulationState {
    pub fn current_position(&self) -> Position {
        self.current_position
    }

    pub fn dirt_collected(&self) -> usize {
        self.dirt_collected
    }

    pub fn remaining_dirt(&self) -> &HashSet<Position> {
        &self.remaining_dirt
    }

    /// Every position occupied so far, starting with the start position. A skipped move adds
    /// nothing.
    pub fn trace(&self) -> &[Position] {
        &self.trace
    }

    /// Collect the dirt under the robot, if any. Returns whether something was collected.
    fn vacuum(&mut self) -> bool {
        if self.remaining_dirt.remove(&self.current_position) {
            self.dirt_collected += 1;
            true
        } else {
            false
        }
    }
}

/// Result of a single [`SimulationEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The robot moved, and maybe picked up dirt at its new position.
    Moved { to: Position, collected: bool },

    /// The move would have left the room, nothing changed.
    Blocked,
}

/// Drives one robot through one [`Scenario`].
///
/// Construction is the initialization step: the robot is placed on the start square and any dirt
/// already there is collected before the first instruction.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    bounds: RoomBounds,
    original_dirt: Vec<Position>,
    instructions: Instructions,
    state: SimulationState,
}

impl SimulationEngine {
    pub fn new(scenario: Scenario) -> Self {
        let bounds = scenario.bounds();
        let start = scenario.start();
        let original_dirt = scenario.dirt().to_vec();
        let instructions = scenario.instructions().clone();

        let mut state = SimulationState {
            current_position: start,
            dirt_collected: 0,
            remaining_dirt: original_dirt.iter().copied().collect(),
            trace: vec![start],
        };
        if state.vacuum() {
            debug!(x = start.x, y = start.y, "collected dirt on start square");
        }

        Self {
            bounds,
            original_dirt,
            instructions,
            state,
        }
    }

    pub fn bounds(&self) -> RoomBounds {
        self.bounds
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Whether `direction` keeps the robot inside the room from where it stands now.
    pub fn is_valid_move(&self, direction: Direction) -> bool {
        geometry::is_valid_move(direction, &self.state.current_position, &self.bounds)
    }

    /// Apply one instruction. A move that would leave the room is skipped.
    pub fn step(&mut self, direction: Direction) -> StepOutcome {
        if !self.is_valid_move(direction) {
            debug!(%direction, position = %self.state.current_position, "blocked");
            return StepOutcome::Blocked;
        }

        let to = self.state.current_position.step(direction);
        self.state.current_position = to;
        let collected = self.state.vacuum();
        self.state.trace.push(to);
        debug!(%direction, position = %to, collected, "moved");

        StepOutcome::Moved { to, collected }
    }

    /// Run every instruction of the scenario in order and freeze the result.
    pub fn run(mut self) -> FinishedRun {
        let agent = ScriptedAgent::new(std::mem::take(&mut self.instructions));
        let mut simulation = Simulation::new(self, agent);
        let steps = simulation.run();
        let engine = simulation.into_environment();

        info!(
            steps,
            moves = engine.state.trace.len() - 1,
            position = %engine.state.current_position,
            dirt_collected = engine.state.dirt_collected,
            "run finished"
        );

        FinishedRun {
            bounds: engine.bounds,
            original_dirt: engine.original_dirt,
            state: engine.state,
        }
    }
}

impl Environment for SimulationEngine {
    type Action = Direction;
    type Percept = VacuumPercept;
    type Score = usize;

    fn percept(&self) -> Self::Percept {
        VacuumPercept {
            location: self.state.current_position,
            on_dirt: self
                .state
                .remaining_dirt
                .contains(&self.state.current_position),
        }
    }

    fn execute_action(&mut self, action: &Self::Action) {
        self.step(*action);
    }

    fn score(&self) -> Self::Score {
        self.state.dirt_collected
    }
}

/// A completed run. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedRun {
    bounds: RoomBounds,
    original_dirt: Vec<Position>,
    state: SimulationState,
}

impl FinishedRun {
    pub fn bounds(&self) -> RoomBounds {
        self.bounds
    }

    /// Dirt as it was before the run started.
    pub fn original_dirt(&self) -> &[Position] {
        &self.original_dirt
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn report(&self) -> Report {
        Report::new(self.state.current_position, self.state.dirt_collected)
    }

    /// What a visualization needs to draw the run.
    pub fn replay(&self) -> Replay<'_> {
        Replay::new(self.bounds, &self.original_dirt, &self.state.trace)
    }
}
