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

//! Grid-bound robot vacuum.
//!
//! A robot starts somewhere in a rectangular room, follows a string of N/S/E/W moves, and
//! counts the dirt patches it passes over. Moves that would leave the room are skipped.
//!
//! The pipeline is parse, validate, run, report:
//!
//! ```
//! let run = robot_vacuum::run_scenario("5 5\n0 0\n1 0\n0 1\nEN").unwrap();
//! assert_eq!(run.report().to_string(), "1 1\n1");
//! ```

use tracing::warn;

pub mod engine;
pub mod geometry;
pub mod render;
pub mod report;
pub mod scenario;
pub mod validate;

use crate::engine::{FinishedRun, SimulationEngine};
use crate::validate::Validation;

pub type HashSet<T> = rustc_hash::FxHashSet<T>;

/// Decides the next Action in a Performance, Environment, Action, Sensing (PEAS) cycle.
/// Returns `None` once it has nothing left to do, which ends the [`Simulation`].
///
/// A scripted agent such as [`engine::ScriptedAgent`] ignores the Percept and replays its moves;
/// a reactive agent would steer by it.
pub trait Agent {
    type Action;
    type Percept;

    fn act(&mut self, percept: &Self::Percept) -> Option<Self::Action>;
}

/// The world side of the PEAS cycle: it reports a Percept, applies Actions and keeps score.
///
/// The room simulation in [`engine::SimulationEngine`] is one; it only ever sees directions,
/// never who chose them.
pub trait Environment {
    type Action;
    type Percept;
    type Score: num_traits::Unsigned + Copy;

    fn percept(&self) -> Self::Percept;
    fn execute_action(&mut self, action: &Self::Action);

    /// Returns the score of the Environment at the current state.
    fn score(&self) -> Self::Score;
}

/// A Simulation runs a single Agent against an Environment until the Agent stops acting.
///
/// The Simulation is aware of both the Environment and the single Agent. The Agent's generic
/// Action and Percept come from the Environment.
pub struct Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    environment: _Environment,
    agent: _Agent,
}

impl<_Environment, _Agent> Simulation<_Environment, _Agent>
where
    _Environment: Environment,
    _Agent: Agent<Action = _Environment::Action, Percept = _Environment::Percept>,
{
    pub fn new(environment: _Environment, agent: _Agent) -> Self {
        Self { environment, agent }
    }

    /// Run to completion. Returns the number of actions executed.
    pub fn run(&mut self) -> usize {
        let mut steps = 0;
        loop {
            let percept = self.environment.percept();
            match self.agent.act(&percept) {
                Some(action) => self.environment.execute_action(&action),
                None => return steps,
            }
            steps += 1;
        }
    }

    pub fn score(&self) -> <_Environment as Environment>::Score {
        self.environment.score()
    }

    pub fn environment(&self) -> &_Environment {
        &self.environment
    }

    pub fn into_environment(self) -> _Environment {
        self.environment
    }
}

/// Parse, validate and run a scenario. The simulation only runs when validation passes.
pub fn run_scenario(text: &str) -> Result<FinishedRun, Validation> {
    let scenario = scenario::parse_scenario(text)
        .into_scenario()
        .map_err(|validation| {
            warn!(errors = validation.errors().len(), "scenario rejected");
            validation
        })?;
    Ok(SimulationEngine::new(scenario).run())
}
