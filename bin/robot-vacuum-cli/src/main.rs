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

use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use robot_vacuum::render::GridRenderer;
use robot_vacuum::report::RunSummary;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Run a robot vacuum scenario and print its final position and dirt count.
#[derive(Debug, Parser)]
#[command(name = "robot-vacuum", version)]
struct Args {
    /// Scenario file. Reads stdin when absent or `-`.
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Print the room with the robot's route after the result.
    #[arg(long)]
    render: bool,

    /// Play the route back one move at a time after the result.
    #[arg(long)]
    animate: bool,

    /// Delay between animation frames.
    #[arg(long, default_value_t = 500)]
    frame_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Two lines, `x y` then the dirt count.
    Text,

    /// Result plus room, dirt and route.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliConfig {
    input: Option<PathBuf>,
    format: OutputFormat,
    render: bool,
    frame_delay: Option<Duration>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: None,
            format: OutputFormat::Text,
            render: false,
            frame_delay: None,
        }
    }
}

impl From<Args> for CliConfig {
    fn from(args: Args) -> Self {
        Self {
            input: args.input.filter(|path| path.as_os_str() != "-"),
            format: args.format,
            render: args.render,
            frame_delay: args
                .animate
                .then(|| Duration::from_millis(args.frame_delay_ms)),
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let config = CliConfig::from(Args::parse());

    let result = read_input(&config).and_then(|text| {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        execute(&text, &config, &mut out)
    });

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(err) => {
            error!(error = %err, "robot-vacuum failed");
            eprintln!("error: {:#}", err);
            ExitCode::from(2)
        }
    }
}

// stdout carries the result, logs go to stderr.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn read_input(config: &CliConfig) -> anyhow::Result<String> {
    match &config.input {
        Some(path) => {
            info!(path = %path.display(), "reading scenario");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read scenario from {}", path.display()))
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read scenario from stdin")?;
            Ok(text)
        }
    }
}

/// Run `text` and write the result to `out`. Returns whether the scenario was valid.
fn execute(text: &str, config: &CliConfig, out: &mut impl Write) -> anyhow::Result<bool> {
    let run = match robot_vacuum::run_scenario(text) {
        Ok(run) => run,
        Err(validation) => {
            match config.format {
                OutputFormat::Text => writeln!(out, "{}", validation)?,
                OutputFormat::Json => {
                    let errors: Vec<String> =
                        validation.errors().iter().map(|e| e.to_string()).collect();
                    let json = serde_json::json!({ "valid": false, "errors": errors });
                    writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
                }
            }
            return Ok(false);
        }
    };

    match config.format {
        OutputFormat::Text => writeln!(out, "{}", run.report())?,
        OutputFormat::Json => {
            let summary = RunSummary::from(&run);
            writeln!(out, "{}", serde_json::to_string_pretty(&summary)?)?;
        }
    }

    let renderer = GridRenderer::default();
    let replay = run.replay();
    if config.render {
        match renderer.render(&replay) {
            Ok(grid) => {
                writeln!(out)?;
                writeln!(out, "{}", grid)?;
            }
            Err(err) => warn!(error = %err, "skipping render"),
        }
    }

    // Playback only reads the finished trace, the result above is already final.
    if let Some(delay) = config.frame_delay {
        match renderer.frames(&replay) {
            Ok(frames) => {
                for (index, frame) in frames.enumerate() {
                    if index > 0 {
                        std::thread::sleep(delay);
                    }
                    writeln!(out)?;
                    writeln!(out, "{}", frame)?;
                    out.flush()?;
                }
            }
            Err(err) => warn!(error = %err, "skipping animation"),
        }
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn execute_to_string(text: &str, config: &CliConfig) -> (bool, String) {
        let mut out = Vec::new();
        let valid = execute(text, config, &mut out).expect("execute failed");
        (valid, String::from_utf8(out).expect("utf8 output"))
    }

    #[test]
    fn test_text_output_is_two_lines() {
        let (valid, out) = execute_to_string("5 5\n0 0\n1 0\n0 1\nEN", &CliConfig::default());
        assert!(valid);
        assert_eq!(out, "1 1\n1\n");
    }

    #[test]
    fn test_validation_errors_are_printed() {
        let (valid, out) = execute_to_string("3 3\n5 5\nNQ", &CliConfig::default());
        assert!(!valid);
        assert_eq!(
            out,
            "Starting location must exist in Room Dimensions. (Line 2)\n\
             Directions must only have N, S, W, or E, found `Q`. (Last Line)\n"
        );
    }

    #[test]
    fn test_json_output() {
        let config = CliConfig {
            format: OutputFormat::Json,
            ..CliConfig::default()
        };
        let (valid, out) = execute_to_string("2 1\n0 0\n1 0\nE", &config);
        assert!(valid);
        let json: serde_json::Value = serde_json::from_str(&out).expect("json output");
        assert_eq!(json["position"], serde_json::json!({"x": 1, "y": 0}));
        assert_eq!(json["dirt_collected"], 1);
        assert_eq!(json["trace"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_json_validation_errors() {
        let config = CliConfig {
            format: OutputFormat::Json,
            ..CliConfig::default()
        };
        let (valid, out) = execute_to_string("0 1\n0 0\nN", &config);
        assert!(!valid);
        let json: serde_json::Value = serde_json::from_str(&out).expect("json output");
        assert_eq!(json["valid"], false);
        assert_eq!(
            json["errors"],
            serde_json::json!(["X in (X,Y) Room Dimension must be at least 1. (Line 1)"])
        );
    }

    #[test]
    fn test_render_and_animate() {
        let config = CliConfig {
            render: true,
            frame_delay: Some(Duration::ZERO),
            ..CliConfig::default()
        };
        let (valid, out) = execute_to_string("2 1\n0 0\nE", &config);
        assert!(valid);
        assert_eq!(out, "1 0\n0\n\nSE\n\nS.\n\nSE\n");
    }

    #[test]
    fn test_huge_room_still_reports_but_skips_drawing() {
        let config = CliConfig {
            render: true,
            frame_delay: Some(Duration::ZERO),
            ..CliConfig::default()
        };
        let (valid, out) = execute_to_string("2147483647 2147483647\n0 0\nN", &config);
        assert!(valid);
        assert_eq!(out, "0 1\n0\n");
    }

    #[test]
    fn test_args_map_onto_config() {
        let args = Args::parse_from([
            "robot-vacuum",
            "-",
            "--format",
            "json",
            "--animate",
            "--frame-delay-ms",
            "10",
        ]);
        let config = CliConfig::from(args);
        assert_eq!(config.input, None);
        assert_eq!(config.format, OutputFormat::Json);
        assert!(!config.render);
        assert_eq!(config.frame_delay, Some(Duration::from_millis(10)));
    }
}
