//! CLI entry point for the soldier-crossing solver.
//!
//! Usage:
//!   soldier-crossing solve [layout.json] [options]
//!   soldier-crossing solve --stdin [options]
//!   soldier-crossing best [--file results.json] [--limit 10]
//!
//! `solve` searches for a shortest solution of a board layout (the
//! canonical start layout when no file is given) and prints a JSON
//! report. `best` prints the leaderboard from a results file.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde::Serialize;

use soldier_crossing::{
    solve, Direction, JsonResultManager, ResultManager, SearchOutcome, SearchReport, SoldierState,
    SolverConfig,
};

#[derive(Parser)]
#[command(name = "soldier-crossing")]
#[command(about = "Shortest-path solver for the soldier vs. cannons puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a shortest solution for a board layout
    Solve {
        /// Path to a layout JSON file (canonical start layout when omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read the layout from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Maximum search time in seconds
        #[arg(long)]
        timeout: Option<u64>,

        /// Maximum number of states to expand
        #[arg(long)]
        max_states: Option<usize>,
    },

    /// Print the best finished games from a results file
    Best {
        /// Path to the results JSON file
        #[arg(long, default_value = "results.json")]
        file: PathBuf,

        /// Number of entries to show
        #[arg(long, default_value = "10")]
        limit: usize,
    },
}

/// Output format for a solver run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solvable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<Direction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    move_count: Option<usize>,
    search_exhausted: bool,
    states_expanded: usize,
    states_generated: usize,
    time_elapsed_ms: u64,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            timeout,
            max_states,
        } => {
            let state = if stdin {
                let mut buffer = String::new();
                io::stdin()
                    .read_to_string(&mut buffer)
                    .expect("Failed to read from stdin");
                parse_layout(&buffer)
            } else if let Some(path) = file {
                let content = fs::read_to_string(&path)
                    .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e));
                parse_layout(&content)
            } else {
                SoldierState::new()
            };

            let config = SolverConfig {
                max_states,
                timeout: timeout.map(Duration::from_secs),
            };

            let report = solve(&state, &config);
            let output = format_report(&report);
            println!("{}", serde_json::to_string_pretty(&output).unwrap());

            if output.solvable {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }

        Commands::Best { file, limit } => {
            let manager = JsonResultManager::new(file);
            match manager.best(limit) {
                Ok(best) => {
                    println!("{}", serde_json::to_string_pretty(&best).unwrap());
                }
                Err(e) => {
                    eprintln!("Error reading results: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
}

fn parse_layout(json: &str) -> SoldierState {
    match serde_json::from_str(json) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("Error parsing layout JSON: {}", e);
            std::process::exit(1);
        }
    }
}

fn format_report(report: &SearchReport<Direction>) -> SolveOutput {
    match &report.outcome {
        SearchOutcome::Solved(moves) => SolveOutput {
            solvable: true,
            move_count: Some(moves.len()),
            moves: Some(moves.clone()),
            search_exhausted: false,
            states_expanded: report.states_expanded,
            states_generated: report.states_generated,
            time_elapsed_ms: report.time_elapsed_ms,
        },
        SearchOutcome::Unsolvable => SolveOutput {
            solvable: false,
            moves: None,
            move_count: None,
            search_exhausted: true,
            states_expanded: report.states_expanded,
            states_generated: report.states_generated,
            time_elapsed_ms: report.time_elapsed_ms,
        },
        SearchOutcome::OutOfBudget => SolveOutput {
            solvable: false,
            moves: None,
            move_count: None,
            search_exhausted: false,
            states_expanded: report.states_expanded,
            states_generated: report.states_generated,
            time_elapsed_ms: report.time_elapsed_ms,
        },
    }
}
