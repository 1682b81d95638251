use std::{fs, path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use colored::Colorize;
use sudoku_csp::{parse_puzzle, solve, Outcome, SolveOptions};

/// Backtracking CSP solver for N×N Sudoku puzzles.
#[derive(Parser, Debug)]
#[command(name = "sudoku-csp", version, about = "Solve N×N Sudoku puzzles by backtracking search")]
struct Cli {
    /// Puzzle file: first line N, second line the clue count, then one
    /// `row col value` clue per line (1-indexed).
    path: PathBuf,

    /// Prune peer domains after every assignment (forward checking).
    #[arg(short = 'f', long)]
    forward_checking: bool,

    /// Pick the unassigned cell with the fewest remaining candidates.
    #[arg(long)]
    mrv: bool,

    /// Pick the unassigned cell with the most unassigned peers.
    #[arg(long)]
    degree: bool,

    /// Try the least constraining candidate value first.
    #[arg(long)]
    lcv: bool,

    /// Give up after this many seconds of wall-clock time.
    #[arg(long, value_name = "SECONDS")]
    time_limit: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let text = match fs::read_to_string(&cli.path) {
        Ok(text) => text,
        Err(err) => {
            println!(
                "{}",
                format!("Unable to read {}: {err}", cli.path.display()).red()
            );
            return ExitCode::FAILURE;
        }
    };
    let board = match parse_puzzle(&text) {
        Ok(board) => board,
        Err(err) => {
            println!("{}", format!("{err}").red());
            return ExitCode::FAILURE;
        }
    };

    println!("Input:\n{board}");
    let options = SolveOptions {
        forward_checking: cli.forward_checking,
        mrv: cli.mrv,
        degree: cli.degree,
        lcv: cli.lcv,
        time_budget: cli.time_limit.map(Duration::from_secs),
    };
    let report = solve(&board, &options);
    match report.outcome {
        Outcome::Solved => {
            println!(
                "Found a solution in {} consistency checks.\n{}",
                report.consistency_checks, report.board
            );
            ExitCode::SUCCESS
        }
        Outcome::Exhausted => {
            println!(
                "{}",
                format!(
                    "No solution exists ({} consistency checks).",
                    report.consistency_checks
                )
                .red()
            );
            ExitCode::FAILURE
        }
        Outcome::TimedOut => {
            println!(
                "{}",
                format!(
                    "No solution found in time ({} consistency checks).",
                    report.consistency_checks
                )
                .red()
            );
            ExitCode::FAILURE
        }
    }
}
