mod board;
mod constraints;
mod domains;
mod heuristics;
mod parse;
mod solver;

pub use board::{Board, Pos};
pub use constraints::{forward_check, is_consistent, peers_of, ForwardCheck};
pub use domains::Domains;
pub use parse::{parse_puzzle, PuzzleError};
pub use solver::{solve, Outcome, SolveOptions, SolveReport};
