use std::time::{Duration, Instant};

use log::debug;

use crate::board::{Board, Pos};
use crate::constraints::{forward_check, is_consistent, ForwardCheck};
use crate::domains::Domains;
use crate::heuristics;

/// Propagation and ordering switches for one solve call. The four
/// heuristic flags combine independently; all sixteen combinations are
/// supported.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolveOptions {
    /// Prune peer domains after every assignment and reject candidates
    /// that wipe a domain out.
    pub forward_checking: bool,
    /// Pick the unassigned cell with the fewest remaining candidates.
    pub mrv: bool,
    /// Pick the unassigned cell with the most unassigned peers; breaks
    /// MRV ties when both are set.
    pub degree: bool,
    /// Try candidate values causing the fewest trial removals first.
    pub lcv: bool,
    /// Wall-clock budget for the whole search. `None` means unbounded.
    pub time_budget: Option<Duration>,
}

/// How a solve call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Solved,
    /// Every assignment was tried and none worked: the puzzle is
    /// unsatisfiable. A valid result, not an error.
    Exhausted,
    /// The time budget ran out first. Says nothing about satisfiability
    /// and is never conflated with `Exhausted`.
    TimedOut,
}

/// The final grid (the solution, or the untouched input when the search
/// failed) plus the diagnostic consistency-check count used to compare
/// heuristic configurations.
#[derive(Debug, Clone)]
pub struct SolveReport {
    pub board: Board,
    pub outcome: Outcome,
    pub consistency_checks: usize,
}

impl SolveReport {
    pub fn solved(&self) -> bool {
        self.outcome == Outcome::Solved
    }
}

/// Solves `initial` by backtracking search under the given options. The
/// input board is never mutated; the solution (if any) is a fresh board.
pub fn solve(initial: &Board, options: &SolveOptions) -> SolveReport {
    let mut search = Search {
        options,
        deadline: options.time_budget.map(|budget| Instant::now() + budget),
        consistency_checks: 0,
    };

    let mut domains = Domains::seed(initial);
    if options.forward_checking {
        // Seed the domains with the given clues. A wipeout here means the
        // clues already contradict each other and no assignment can fix
        // that, so the search is over before it starts.
        for (row, col) in initial.assigned_positions() {
            match forward_check(&domains, initial.get(row, col), (row, col)) {
                ForwardCheck::Pruned {
                    domains: pruned, ..
                } => domains = pruned,
                ForwardCheck::Wipeout { .. } => {
                    debug!("clue at ({row}, {col}) wiped out a peer domain while seeding");
                    return SolveReport {
                        board: initial.clone(),
                        outcome: Outcome::Exhausted,
                        consistency_checks: search.consistency_checks,
                    };
                }
            }
        }
    }

    let (board, outcome) = match search.explore(initial, &domains) {
        Step::Solved(board) => (board, Outcome::Solved),
        Step::Exhausted => (initial.clone(), Outcome::Exhausted),
        Step::TimedOut => (initial.clone(), Outcome::TimedOut),
    };
    SolveReport {
        board,
        outcome,
        consistency_checks: search.consistency_checks,
    }
}

enum Step {
    Solved(Board),
    Exhausted,
    TimedOut,
}

struct Search<'a> {
    options: &'a SolveOptions,
    deadline: Option<Instant>,
    consistency_checks: usize,
}

impl Search<'_> {
    fn explore(&mut self, board: &Board, domains: &Domains) -> Step {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Step::TimedOut;
            }
        }
        if board.is_complete() {
            return Step::Solved(board.clone());
        }
        let unassigned = board.unassigned_positions();
        let Some(pos) = self.select_variable(board, domains, &unassigned) else {
            // full but inconsistent board; nothing left to assign
            return Step::Exhausted;
        };

        let values = if self.options.lcv {
            heuristics::lcv(domains, pos)
        } else {
            domains.candidates(pos).to_vec()
        };
        for value in values {
            self.consistency_checks += 1;
            if !is_consistent(board, value, pos) {
                continue;
            }
            let branch_domains = if self.options.forward_checking {
                match forward_check(domains, value, pos) {
                    ForwardCheck::Wipeout { removals } => {
                        debug!("{value} at {pos:?} wipes out a peer after {removals} removals");
                        continue;
                    }
                    ForwardCheck::Pruned {
                        domains: pruned, ..
                    } => pruned,
                }
            } else {
                domains.clone()
            };
            // Each candidate gets its own copy of board and domains, so a
            // failed branch leaves nothing behind for its siblings.
            let mut branch_board = board.clone();
            branch_board.set(pos.0, pos.1, value);
            let mut branch_domains = branch_domains;
            branch_domains.assign(pos, value);
            match self.explore(&branch_board, &branch_domains) {
                Step::Exhausted => {}
                step => return step,
            }
        }
        Step::Exhausted
    }

    fn select_variable(
        &self,
        board: &Board,
        domains: &Domains,
        unassigned: &[Pos],
    ) -> Option<Pos> {
        if self.options.mrv && self.options.degree {
            heuristics::mrv_then_degree(board, domains, unassigned)
        } else if self.options.mrv {
            heuristics::mrv(domains, unassigned)
        } else if self.options.degree {
            heuristics::degree(board, unassigned)
        } else {
            unassigned.first().copied()
        }
    }
}
