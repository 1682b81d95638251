use itertools::Itertools;
use log::debug;

use crate::board::{Board, Pos};
use crate::domains::Domains;

/// True iff `value` does not already appear in the row, column, or box of
/// `pos`. Only the plain backtracking path needs this; with forward
/// checking every surviving candidate is already consistent.
pub fn is_consistent(board: &Board, value: u16, (row, col): Pos) -> bool {
    let size = board.size();
    for i in 0..size {
        if i != col && board.get(row, i) == value {
            return false;
        }
        if i != row && board.get(i, col) == value {
            return false;
        }
    }
    let box_size = board.box_size();
    let row0 = (row / box_size) * box_size;
    let col0 = (col / box_size) * box_size;
    (row0..row0 + box_size)
        .cartesian_product(col0..col0 + box_size)
        .filter(|&pos| pos != (row, col))
        .all(|(r, c)| board.get(r, c) != value)
}

/// The union of same-row, same-column, and same-box positions, excluding
/// `pos` itself, deduplicated and in sorted order.
pub fn peers_of(size: usize, box_size: usize, (row, col): Pos) -> Vec<Pos> {
    let row0 = (row / box_size) * box_size;
    let col0 = (col / box_size) * box_size;
    (row0..row0 + box_size)
        .cartesian_product(col0..col0 + box_size)
        .chain((0..size).map(|c| (row, c)))
        .chain((0..size).map(|r| (r, col)))
        .filter(|&pos| pos != (row, col))
        .unique()
        .sorted()
        .collect()
}

/// Result of propagating one assignment through the peer domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardCheck {
    /// Propagation succeeded; `domains` is the pruned copy to search with.
    Pruned { domains: Domains, removals: usize },
    /// A peer domain went empty. The caller keeps its pre-attempt domains
    /// untouched; the partial pruning is dropped here.
    Wipeout { removals: usize },
}

/// Removes a newly assigned `value` from every peer domain of `pos`,
/// working on a copy of `domains`. All-or-nothing: the first emptied peer
/// aborts the whole step.
pub fn forward_check(domains: &Domains, value: u16, pos: Pos) -> ForwardCheck {
    let mut pruned = domains.clone();
    let mut removals = 0;
    for peer in peers_of(domains.size(), domains.box_size(), pos) {
        if let Some(remaining) = pruned.remove(peer, value) {
            removals += 1;
            if remaining == 0 {
                debug!("removing {value} wiped out the domain of {peer:?}");
                return ForwardCheck::Wipeout { removals };
            }
        }
    }
    ForwardCheck::Pruned {
        domains: pruned,
        removals,
    }
}
