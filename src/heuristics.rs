//! Variable and value ordering for the backtracking engine.
//!
//! Ties in MRV and Degree are broken by encounter order in the row-major
//! unassigned enumeration (first found wins). That tie-break is arbitrary,
//! not a contract: callers may only rely on *some* minimal/maximal
//! position being chosen.

use itertools::Itertools;

use crate::board::{Board, Pos};
use crate::constraints::{forward_check, peers_of, ForwardCheck};
use crate::domains::Domains;

/// Minimum-remaining-values: the unassigned position with the smallest
/// current domain.
pub fn mrv(domains: &Domains, unassigned: &[Pos]) -> Option<Pos> {
    unassigned
        .iter()
        .position_min_by_key(|&&pos| domains.candidates(pos).len())
        .map(|index| unassigned[index])
}

/// Degree: the unassigned position constraining the most other unassigned
/// positions (row, column, and box peers combined).
pub fn degree(board: &Board, unassigned: &[Pos]) -> Option<Pos> {
    let mut best: Option<(Pos, usize)> = None;
    for &pos in unassigned {
        let count = unassigned_degree(board, pos);
        match best {
            Some((_, max)) if count <= max => {}
            _ => best = Some((pos, count)),
        }
    }
    best.map(|(pos, _)| pos)
}

/// MRV with Degree as the tie-break among equally small domains.
pub fn mrv_then_degree(board: &Board, domains: &Domains, unassigned: &[Pos]) -> Option<Pos> {
    let smallest = unassigned
        .iter()
        .map(|&pos| domains.candidates(pos).len())
        .min()?;
    let ties = unassigned
        .iter()
        .copied()
        .filter(|&pos| domains.candidates(pos).len() == smallest)
        .collect_vec();
    degree(board, &ties)
}

/// Least-constraining-value: the candidates of `pos` ordered ascending by
/// how many peer-domain removals a trial forward check of each value would
/// cause. Every trial is discarded; nothing is committed here. Equal
/// removal counts keep the natural ascending value order.
pub fn lcv(domains: &Domains, pos: Pos) -> Vec<u16> {
    domains
        .candidates(pos)
        .iter()
        .copied()
        .sorted_by_key(|&value| match forward_check(domains, value, pos) {
            ForwardCheck::Pruned { removals, .. } | ForwardCheck::Wipeout { removals } => removals,
        })
        .collect()
}

fn unassigned_degree(board: &Board, pos: Pos) -> usize {
    peers_of(board.size(), board.box_size(), pos)
        .into_iter()
        .filter(|&(row, col)| board.get(row, col) == 0)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_4x4(clues: &[(usize, usize, u16)]) -> Board {
        let mut grid = vec![vec![0; 4]; 4];
        for &(row, col, value) in clues {
            grid[row][col] = value;
        }
        Board::from_grid(grid).unwrap()
    }

    /// Domains after running the seeding forward check for every clue.
    fn seeded(board: &Board) -> Domains {
        let mut domains = Domains::seed(board);
        for (row, col) in board.assigned_positions() {
            match forward_check(&domains, board.get(row, col), (row, col)) {
                ForwardCheck::Pruned {
                    domains: pruned, ..
                } => domains = pruned,
                ForwardCheck::Wipeout { .. } => unreachable!(),
            }
        }
        domains
    }

    #[test]
    fn mrv_prefers_the_smallest_domain() {
        let board = board_4x4(&[(0, 0, 1), (0, 1, 2), (0, 2, 3)]);
        let domains = seeded(&board);
        let unassigned = board.unassigned_positions();
        // (0, 3) is the only cell left with a singleton domain {4}
        assert_eq!(mrv(&domains, &unassigned), Some((0, 3)));
    }

    #[test]
    fn mrv_breaks_ties_by_first_found() {
        let board = board_4x4(&[]);
        let domains = Domains::seed(&board);
        let unassigned = board.unassigned_positions();
        assert_eq!(mrv(&domains, &unassigned), Some((0, 0)));
    }

    #[test]
    fn degree_prefers_the_most_unassigned_peers() {
        let board = board_4x4(&[(0, 0, 1)]);
        let unassigned = board.unassigned_positions();
        // every peer of (0, 0) has one assigned peer; (1, 2) is the first
        // position sharing nothing with the clue, so all 7 peers are free
        assert_eq!(degree(&board, &unassigned), Some((1, 2)));
    }

    #[test]
    fn mrv_then_degree_uses_degree_only_among_ties() {
        let board = board_4x4(&[(0, 0, 1), (0, 1, 2), (0, 2, 3)]);
        let domains = seeded(&board);
        let unassigned = board.unassigned_positions();
        // (0, 3) has the strictly smallest domain, so degree never runs
        assert_eq!(
            mrv_then_degree(&board, &domains, &unassigned),
            Some((0, 3))
        );
    }

    #[test]
    fn lcv_orders_values_by_trial_removal_count() {
        let board = board_4x4(&[]);
        let mut domains = Domains::seed(&board);
        // prune 4 out of six of the seven peers of (2, 2): a trial of 4
        // now removes one candidate while any other value removes seven,
        // so 4 jumps ahead of the natural order
        for peer in [(0, 2), (1, 2), (2, 0), (2, 1), (2, 3), (3, 2)] {
            assert_eq!(domains.remove(peer, 4), Some(3));
        }
        assert_eq!(lcv(&domains, (2, 2)), vec![4, 1, 2, 3]);
    }

    #[test]
    fn lcv_keeps_natural_order_on_equal_counts() {
        let board = board_4x4(&[]);
        let domains = Domains::seed(&board);
        assert_eq!(lcv(&domains, (2, 2)), vec![1, 2, 3, 4]);
    }
}
