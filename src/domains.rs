use itertools::Itertools;

use crate::board::{Board, Pos};

/// Per-cell candidate sets, kept sorted ascending. An assigned cell holds
/// exactly its value; an unassigned cell holds every value propagation has
/// not yet excluded. Cloning is a deep copy, which is what makes sibling
/// search branches independent.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Domains {
    size: usize,
    box_size: usize,
    cells: Vec<Vec<u16>>,
}

impl Domains {
    /// Initial domains for a board: `1..=N` for unassigned cells, the
    /// given singleton for pre-filled ones.
    pub fn seed(board: &Board) -> Self {
        let size = board.size();
        let cells = (0..size)
            .cartesian_product(0..size)
            .map(|(row, col)| match board.get(row, col) {
                0 => (1..=size as u16).collect(),
                value => vec![value],
            })
            .collect();
        Self {
            size,
            box_size: board.box_size(),
            cells,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn box_size(&self) -> usize {
        self.box_size
    }

    pub fn candidates(&self, (row, col): Pos) -> &[u16] {
        &self.cells[row * self.size + col]
    }

    /// Restricts a cell to the singleton {value}, the only restriction the
    /// engine ever commits.
    pub fn assign(&mut self, (row, col): Pos, value: u16) {
        self.cells[row * self.size + col] = vec![value];
    }

    /// Removes `value` from a cell's domain. Returns how many candidates
    /// remain if the value was present; `Some(0)` is a wipeout the caller
    /// must act on. Returns `None` when the value was not a candidate.
    pub fn remove(&mut self, (row, col): Pos, value: u16) -> Option<usize> {
        let cell = &mut self.cells[row * self.size + col];
        let index = cell.iter().position(|&candidate| candidate == value)?;
        cell.remove(index);
        Some(cell.len())
    }
}
