use std::fmt;

use itertools::Itertools;

use crate::constraints::is_consistent;
use crate::parse::PuzzleError;

/// A 0-indexed (row, column) cell position.
pub type Pos = (usize, usize);

/// The N×N grid of cell values. 0 marks an unassigned cell, 1..=N an
/// assigned one. Every search branch works on its own clone, so a failed
/// branch can never leak assignments into a sibling.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Board {
    size: usize,
    box_size: usize,
    cells: Vec<u16>,
}

/// The box side length for an N×N board, or `None` when N is not a
/// (positive) perfect square.
pub(crate) fn box_size_of(size: usize) -> Option<usize> {
    let root = (size as f64).sqrt().round() as usize;
    (size > 0 && root * root == size).then_some(root)
}

impl Board {
    /// Builds a board from a raw grid, validating everything the search
    /// relies on: square shape, perfect-square size, values in 0..=N, and
    /// no clue conflicting with another clue in its row, column, or box.
    pub fn from_grid(grid: Vec<Vec<u16>>) -> Result<Self, PuzzleError> {
        let size = grid.len();
        let box_size = box_size_of(size).ok_or(PuzzleError::NotPerfectSquare { size })?;
        let mut board = Self {
            size,
            box_size,
            cells: vec![0; size * size],
        };
        for (row, values) in grid.iter().enumerate() {
            if values.len() != size {
                return Err(PuzzleError::RaggedGrid {
                    row: row + 1,
                    len: values.len(),
                    size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if value == 0 {
                    continue;
                }
                if value as usize > size {
                    return Err(PuzzleError::ClueOutOfRange {
                        row: row + 1,
                        col: col + 1,
                        value,
                        size,
                    });
                }
                if !is_consistent(&board, value, (row, col)) {
                    return Err(PuzzleError::ContradictoryClue {
                        row: row + 1,
                        col: col + 1,
                        value,
                    });
                }
                board.set(row, col, value);
            }
        }
        Ok(board)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn box_size(&self) -> usize {
        self.box_size
    }

    pub fn get(&self, row: usize, col: usize) -> u16 {
        self.cells[row * self.size + col]
    }

    /// Stores `value` at (row, col). Positions outside the grid are a
    /// programming error and panic on the index.
    pub fn set(&mut self, row: usize, col: usize, value: u16) {
        self.cells[row * self.size + col] = value;
    }

    /// Unassigned positions in row-major order.
    pub fn unassigned_positions(&self) -> Vec<Pos> {
        self.positions_holding(0)
    }

    /// Pre-filled positions in row-major order.
    pub fn assigned_positions(&self) -> Vec<Pos> {
        (0..self.size)
            .cartesian_product(0..self.size)
            .filter(|&(row, col)| self.get(row, col) != 0)
            .collect()
    }

    fn positions_holding(&self, value: u16) -> Vec<Pos> {
        (0..self.size)
            .cartesian_product(0..self.size)
            .filter(|&(row, col)| self.get(row, col) == value)
            .collect()
    }

    /// True iff every cell is assigned and no cell's value repeats in its
    /// row, column, or box. All three groups are checked for every cell;
    /// this has to hold even when propagation was not perfectly maintained
    /// on the way here.
    pub fn is_complete(&self) -> bool {
        for row in 0..self.size {
            for col in 0..self.size {
                let value = self.get(row, col);
                if value == 0 {
                    return false;
                }
                for i in 0..self.size {
                    if i != col && self.get(row, i) == value {
                        return false;
                    }
                    if i != row && self.get(i, col) == value {
                        return false;
                    }
                }
                let row0 = (row / self.box_size) * self.box_size;
                let col0 = (col / self.box_size) * self.box_size;
                for (r, c) in
                    (row0..row0 + self.box_size).cartesian_product(col0..col0 + self.box_size)
                {
                    if (r, c) != (row, col) && self.get(r, c) == value {
                        return false;
                    }
                }
            }
        }
        true
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segment = "-".repeat(self.box_size * 3 + 1);
        let border = format!("+{}", format!("{segment}+").repeat(self.box_size));
        let mut line = String::new();
        for row in 0..self.size {
            if row % self.box_size == 0 {
                writeln!(f, "{border}")?;
            }
            for col in 0..self.size {
                if col % self.box_size == 0 {
                    line.push_str("| ");
                }
                match self.get(row, col) {
                    0 => line.push_str("   "),
                    value => line.push_str(&format!("{value:>2} ")),
                }
            }
            line.push('|');
            writeln!(f, "{line}")?;
            line.clear();
        }
        writeln!(f, "{border}")
    }
}
