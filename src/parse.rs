use derive_more::{Display, Error};

use crate::board::{box_size_of, Board};

/// Everything that can be wrong with a puzzle, all detected before the
/// search begins. Coordinates in messages are 1-indexed like the file
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PuzzleError {
    #[display("malformed header line {line:?}: expected an integer")]
    MalformedHeader { line: String },
    #[display("board size {size} is not a perfect square")]
    NotPerfectSquare { size: usize },
    #[display("row {row} has {len} cells, expected {size}")]
    RaggedGrid { row: usize, len: usize, size: usize },
    #[display("expected {expected} clue lines, found {found}")]
    MissingClues { expected: usize, found: usize },
    #[display("malformed clue line {line:?}: expected `row col value`")]
    MalformedClue { line: String },
    #[display("clue ({row}, {col}) = {value} is out of range for a {size}x{size} board")]
    ClueOutOfRange {
        row: usize,
        col: usize,
        value: u16,
        size: usize,
    },
    #[display("two clues target cell ({row}, {col})")]
    DuplicateCluePosition { row: usize, col: usize },
    #[display("clue ({row}, {col}) = {value} repeats a value in its row, column, or box")]
    ContradictoryClue { row: usize, col: usize, value: u16 },
}

/// Parses the puzzle text format: line 1 is the board size N, line 2 the
/// clue count M, followed by M lines of `row col value` with 1-indexed
/// coordinates. Unlisted cells stay empty. Blank lines are skipped.
pub fn parse_puzzle(text: &str) -> Result<Board, PuzzleError> {
    let mut lines = text.lines().filter(|line| !line.trim().is_empty());

    let size = read_header(lines.next())?;
    if box_size_of(size).is_none() {
        return Err(PuzzleError::NotPerfectSquare { size });
    }
    let clue_count = read_header(lines.next())?;

    let mut grid = vec![vec![0u16; size]; size];
    for found in 0..clue_count {
        let line = lines.next().ok_or(PuzzleError::MissingClues {
            expected: clue_count,
            found,
        })?;
        let (row, col, value) = read_clue(line)?;
        if !(1..=size).contains(&row) || !(1..=size).contains(&col) || !(1..=size as u16).contains(&value) {
            return Err(PuzzleError::ClueOutOfRange {
                row,
                col,
                value,
                size,
            });
        }
        if grid[row - 1][col - 1] != 0 {
            return Err(PuzzleError::DuplicateCluePosition { row, col });
        }
        grid[row - 1][col - 1] = value;
    }

    // catches clues that conflict across rows, columns, or boxes
    Board::from_grid(grid)
}

fn read_header(line: Option<&str>) -> Result<usize, PuzzleError> {
    let line = line.unwrap_or("").trim();
    line.parse().map_err(|_| PuzzleError::MalformedHeader {
        line: line.to_string(),
    })
}

fn read_clue(line: &str) -> Result<(usize, usize, u16), PuzzleError> {
    let malformed = || PuzzleError::MalformedClue {
        line: line.to_string(),
    };
    let mut fields = line.split_whitespace();
    let row = fields.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    let col = fields.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    let value = fields.next().ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
    if fields.next().is_some() {
        return Err(malformed());
    }
    Ok((row, col, value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_diagonal_example() {
        let text = "4\n4\n1 1 1\n2 2 2\n3 3 3\n4 4 4\n";
        let board = parse_puzzle(text).unwrap();
        assert_eq!(board.size(), 4);
        assert_eq!(board.box_size(), 2);
        for i in 0..4 {
            assert_eq!(board.get(i, i), i as u16 + 1);
        }
        assert_eq!(board.get(0, 1), 0);
        println!("{board}");
    }

    #[test]
    fn skips_blank_lines() {
        let text = "4\n\n2\n1 1 1\n\n2 2 2\n";
        let board = parse_puzzle(text).unwrap();
        assert_eq!(board.get(1, 1), 2);
    }

    #[test]
    fn rejects_a_non_integer_header() {
        let err = parse_puzzle("nine\n0\n").unwrap_err();
        assert_eq!(
            err,
            PuzzleError::MalformedHeader {
                line: "nine".to_string()
            }
        );
    }

    #[test]
    fn rejects_a_non_perfect_square_size() {
        let err = parse_puzzle("6\n0\n").unwrap_err();
        assert_eq!(err, PuzzleError::NotPerfectSquare { size: 6 });
    }

    #[test]
    fn rejects_missing_clue_lines() {
        let err = parse_puzzle("4\n3\n1 1 1\n").unwrap_err();
        assert_eq!(
            err,
            PuzzleError::MissingClues {
                expected: 3,
                found: 1
            }
        );
    }

    #[test]
    fn rejects_a_malformed_clue_line() {
        let err = parse_puzzle("4\n1\n1 1\n").unwrap_err();
        assert_eq!(
            err,
            PuzzleError::MalformedClue {
                line: "1 1".to_string()
            }
        );
    }

    #[test]
    fn rejects_out_of_range_coordinates_and_values() {
        let err = parse_puzzle("4\n1\n5 1 1\n").unwrap_err();
        assert_eq!(
            err,
            PuzzleError::ClueOutOfRange {
                row: 5,
                col: 1,
                value: 1,
                size: 4
            }
        );
        let err = parse_puzzle("4\n1\n1 1 0\n").unwrap_err();
        assert!(matches!(err, PuzzleError::ClueOutOfRange { value: 0, .. }));
    }

    #[test]
    fn rejects_two_clues_on_the_same_cell() {
        let err = parse_puzzle("4\n2\n1 1 1\n1 1 2\n").unwrap_err();
        assert_eq!(err, PuzzleError::DuplicateCluePosition { row: 1, col: 1 });
    }

    #[test]
    fn rejects_a_repeated_value_in_one_row() {
        // two 5s in row 1 of a 9x9 board
        let err = parse_puzzle("9\n2\n1 2 5\n1 7 5\n").unwrap_err();
        assert_eq!(
            err,
            PuzzleError::ContradictoryClue {
                row: 1,
                col: 7,
                value: 5
            }
        );
    }
}
