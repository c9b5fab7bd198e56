//! Board coordinates and the four cardinal movement directions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PuzzleError, PuzzleResult};

/// A cell on the board, addressed by row and column.
///
/// Positions carry no bounds information; staying on the board is the
/// caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Returns the position one step away in the given direction.
    pub fn moved(self, direction: Direction) -> Self {
        let (drow, dcol) = direction.delta();
        Self::new(self.row + drow, self.col + dcol)
    }

    pub fn up(self) -> Self {
        self.moved(Direction::Up)
    }

    pub fn right(self) -> Self {
        self.moved(Direction::Right)
    }

    pub fn down(self) -> Self {
        self.moved(Direction::Down)
    }

    pub fn left(self) -> Self {
        self.moved(Direction::Left)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// A cardinal movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// All directions, in the fixed enumeration order used everywhere a
    /// direction set is iterated. The solver's tie-breaking between
    /// equally short solutions follows this order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// The (row, column) displacement of a single step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    /// Maps a displacement back to the matching direction.
    ///
    /// Used to translate a board-cell click into an intended move. Fails
    /// unless the displacement is exactly one unit step along one axis.
    pub fn from_delta(drow: i32, dcol: i32) -> PuzzleResult<Direction> {
        match (drow, dcol) {
            (-1, 0) => Ok(Direction::Up),
            (0, 1) => Ok(Direction::Right),
            (1, 0) => Ok(Direction::Down),
            (0, -1) => Ok(Direction::Left),
            _ => Err(PuzzleError::InvalidDirection { drow, dcol }),
        }
    }
}
