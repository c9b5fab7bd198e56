//! Error and result definitions for the puzzle core.

pub type PuzzleResult<T> = Result<T, PuzzleError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PuzzleError {
    #[error("piece role {0} is out of range (expected 0..=3)")]
    InvalidRole(usize),
    #[error("displacement ({drow},{dcol}) is not a unit step in a cardinal direction")]
    InvalidDirection { drow: i32, dcol: i32 },
}
