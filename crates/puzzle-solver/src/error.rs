//! Error types for building puzzles and applying user moves.

use std::path::PathBuf;

use thiserror::Error;

/// A puzzle could not be constructed or parsed.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: expected {expected}")]
    MissingField { line: usize, expected: &'static str },

    #[error("line {line}: invalid number {value:?}")]
    InvalidNumber { line: usize, value: String },

    #[error("line {line}: expected {expected} cells, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: unknown cell {cell:?}")]
    UnknownCell { line: usize, cell: String },

    #[error("board must have at least one row and one column")]
    EmptyBoard,

    #[error("car {name}: {reason}")]
    InvalidCar { name: char, reason: String },

    #[error("clock must have at least one hour")]
    NoHours,

    #[error("start hour {start} is outside 1..={hours}")]
    StartOutOfRange { start: u32, hours: u32 },

    #[error("at least one bucket is required")]
    NoBuckets,
}

/// A single user move was rejected. The board is left as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },

    #[error("no piece at ({row}, {col})")]
    NoPiece { row: usize, col: usize },

    #[error("cannot move to ({row}, {col})")]
    InvalidDestination { row: usize, col: usize },
}
