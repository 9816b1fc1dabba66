use std::io;

use thiserror::Error;

/// Errors raised when a board is built or mutated in a way that breaks its
/// invariants. Movement failures are not errors; moves report `false`.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Invalid board size {width}x{height}: both dimensions must be positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Position ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },

    #[error("Tile ({x}, {y}) is already occupied")]
    TileOccupied { x: i32, y: i32 },

    #[error("Board already has a player")]
    DuplicatePlayer,

    #[error("Empty grid")]
    EmptyGrid,

    #[error("Row {row} has length {found}, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Invalid character '{ch}' at position ({x}, {y})")]
    UnknownGlyph { ch: char, x: usize, y: usize },

    #[error("Invalid raccoon turn frequency {0}: must be at least 1")]
    InvalidFrequency(u32),

    #[error("Invalid script symbol '{ch}' at offset {offset}")]
    UnknownScriptSymbol { ch: char, offset: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
