use std::fs;
use std::path::Path;

use crate::board::{Board, BoardOptions};
use crate::error::BoardError;

/// A collection of boards read from one text file.
#[derive(Debug)]
pub struct Levels {
    levels: Vec<Board>,
}

impl Levels {
    /// Parse boards in the grid format from a string.
    ///
    /// - Lines starting with `;` are comments and end the current board
    /// - Blank lines end the current board
    /// - Every other line is a grid row
    pub fn from_text(contents: &str) -> Result<Self, BoardError> {
        Self::from_text_with_options(contents, BoardOptions::default())
    }

    /// Like [`Levels::from_text`], building every board with `options`.
    pub fn from_text_with_options(contents: &str, options: BoardOptions) -> Result<Self, BoardError> {
        let mut levels = Vec::new();
        let mut current = String::new();

        let mut flush = |current: &mut String| -> Result<(), BoardError> {
            if !current.is_empty() {
                levels.push(Board::from_grid_with_options(current.trim_end(), options)?);
                current.clear();
            }
            Ok(())
        };

        for line in contents.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with(';') || trimmed.is_empty() {
                flush(&mut current)?;
                continue;
            }
            current.push_str(trimmed);
            current.push('\n');
        }
        flush(&mut current)?;

        Ok(Levels { levels })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BoardError> {
        Self::from_file_with_options(path, BoardOptions::default())
    }

    pub fn from_file_with_options(
        path: impl AsRef<Path>,
        options: BoardOptions,
    ) -> Result<Self, BoardError> {
        let contents = fs::read_to_string(path)?;
        Self::from_text_with_options(&contents, options)
    }

    /// Get the nth level (0-indexed).
    pub fn get(&self, index: usize) -> Option<&Board> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}
