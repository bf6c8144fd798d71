//! Cross-cutting error types for clue.
//!
//! Domain-specific errors (`ParserError`, `ConfigError`) are defined in their
//! respective crates and converge in `clue-cli` through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any clue crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A cursor position does not exist in the document.
    #[error("Invalid cursor position: line {line}, column {column}")]
    InvalidPosition { line: usize, column: usize },

    /// A byte offset lies past the end of the document or inside a UTF-8 sequence.
    #[error("Invalid cursor offset {offset} for document of {len} bytes")]
    InvalidOffset { offset: usize, len: usize },
}
