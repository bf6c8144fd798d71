//! Parser error types for clue-parser.

use crate::engine::Stage;

/// Errors that can occur while analyzing a document or collecting headers.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Analysis cancelled before {stage}")]
    Cancelled { stage: Stage },

    #[error(transparent)]
    Position(#[from] clue_core::CoreError),

    #[error("Header walk failed: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Invalid header glob: {0}")]
    Glob(#[from] globset::Error),

    #[error("Malformed c_cpp_properties.json: {0}")]
    Properties(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
