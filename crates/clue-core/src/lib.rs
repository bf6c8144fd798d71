//! # clue-core
//!
//! Core types shared across all clue crates:
//! - Completion candidates (`CompletionItem`, `CompletionKind`, `ReplaceSpan`)
//! - Cursor positions and line/column to byte offset conversion
//! - Cross-cutting error types

pub mod completion;
pub mod errors;
pub mod position;

pub use completion::{CompletionItem, CompletionKind, CompletionResponse, ReplaceSpan};
pub use errors::CoreError;
pub use position::Cursor;
