use std::path::PathBuf;

use anyhow::bail;
use clap::{Args, Subcommand, ValueEnum};
use clue_core::Cursor;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Completion candidates at a cursor position.
    Complete(CompleteArgs),
    /// Symbols visible at a cursor position (end of file by default).
    Symbols(SymbolsArgs),
    /// Preprocessed text and final macro table of a file.
    Preprocess(PreprocessArgs),
    /// Header files offered after `#include`.
    Headers,
    /// JSON schema of a command's output.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct CompleteArgs {
    /// C source file.
    pub file: PathBuf,

    /// Cursor as a byte offset.
    #[arg(long, conflicts_with_all = ["line", "column"])]
    pub offset: Option<usize>,

    /// Cursor line (zero-based).
    #[arg(short, long)]
    pub line: Option<usize>,

    /// Cursor column in characters (zero-based).
    #[arg(short, long)]
    pub column: Option<usize>,
}

impl CompleteArgs {
    /// The cursor named on the command line.
    pub fn cursor(&self) -> anyhow::Result<Cursor> {
        match (self.offset, self.line, self.column) {
            (Some(offset), None, None) => Ok(Cursor::Offset(offset)),
            (None, Some(line), Some(column)) => Ok(Cursor::LineColumn { line, column }),
            _ => bail!("complete: pass either --offset or both --line and --column"),
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct SymbolsArgs {
    /// C source file.
    pub file: PathBuf,

    /// Analyze only the text before this byte offset.
    #[arg(long)]
    pub offset: Option<usize>,
}

#[derive(Clone, Debug, Args)]
pub struct PreprocessArgs {
    /// C source file.
    pub file: PathBuf,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum SchemaType {
    /// Output of `clue complete`.
    CompletionResponse,
    /// A single completion candidate.
    CompletionItem,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    #[arg(value_enum)]
    pub type_name: SchemaType,
}
