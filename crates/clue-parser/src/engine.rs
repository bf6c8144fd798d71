//! The analysis pipeline: preprocess, parse, extract.
//!
//! Everything is rebuilt from the text on every call; nothing is cached.
//! A [`Cancellation`] is checked before each stage.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::error::ParserError;
use crate::extract::extract_symbols;
use crate::parser::parse_c;
use crate::preprocess::{IncludeResolver, MacroTable, Preprocessor, DEFAULT_MAX_INCLUDE_DEPTH};
use crate::symbols::SymbolTable;

/// Cooperative cancellation signal.
pub trait Cancellation {
    fn is_cancelled(&self) -> bool;
}

impl Cancellation for AtomicBool {
    fn is_cancelled(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

/// Never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl Cancellation for NeverCancel {
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Pipeline stage, reported when a request is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Preprocess,
    Parse,
    Extract,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Preprocess => "preprocess",
            Self::Parse => "parse",
            Self::Extract => "extract",
        })
    }
}

/// Result of analyzing one document prefix.
#[derive(Debug)]
pub struct Analysis {
    /// Preprocessed text handed to the parser.
    pub processed: String,
    pub macros: MacroTable,
    pub table: SymbolTable,
}

pub struct Engine<'r> {
    resolver: &'r dyn IncludeResolver,
    max_include_depth: usize,
}

impl<'r> Engine<'r> {
    #[must_use]
    pub fn new(resolver: &'r dyn IncludeResolver) -> Self {
        Self {
            resolver,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    #[must_use]
    pub const fn with_max_include_depth(mut self, depth: usize) -> Self {
        self.max_include_depth = depth;
        self
    }

    /// Preprocess `text`, parse it and build its symbol table.
    ///
    /// # Errors
    /// Returns [`ParserError::Cancelled`] if `cancel` fires before a stage.
    pub fn analyze(
        &self,
        text: &str,
        cancel: &dyn Cancellation,
    ) -> Result<Analysis, ParserError> {
        checkpoint(cancel, Stage::Preprocess)?;
        let preprocessed = Preprocessor::new(self.resolver)
            .with_max_depth(self.max_include_depth)
            .run(text);

        checkpoint(cancel, Stage::Parse)?;
        let tree = parse_c(&preprocessed.text);

        checkpoint(cancel, Stage::Extract)?;
        let table = extract_symbols(&tree);
        tracing::debug!(
            bytes = text.len(),
            macros = preprocessed.macros.len(),
            depth = table.depth(),
            "analysis complete"
        );

        Ok(Analysis {
            processed: preprocessed.text,
            macros: preprocessed.macros,
            table,
        })
    }
}

fn checkpoint(cancel: &dyn Cancellation, stage: Stage) -> Result<(), ParserError> {
    if cancel.is_cancelled() {
        tracing::debug!(%stage, "analysis cancelled");
        return Err(ParserError::Cancelled { stage });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocess::NoIncludes;
    use crate::symbols::Declaration;

    #[test]
    fn analyze_runs_every_stage() {
        let analysis = Engine::new(&NoIncludes)
            .analyze("#define N 3\nint v[N];\n", &NeverCancel)
            .expect("analysis");
        assert_eq!(analysis.processed, "\nint v[3];\n");
        assert_eq!(analysis.macros.value("N"), Some("3"));
        assert!(matches!(
            analysis.table.lookup("v"),
            Some(Declaration::Variable(_))
        ));
    }

    #[test]
    fn cancelled_flag_stops_before_preprocessing() {
        let cancel = AtomicBool::new(true);
        let err = Engine::new(&NoIncludes)
            .analyze("int v;", &cancel)
            .expect_err("cancelled");
        assert!(matches!(
            err,
            ParserError::Cancelled {
                stage: Stage::Preprocess
            }
        ));
        assert_eq!(err.to_string(), "Analysis cancelled before preprocess");
    }
}
