//! Completion candidates returned by the engine and printed by `clue complete`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The presentation category of a completion candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CompletionKind {
    Function,
    Variable,
    Struct,
    Union,
    Enum,
    Field,
    Method,
    Keyword,
    File,
    Snippet,
}

impl std::fmt::Display for CompletionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Function => "function",
            Self::Variable => "variable",
            Self::Struct => "struct",
            Self::Union => "union",
            Self::Enum => "enum",
            Self::Field => "field",
            Self::Method => "method",
            Self::Keyword => "keyword",
            Self::File => "file",
            Self::Snippet => "snippet",
        };
        f.write_str(s)
    }
}

/// Half-open byte range `[start, end)` of document text replaced on accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReplaceSpan {
    pub start: usize,
    pub end: usize,
}

impl ReplaceSpan {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single suggested label with display and insertion metadata.
///
/// `insert_text` uses editor snippet syntax (`$0`, `${1:name}`) when present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace_span: Option<ReplaceSpan>,
}

impl CompletionItem {
    #[must_use]
    pub fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
            detail: String::new(),
            insert_text: None,
            replace_span: None,
        }
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = detail.into();
        self
    }

    #[must_use]
    pub fn with_insert_text(mut self, insert_text: impl Into<String>) -> Self {
        self.insert_text = Some(insert_text.into());
        self
    }

    #[must_use]
    pub const fn with_replace_span(mut self, span: ReplaceSpan) -> Self {
        self.replace_span = Some(span);
        self
    }
}

/// Response from `clue complete`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CompletionResponse {
    /// Which completion context was detected at the cursor
    /// (`identifier`, `member`, `directive`, `header`).
    pub context: String,
    /// Byte offset of the cursor in the document.
    pub offset: usize,
    pub items: Vec<CompletionItem>,
}
