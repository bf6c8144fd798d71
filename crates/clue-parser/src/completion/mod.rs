//! Completion assembly: context detection and candidate lists.

mod keywords;

pub use keywords::{DIRECTIVES, KEYWORDS, directive_items, keyword_items};

use clue_config::ClueConfig;
use clue_core::{CompletionItem, CompletionKind, CompletionResponse, Cursor};

use crate::engine::{Cancellation, Engine};
use crate::error::ParserError;
use crate::headers::HeaderIndex;
use crate::members::MemberChain;
use crate::preprocess::{DEFAULT_MAX_INCLUDE_DEPTH, IncludeResolver};
use crate::symbols::{CType, CompositeKind, Declaration, SymbolTable};

/// What kind of completion the cursor position calls for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionContext {
    /// The current line contains `#include`.
    Header,
    /// The current line is just `#`.
    Directive,
    /// The prefix ends with a member access chain.
    Member(MemberChain),
    /// Plain identifier position.
    Identifier {
        /// Byte offset where the word under the cursor starts.
        word_start: usize,
        /// Whether only whitespace precedes that word on its line.
        at_line_start: bool,
    },
}

impl CompletionContext {
    #[must_use]
    pub fn detect(prefix: &str) -> Self {
        let line_start = prefix.rfind('\n').map_or(0, |i| i + 1);
        let line = &prefix[line_start..];

        if line.contains("#include") {
            return Self::Header;
        }
        if line.trim() == "#" {
            return Self::Directive;
        }
        if let Some(chain) = MemberChain::parse(prefix) {
            return Self::Member(chain);
        }

        let word_start = prefix
            .bytes()
            .rposition(|b| !(b.is_ascii_alphanumeric() || b == b'_'))
            .map_or(0, |i| i + 1)
            .max(line_start);
        Self::Identifier {
            word_start,
            at_line_start: prefix[line_start..word_start].trim().is_empty(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Directive => "directive",
            Self::Member(_) => "member",
            Self::Identifier { .. } => "identifier",
        }
    }
}

/// Request-independent completion settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionOptions {
    /// Offer keywords and snippets at the start of a line.
    pub keywords: bool,
    /// Offer header files after `#include`.
    pub header_search: bool,
    pub max_include_depth: usize,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            keywords: true,
            header_search: true,
            max_include_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }
}

impl From<&ClueConfig> for CompletionOptions {
    fn from(config: &ClueConfig) -> Self {
        Self {
            keywords: config.completion.keywords,
            header_search: config.completion.header_search,
            max_include_depth: config.include.max_depth,
        }
    }
}

/// Produces completion candidates for a document prefix.
pub struct Completer<'a> {
    resolver: &'a dyn IncludeResolver,
    headers: Option<&'a HeaderIndex>,
    options: CompletionOptions,
}

impl<'a> Completer<'a> {
    #[must_use]
    pub fn new(resolver: &'a dyn IncludeResolver, options: CompletionOptions) -> Self {
        Self {
            resolver,
            headers: None,
            options,
        }
    }

    /// Header files offered in `#include` lines.
    #[must_use]
    pub const fn with_headers(mut self, headers: &'a HeaderIndex) -> Self {
        self.headers = Some(headers);
        self
    }

    /// Candidates for the cursor at the end of `prefix`.
    ///
    /// Only the text before the expression being completed is analyzed, so
    /// the half-typed expression never disturbs the syntax tree.
    ///
    /// # Errors
    /// Returns [`ParserError::Cancelled`] when `cancel` fires mid-analysis.
    pub fn complete(
        &self,
        prefix: &str,
        cancel: &dyn Cancellation,
    ) -> Result<CompletionResponse, ParserError> {
        let context = CompletionContext::detect(prefix);
        let engine = Engine::new(self.resolver).with_max_include_depth(self.options.max_include_depth);

        let items = match &context {
            CompletionContext::Header => self.header_items(),
            CompletionContext::Directive => directive_items(),
            CompletionContext::Member(chain) => {
                let analysis = engine.analyze(&prefix[..chain.start], cancel)?;
                chain.complete(prefix, &analysis.table)
            }
            CompletionContext::Identifier {
                word_start,
                at_line_start,
            } => {
                let analysis = engine.analyze(&prefix[..*word_start], cancel)?;
                let mut items = identifier_items(&analysis.table);
                if self.options.keywords && *at_line_start {
                    items.extend(keyword_items());
                }
                items
            }
        };

        tracing::debug!(context = context.name(), items = items.len(), "completion");
        Ok(CompletionResponse {
            context: context.name().to_string(),
            offset: prefix.len(),
            items,
        })
    }

    /// Candidates for `cursor` within the whole document `text`.
    ///
    /// # Errors
    /// Returns [`ParserError::Position`] for a cursor outside the document,
    /// or [`ParserError::Cancelled`] as for [`Self::complete`].
    pub fn complete_at(
        &self,
        text: &str,
        cursor: Cursor,
        cancel: &dyn Cancellation,
    ) -> Result<CompletionResponse, ParserError> {
        let offset = cursor.to_offset(text)?;
        self.complete(&text[..offset], cancel)
    }

    fn header_items(&self) -> Vec<CompletionItem> {
        if !self.options.header_search {
            return Vec::new();
        }
        self.headers
            .into_iter()
            .flatten()
            .map(|(name, path)| {
                CompletionItem::new(name, CompletionKind::File)
                    .with_detail(path.display().to_string())
            })
            .collect()
    }
}

/// One candidate per visible name, from its innermost binding.
#[must_use]
pub fn identifier_items(table: &SymbolTable) -> Vec<CompletionItem> {
    table
        .visible()
        .map(|(name, decl)| {
            let (kind, detail) = match decl {
                Declaration::Function(f) => (CompletionKind::Function, f.signature()),
                Declaration::Variable(v) => (CompletionKind::Variable, v.ty.label()),
                Declaration::Type(ty) => (type_kind(ty), type_detail(ty)),
                Declaration::Typedef { target, .. } => {
                    (type_kind(target), format!("typedef {}", target.label()))
                }
                Declaration::Enum { .. } => (CompletionKind::Enum, "enum".to_string()),
            };
            CompletionItem::new(name, kind).with_detail(detail)
        })
        .collect()
}

fn type_kind(ty: &CType) -> CompletionKind {
    match ty.composite_kind() {
        Some(CompositeKind::Struct) => CompletionKind::Struct,
        Some(CompositeKind::Union) => CompletionKind::Union,
        None => CompletionKind::Keyword,
    }
}

fn type_detail(ty: &CType) -> String {
    ty.composite_kind()
        .map_or("type", CompositeKind::keyword)
        .to_string()
}
