//! # clue-parser
//!
//! C symbol resolution for code completion. Given the document text up to
//! the cursor, the engine:
//!
//! 1. preprocesses it: object-like macro substitution, conditional pruning
//!    and `#include` splicing ([`preprocess`]);
//! 2. parses the result with the tree-sitter C grammar through ast-grep
//!    ([`parser`]);
//! 3. walks the tree in document order, maintaining a scoped
//!    [`SymbolTable`] ([`extract`]);
//! 4. turns the visible bindings, or the members reached through an
//!    `a.b.` chain, into completion candidates ([`completion`], [`members`]).
//!
//! Tables are rebuilt from scratch on every request.
//!
//! ```
//! use clue_parser::{Completer, CompletionOptions, NeverCancel, NoIncludes};
//!
//! let source = "struct P { int x; };\nvoid move(struct P p, int dx) { }\nstruct P p;\np.";
//! let response = Completer::new(&NoIncludes, CompletionOptions::default())
//!     .complete(source, &NeverCancel)
//!     .expect("completion");
//! let labels: Vec<_> = response.items.iter().map(|i| i.label.as_str()).collect();
//! assert_eq!(labels, ["x", "move"]);
//! ```

pub mod completion;
pub mod engine;
pub mod error;
pub mod extract;
pub mod headers;
pub mod members;
pub mod parser;
pub mod preprocess;
pub mod symbols;

pub use completion::{Completer, CompletionContext, CompletionOptions, identifier_items};
pub use engine::{Analysis, Cancellation, Engine, NeverCancel, Stage};
pub use error::ParserError;
pub use extract::extract_symbols;
pub use headers::{HeaderIndex, HeaderSearch};
pub use members::MemberChain;
pub use parser::{AstTree, parse_c};
pub use preprocess::{
    FsIncludeResolver, IncludeResolver, IncludeTarget, MacroTable, NoIncludes, Preprocessed,
    Preprocessor, ResolvedInclude,
};
pub use symbols::{CType, Declaration, Member, SymbolTable};
