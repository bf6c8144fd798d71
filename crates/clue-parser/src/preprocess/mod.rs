//! Line-oriented macro and conditional preprocessor.
//!
//! Consumes every directive, splices included files inline, prunes
//! conditional branches and finally substitutes object-like macros in the
//! remaining text. Directive and pruned lines come out as empty lines so
//! line numbers within a file are preserved.
//!
//! This is not a conforming C preprocessor: function-like macros are
//! recorded but never expanded, and there is no token pasting,
//! stringizing or line continuation.

mod condition;
mod include;
mod macros;

pub use condition::{ConditionError, evaluate, try_evaluate};
pub use include::{FsIncludeResolver, IncludeResolver, IncludeTarget, NoIncludes, ResolvedInclude};
pub use macros::{Macro, MacroTable};

use macros::skip_quoted;

/// Include nesting limit used when none is configured.
pub const DEFAULT_MAX_INCLUDE_DEPTH: usize = 32;

/// Output of a preprocessing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preprocessed {
    pub text: String,
    /// Macro table as it stood at the end of the input.
    pub macros: MacroTable,
}

/// State of one `#if` group.
#[derive(Debug, Clone, Copy)]
struct Branch {
    /// Whether the enclosing region is live.
    parent_active: bool,
    /// Whether some branch of this group has already been selected.
    taken: bool,
    /// Whether the current branch is live.
    active: bool,
}

#[derive(Debug, Default)]
struct Conditionals {
    stack: Vec<Branch>,
}

impl Conditionals {
    fn active(&self) -> bool {
        self.stack.last().is_none_or(|b| b.active)
    }

    fn open(&mut self, condition: impl FnOnce() -> bool) {
        let parent_active = self.active();
        let active = parent_active && condition();
        self.stack.push(Branch {
            parent_active,
            taken: active,
            active,
        });
    }

    fn elif(&mut self, condition: impl FnOnce() -> bool) {
        let Some(branch) = self.stack.last_mut() else {
            return;
        };
        if branch.parent_active && !branch.taken {
            branch.active = condition();
            branch.taken = branch.active;
        } else {
            branch.active = false;
        }
    }

    fn otherwise(&mut self) {
        if let Some(branch) = self.stack.last_mut() {
            branch.active = branch.parent_active && !branch.taken;
            branch.taken = true;
        }
    }

    fn close(&mut self) {
        self.stack.pop();
    }
}

/// A parsed directive line: `#name rest`.
struct Directive<'a> {
    name: &'a str,
    rest: String,
}

impl<'a> Directive<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        let body = line.trim_start().strip_prefix('#')?.trim_start();
        let name_end = body
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(body.len());
        let (name, rest) = body.split_at(name_end);
        Some(Self {
            name,
            rest: strip_comments(rest).trim().to_string(),
        })
    }
}

/// Drop `//` and `/* */` comments from a single directive line.
fn strip_comments(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'') => i = skip_quoted(bytes, i, quote),
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                out.push_str(&text[copied..i]);
                return out;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                out.push_str(&text[copied..i]);
                out.push(' ');
                i = bytes[i + 2..]
                    .windows(2)
                    .position(|w| w == b"*/")
                    .map_or(bytes.len(), |p| i + 2 + p + 2);
                copied = i;
            }
            _ => i += 1,
        }
    }
    out.push_str(&text[copied.min(text.len())..]);
    out
}

/// Runs preprocessing passes against an include resolver.
pub struct Preprocessor<'r> {
    resolver: &'r dyn IncludeResolver,
    max_depth: usize,
}

impl<'r> Preprocessor<'r> {
    #[must_use]
    pub fn new(resolver: &'r dyn IncludeResolver) -> Self {
        Self {
            resolver,
            max_depth: DEFAULT_MAX_INCLUDE_DEPTH,
        }
    }

    /// Deepest include nesting spliced; deeper `#include`s are skipped.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Preprocess `source` with a fresh macro table.
    #[must_use]
    pub fn run(&self, source: &str) -> Preprocessed {
        let mut macros = MacroTable::new();
        let text = self.process(source, &mut macros, 0);
        let text = macros.substitute(&text);
        Preprocessed { text, macros }
    }

    /// Consume directives of one file, sharing `macros` with the includer.
    ///
    /// Macro substitution of ordinary text is left to the caller.
    pub fn process(&self, source: &str, macros: &mut MacroTable, depth: usize) -> String {
        let mut out = String::with_capacity(source.len());
        let mut conditionals = Conditionals::default();

        for line in source.lines() {
            let Some(directive) = Directive::parse(line) else {
                if conditionals.active() {
                    out.push_str(line);
                }
                out.push('\n');
                continue;
            };

            match directive.name {
                "if" => conditionals.open(|| evaluate(&directive.rest, macros)),
                "ifdef" => conditionals.open(|| macros.is_defined(first_word(&directive.rest))),
                "ifndef" => conditionals.open(|| !macros.is_defined(first_word(&directive.rest))),
                "elif" => conditionals.elif(|| evaluate(&directive.rest, macros)),
                "else" => conditionals.otherwise(),
                "endif" => conditionals.close(),
                "define" if conditionals.active() => {
                    macros.define(&directive.rest);
                }
                "undef" if conditionals.active() => macros.undef(first_word(&directive.rest)),
                "include" if conditionals.active() => {
                    if let Some(spliced) = self.include(&directive.rest, macros, depth) {
                        out.push_str(&spliced);
                    }
                }
                _ => {}
            }
            out.push('\n');
        }
        out
    }

    fn include(&self, rest: &str, macros: &mut MacroTable, depth: usize) -> Option<String> {
        let target = IncludeTarget::parse(rest)
            .or_else(|| IncludeTarget::parse(&macros.substitute(rest)))?;

        if depth >= self.max_depth {
            tracing::warn!(
                include = target.path(),
                depth,
                "include nesting limit reached, skipping"
            );
            return None;
        }

        let Some(resolved) = self.resolver.resolve(&target) else {
            tracing::debug!(include = target.path(), "include not found");
            return None;
        };
        tracing::debug!(path = %resolved.path.display(), depth, "splicing include");
        Some(self.process(&resolved.content, macros, depth + 1))
    }
}

fn first_word(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}
