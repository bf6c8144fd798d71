//! Member chain resolution for `a.b.` / `p->q.` completion.

use clue_core::{CompletionItem, CompletionKind, ReplaceSpan};

use crate::symbols::{CType, Declaration, Member, SymbolTable};

/// An access chain immediately before the cursor, e.g. `scene.origin.x`
/// where `x` is still being typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberChain {
    /// Identifiers before the final separator: `["scene", "origin"]`.
    pub segments: Vec<String>,
    /// Partially typed member name after the final separator.
    pub typed: String,
    /// Byte offset where the chain starts.
    pub start: usize,
    /// Byte offset of the final `.` or `->`.
    pub separator: usize,
    /// Byte offset of the cursor (end of the prefix).
    pub cursor: usize,
}

impl MemberChain {
    /// Recognize `ident((.|->)ident)*(.|->)ident?` at the end of `prefix`.
    #[must_use]
    pub fn parse(prefix: &str) -> Option<Self> {
        let bytes = prefix.as_bytes();
        let typed_start = ident_start_before(bytes, bytes.len());
        let mut end = separator_before(bytes, typed_start)?;
        let separator = end;

        let mut segments = Vec::new();
        let start = loop {
            let seg_start = ident_start_before(bytes, end);
            if seg_start == end || bytes[seg_start].is_ascii_digit() {
                return None;
            }
            segments.push(prefix[seg_start..end].to_string());
            match separator_before(bytes, seg_start) {
                Some(prev) => end = prev,
                None => break seg_start,
            }
        };
        segments.reverse();

        Some(Self {
            segments,
            typed: prefix[typed_start..].to_string(),
            start,
            separator,
            cursor: prefix.len(),
        })
    }

    /// The chain text as written, without the final separator.
    #[must_use]
    pub fn text<'a>(&self, prefix: &'a str) -> &'a str {
        &prefix[self.start..self.separator]
    }

    /// Member candidates for the chain, empty when any step fails.
    ///
    /// The head must be a variable; every intermediate segment must be a
    /// field of a struct or union. Methods are inserted as calls with the
    /// chain as first argument, replacing the chain and separator.
    #[must_use]
    pub fn complete(&self, prefix: &str, table: &SymbolTable) -> Vec<CompletionItem> {
        let Some(ty) = self.resolve(table) else {
            return Vec::new();
        };
        let Some(members) = table.members_of(&ty) else {
            tracing::debug!(ty = %ty.label(), "chain ends at a non-composite type");
            return Vec::new();
        };

        let chain = self.text(prefix);
        let span = ReplaceSpan::new(self.start, self.cursor);
        members
            .iter()
            .map(|member| match member {
                Member::Variable(v) => {
                    CompletionItem::new(&v.name, CompletionKind::Field).with_detail(v.ty.label())
                }
                Member::Function(f) => {
                    CompletionItem::new(&f.name, CompletionKind::Function).with_detail(f.signature())
                }
                Member::Method(f) => {
                    let insert = if f.params.len() > 1 {
                        format!("{}({chain}, $0)", f.name)
                    } else {
                        format!("{}({chain}$0)", f.name)
                    };
                    CompletionItem::new(&f.name, CompletionKind::Method)
                        .with_detail(f.signature())
                        .with_insert_text(insert)
                        .with_replace_span(span)
                }
            })
            .collect()
    }

    /// Type reached by following every segment.
    fn resolve(&self, table: &SymbolTable) -> Option<CType> {
        let (head, rest) = self.segments.split_first()?;
        let Some(Declaration::Variable(variable)) = table.lookup(head) else {
            tracing::debug!(%head, "chain head is not a variable");
            return None;
        };

        let mut ty = variable.ty.clone();
        for segment in rest {
            let member = table
                .members_of(&ty)?
                .iter()
                .find(|m| m.name() == segment);
            match member {
                Some(Member::Variable(field)) => ty = field.ty.clone(),
                _ => {
                    tracing::debug!(%segment, "chain segment is not a field");
                    return None;
                }
            }
        }
        Some(ty)
    }
}

/// Start of the identifier run ending at `end`.
fn ident_start_before(bytes: &[u8], end: usize) -> usize {
    let mut start = end;
    while start > 0 && (bytes[start - 1].is_ascii_alphanumeric() || bytes[start - 1] == b'_') {
        start -= 1;
    }
    start
}

/// Offset of a `.` or `->` ending at `end`.
fn separator_before(bytes: &[u8], end: usize) -> Option<usize> {
    let before = &bytes[..end];
    if before.ends_with(b"->") {
        Some(end - 2)
    } else if before.ends_with(b".") {
        Some(end - 1)
    } else {
        None
    }
}
