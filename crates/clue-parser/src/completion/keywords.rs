//! Fixed keyword, snippet and directive tables.

use clue_core::{CompletionItem, CompletionKind};

pub const KEYWORDS: &[&str] = &[
    "if", "while", "for", "else", "case", "switch", "typedef", "struct", "union", "volatile",
    "const", "return", "do", "continue", "break", "sizeof", "static", "enum",
];

/// Keywords that expand to a snippet instead of the bare word.
const SNIPPETS: &[(&str, &str, &str)] = &[(
    "for",
    "Insert a for loop",
    "for (int ${1:i} = 0; ${1:i} < ${2:n}; ++${1:i}) {\n\t$0\n}",
)];

pub const DIRECTIVES: &[&str] = &[
    "include", "define", "pragma", "ifdef", "ifndef", "if", "elif", "else", "endif",
];

#[must_use]
pub fn keyword_items() -> Vec<CompletionItem> {
    KEYWORDS
        .iter()
        .map(|keyword| {
            SNIPPETS.iter().find(|(label, ..)| label == keyword).map_or_else(
                || CompletionItem::new(*keyword, CompletionKind::Keyword),
                |(label, detail, body)| {
                    CompletionItem::new(*label, CompletionKind::Snippet)
                        .with_detail(*detail)
                        .with_insert_text(*body)
                },
            )
        })
        .collect()
}

#[must_use]
pub fn directive_items() -> Vec<CompletionItem> {
    DIRECTIVES
        .iter()
        .map(|d| CompletionItem::new(*d, CompletionKind::Keyword).with_insert_text(*d))
        .collect()
}
