//! Macro definitions and textual object-like substitution.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Macro {
    /// `#define NAME tokens...`
    Object(String),
    /// `#define NAME(a, b) body`. Recorded so `defined()` sees it; never expanded.
    Function { params: Vec<String>, body: String },
}

/// Name to macro mapping for one preprocessing pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroTable {
    macros: BTreeMap<String, Macro>,
}

impl MacroTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a definition from the text following `#define`.
    ///
    /// Tokens of an object-like body that name an already defined object-like
    /// macro are replaced by its value. Returns the defined name, or `None`
    /// when the directive has no name.
    pub fn define(&mut self, rest: &str) -> Option<String> {
        let rest = rest.trim_start();
        let name_end = ident_end(rest.as_bytes(), 0);
        if name_end == 0 || !is_ident_start(rest.as_bytes()[0]) {
            return None;
        }
        let name = rest[..name_end].to_string();
        let tail = &rest[name_end..];

        let definition = if let Some(params) = tail.strip_prefix('(') {
            let (params, body) = params.split_once(')').unwrap_or((params, ""));
            Macro::Function {
                params: params
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect(),
                body: body.trim().to_string(),
            }
        } else {
            let body = tail
                .split_whitespace()
                .map(|token| self.value(token).unwrap_or(token))
                .collect::<Vec<_>>()
                .join(" ");
            Macro::Object(body)
        };

        tracing::trace!(%name, "define");
        self.macros.insert(name.clone(), definition);
        Some(name)
    }

    pub fn undef(&mut self, name: &str) {
        self.macros.remove(name);
    }

    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Macro> {
        self.macros.get(name)
    }

    /// Replacement text of an object-like macro.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        match self.macros.get(name)? {
            Macro::Object(value) => Some(value),
            Macro::Function { .. } => None,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.macros.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Macro)> {
        self.macros.iter().map(|(name, m)| (name.as_str(), m))
    }

    /// The object-like part of the table as a plain name to value mapping.
    #[must_use]
    pub fn object_like(&self) -> BTreeMap<String, String> {
        self.macros
            .iter()
            .filter_map(|(name, m)| match m {
                Macro::Object(value) => Some((name.clone(), value.clone())),
                Macro::Function { .. } => None,
            })
            .collect()
    }

    /// Replace every free-standing identifier that names an object-like
    /// macro. String and character literals, comments and numeric literals
    /// are copied untouched. Replacement text is not rescanned.
    #[must_use]
    pub fn substitute(&self, text: &str) -> String {
        if !self.macros.values().any(|m| matches!(m, Macro::Object(_))) {
            return text.to_string();
        }

        let bytes = text.as_bytes();
        let mut out = String::with_capacity(text.len());
        let mut copied = 0;
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                quote @ (b'"' | b'\'') => i = skip_quoted(bytes, i, quote),
                b'/' if bytes.get(i + 1) == Some(&b'/') => i = skip_line(bytes, i),
                b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i),
                b if is_ident_start(b) => {
                    let end = ident_end(bytes, i);
                    if let Some(value) = self.value(&text[i..end]) {
                        out.push_str(&text[copied..i]);
                        out.push_str(value);
                        copied = end;
                    }
                    i = end;
                }
                b if b.is_ascii_digit() => i = ident_end(bytes, i),
                _ => i += 1,
            }
        }
        out.push_str(&text[copied..]);
        out
    }
}

pub(crate) const fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

pub(crate) const fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// End of the identifier-like run starting at `start`.
pub(crate) fn ident_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && is_ident_byte(bytes[end]) {
        end += 1;
    }
    end
}

/// Index just past the closing quote; an unterminated literal stops at the
/// end of its line.
pub(crate) fn skip_quoted(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

fn skip_line(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len(), |p| start + p)
}

fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start + 2..]
        .windows(2)
        .position(|w| w == b"*/")
        .map_or(bytes.len(), |p| start + 2 + p + 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn object_macro_is_recorded_and_substituted() {
        let mut macros = MacroTable::new();
        assert_eq!(macros.define(" N 5").as_deref(), Some("N"));
        assert_eq!(
            macros.object_like(),
            BTreeMap::from([("N".to_string(), "5".to_string())])
        );
        assert_eq!(macros.substitute("int a[N];"), "int a[5];");
    }

    #[test]
    fn body_tokens_expand_earlier_macros() {
        let mut macros = MacroTable::new();
        macros.define("WIDTH 80");
        macros.define("AREA WIDTH * WIDTH");
        assert_eq!(macros.value("AREA"), Some("80 * 80"));
    }

    #[test]
    fn redefinition_replaces_and_undef_removes() {
        let mut macros = MacroTable::new();
        macros.define("X 1");
        macros.define("X 2");
        assert_eq!(macros.value("X"), Some("2"));
        macros.undef("X");
        assert!(!macros.is_defined("X"));
        assert_eq!(macros.substitute("X"), "X");
    }

    #[test]
    fn empty_definition_is_defined() {
        let mut macros = MacroTable::new();
        macros.define("GUARD_H");
        assert!(macros.is_defined("GUARD_H"));
        assert_eq!(macros.value("GUARD_H"), Some(""));
    }

    #[test]
    fn function_like_macros_are_not_expanded() {
        let mut macros = MacroTable::new();
        macros.define("MAX(a, b) ((a) > (b) ? (a) : (b))");
        assert!(macros.is_defined("MAX"));
        assert_eq!(
            macros.get("MAX"),
            Some(&Macro::Function {
                params: vec!["a".into(), "b".into()],
                body: "((a) > (b) ? (a) : (b))".into(),
            })
        );
        assert_eq!(macros.substitute("MAX(1, 2)"), "MAX(1, 2)");
        assert!(macros.object_like().is_empty());
    }

    #[test]
    fn substitution_respects_word_boundaries() {
        let mut macros = MacroTable::new();
        macros.define("N 5");
        assert_eq!(macros.substitute("N NN N_1 _N N;"), "5 NN N_1 _N 5;");
    }

    #[test]
    fn literals_and_comments_are_untouched() {
        let mut macros = MacroTable::new();
        macros.define("N 5");
        let text = "char *s = \"N \\\" N\"; char c = 'N'; // N\n/* N */ int x = N; 0xN1;";
        assert_eq!(
            macros.substitute(text),
            "char *s = \"N \\\" N\"; char c = 'N'; // N\n/* N */ int x = 5; 0xN1;"
        );
    }

    #[test]
    fn missing_name_is_ignored() {
        let mut macros = MacroTable::new();
        assert_eq!(macros.define("   "), None);
        assert_eq!(macros.define("1abc 2"), None);
        assert!(macros.is_empty());
    }
}
