//! `#if` / `#elif` expression folding.
//!
//! Deliberately small: `defined` tests and object-like macros are expanded,
//! whitespace removed, and the text is folded left to right over `&&` and
//! `||`. Parentheses are dropped, not grouped. An operand is true only when
//! it is literally `1` or `true`.

use super::macros::{MacroTable, ident_end, is_ident_start};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConditionError {
    #[error("empty expression")]
    Empty,
    #[error("operator `{0}` has no right operand")]
    DanglingOperator(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    And,
    Or,
}

impl Op {
    const fn symbol(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

/// Evaluate a conditional expression. Any failure counts as false.
#[must_use]
pub fn evaluate(expr: &str, macros: &MacroTable) -> bool {
    match try_evaluate(expr, macros) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(expr, %err, "condition treated as false");
            false
        }
    }
}

pub fn try_evaluate(expr: &str, macros: &MacroTable) -> Result<bool, ConditionError> {
    let expanded = macros.substitute(&replace_defined(expr, macros));
    let compact: String = expanded.chars().filter(|c| !c.is_whitespace()).collect();
    fold(&compact)
}

/// Replace `defined(X)` and `defined X` with `1` or `0`.
fn replace_defined(expr: &str, macros: &MacroTable) -> String {
    let bytes = expr.as_bytes();
    let mut out = String::with_capacity(expr.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if !is_ident_start(bytes[i]) {
            i += 1;
            continue;
        }
        let end = ident_end(bytes, i);
        if &expr[i..end] != "defined" {
            i = end;
            continue;
        }

        let mut j = skip_spaces(bytes, end);
        let parenthesized = bytes.get(j) == Some(&b'(');
        if parenthesized {
            j = skip_spaces(bytes, j + 1);
        }
        let name_end = ident_end(bytes, j);
        if name_end == j {
            i = end;
            continue;
        }
        let name = &expr[j..name_end];
        let mut after = name_end;
        if parenthesized {
            after = skip_spaces(bytes, after);
            if bytes.get(after) != Some(&b')') {
                i = end;
                continue;
            }
            after += 1;
        }

        out.push_str(&expr[copied..i]);
        out.push_str(if macros.is_defined(name) { "1" } else { "0" });
        copied = after;
        i = after;
    }
    out.push_str(&expr[copied..]);
    out
}

fn skip_spaces(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn fold(compact: &str) -> Result<bool, ConditionError> {
    let mut value: Option<bool> = None;
    let mut pending: Option<Op> = None;
    let mut rest = compact;

    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("&&") {
            pending = Some(Op::And);
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix("||") {
            pending = Some(Op::Or);
            rest = tail;
        } else if let Some(tail) = rest.strip_prefix(['(', ')']) {
            rest = tail;
        } else {
            let end = rest
                .find(|c| c == '(' || c == ')')
                .into_iter()
                .chain(rest.find("&&"))
                .chain(rest.find("||"))
                .min()
                .unwrap_or(rest.len());
            let operand = matches!(&rest[..end], "1" | "true");
            value = Some(match (value, pending.take()) {
                (Some(lhs), Some(Op::And)) => lhs && operand,
                (Some(lhs), Some(Op::Or)) => lhs || operand,
                _ => operand,
            });
            rest = &rest[end..];
        }
    }

    if let Some(op) = pending {
        return Err(ConditionError::DanglingOperator(op.symbol()));
    }
    value.ok_or(ConditionError::Empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table(defs: &[&str]) -> MacroTable {
        let mut macros = MacroTable::new();
        for def in defs {
            macros.define(def);
        }
        macros
    }

    #[rstest]
    #[case("1", true)]
    #[case("0", false)]
    #[case("true", true)]
    #[case("2", false)]
    #[case("defined(FOO)", true)]
    #[case("defined FOO", true)]
    #[case("defined ( FOO )", true)]
    #[case("defined(BAR)", false)]
    #[case("ONE", true)]
    #[case("ZERO", false)]
    #[case("ONE && ZERO", false)]
    #[case("ZERO || ONE", true)]
    #[case("(defined(FOO) && ONE) || ZERO", true)]
    #[case("defined(BAR) || defined(FOO)", true)]
    fn folds_expressions(#[case] expr: &str, #[case] expected: bool) {
        let macros = table(&["FOO", "ONE 1", "ZERO 0"]);
        assert_eq!(evaluate(expr, &macros), expected, "{expr}");
    }

    #[test]
    fn parentheses_do_not_group() {
        // Strict left to right: `1 || (1 && 0)` folds as `(1 || 1) && 0`.
        let macros = MacroTable::new();
        assert!(!evaluate("1 || (1 && 0)", &macros));
        assert!(evaluate("0 && (0 || 1)", &macros));
        assert!(evaluate("0 && 0 || 1", &macros));
    }

    #[test]
    fn failures_are_false() {
        let macros = MacroTable::new();
        assert_eq!(try_evaluate("", &macros), Err(ConditionError::Empty));
        assert_eq!(try_evaluate("()", &macros), Err(ConditionError::Empty));
        assert_eq!(
            try_evaluate("1 &&", &macros),
            Err(ConditionError::DanglingOperator("&&"))
        );
        assert!(!evaluate("1 &&", &macros));
    }

    #[test]
    fn defined_checks_function_like_macros() {
        let macros = table(&["MAX(a, b) a"]);
        assert!(evaluate("defined(MAX)", &macros));
    }
}
