//! Scope-aware declaration extractor.
//!
//! Walks a tree-sitter C tree in document order and populates a
//! [`SymbolTable`]: blocks open and close scopes, declarations register
//! variables and functions, and struct/union/enum/typedef specifiers
//! register types. Constructs missing a required part are skipped.

mod composites;
mod declarations;
mod helpers;
mod types;

use ast_grep_core::Node;

use crate::parser::AstTree;
use crate::symbols::{CType, SymbolTable};

use composites::{process_composite, process_enum, process_type_definition};
use declarations::{
    build_function, enter_function, process_declaration, process_function_definition,
};
use helpers::{block_is_closed, function_declarator_of, is_function_pointer, is_type_kind};
use types::resolve_type;

/// Build a fresh symbol table from a parsed tree.
#[must_use]
pub fn extract_symbols(tree: &AstTree) -> SymbolTable {
    let mut table = SymbolTable::new();
    extract_into(&tree.root(), &mut table);
    table
}

/// Add the declarations under `root` to an existing table.
pub fn extract_into<D: ast_grep_core::Doc>(root: &Node<D>, table: &mut SymbolTable) {
    visit(root, table);
}

// ── Node dispatcher ────────────────────────────────────────────────

fn visit<D: ast_grep_core::Doc>(node: &Node<D>, table: &mut SymbolTable) {
    match node.kind().as_ref() {
        "compound_statement" => {
            table.open_scope();
            visit_children(node, table);
            if block_is_closed(node) {
                table.close_scope();
            }
        }
        "function_definition" => process_function_definition(node, table),
        "declaration" => process_declaration(node, table),
        "struct_specifier" | "union_specifier" => {
            process_composite(node, table);
        }
        "enum_specifier" => {
            process_enum(node, table);
        }
        "type_definition" => process_type_definition(node, table),
        "ERROR" => visit_error(node, table),
        // if/while/for/do/switch have no scope of their own: a declaration
        // in a `for` initializer stays visible after the loop.
        _ => visit_children(node, table),
    }
}

fn visit_children<D: ast_grep_core::Doc>(node: &Node<D>, table: &mut SymbolTable) {
    for child in node.children() {
        visit(&child, table);
    }
}

/// Children of an `ERROR` node.
///
/// A prefix that stops inside a block nested in a function body leaves the
/// function head, its `{` and the inner statements as loose children of an
/// `ERROR` node. A type followed by a function declarator and `{` still
/// defines the function; every unmatched `{` opens a scope that stays open.
fn visit_error<D: ast_grep_core::Doc>(node: &Node<D>, table: &mut SymbolTable) {
    let children: Vec<_> = node.children().collect();
    let mut return_type: Option<CType> = None;
    let mut opened = 0usize;
    let mut idx = 0;
    while idx < children.len() {
        let child = &children[idx];
        let kind = child.kind();
        let opens_body = children
            .get(idx + 1)
            .is_some_and(|next| next.kind().as_ref() == "{");

        if kind == "{" {
            table.open_scope();
            opened += 1;
            return_type = None;
        } else if kind == "}" {
            if opened > 0 && child.text() == "}" {
                table.close_scope();
                opened -= 1;
            }
            return_type = None;
        } else if is_type_kind(&kind) {
            return_type = Some(resolve_type(child, table));
        } else if opens_body
            && let Some(func_decl) = function_declarator_of(child)
            && !is_function_pointer(&func_decl)
        {
            // Without a type this is an old-style implicit `int` function.
            let ret = return_type.take().unwrap_or_else(|| CType::simple("int"));
            let function = build_function(ret, &func_decl, table);
            tracing::debug!(
                line = child.start_pos().line() + 1,
                function = function.as_ref().map(|f| f.name.as_str()),
                "recovered open function definition"
            );
            enter_function(function, table);
            opened += 1;
            // The `{` that follows is the body of this scope.
            idx += 1;
        } else if !matches!(
            kind.as_ref(),
            "storage_class_specifier" | "type_qualifier" | "attribute_specifier"
        ) {
            return_type = None;
            visit(child, table);
        }
        idx += 1;
    }
}

#[cfg(test)]
mod tests;
