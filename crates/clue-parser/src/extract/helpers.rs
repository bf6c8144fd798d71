//! Node navigation helpers for C declarator trees.

use ast_grep_core::Node;

/// Node kinds that carry a declared name.
const NAME_KINDS: &[&str] = &["identifier", "field_identifier", "type_identifier"];

/// Node kinds that can appear in a type position.
const TYPE_KINDS: &[&str] = &[
    "primitive_type",
    "sized_type_specifier",
    "type_identifier",
    "struct_specifier",
    "union_specifier",
    "enum_specifier",
    "macro_type_specifier",
];

/// Whether a node of this kind can stand in a type position.
pub(super) fn is_type_kind(kind: &str) -> bool {
    TYPE_KINDS.contains(&kind)
}

/// Node kinds that can follow the type as a declarator.
const DECLARATOR_KINDS: &[&str] = &[
    "identifier",
    "field_identifier",
    "type_identifier",
    "init_declarator",
    "pointer_declarator",
    "array_declarator",
    "function_declarator",
    "parenthesized_declarator",
    "attributed_declarator",
];

/// First descendant of the given kind, in pre-order.
pub(super) fn find_descendant<'r, D: ast_grep_core::Doc>(
    node: &Node<'r, D>,
    kind: &str,
) -> Option<Node<'r, D>> {
    for child in node.children() {
        if child.kind().as_ref() == kind {
            return Some(child);
        }
        if let Some(found) = find_descendant(&child, kind) {
            return Some(found);
        }
    }
    None
}

/// Declarators of a `declaration`, `field_declaration` or `type_definition`:
/// the declarator-shaped children after the type.
pub(super) fn declarators<'r, D: ast_grep_core::Doc>(node: &Node<'r, D>) -> Vec<Node<'r, D>> {
    let children: Vec<_> = node.children().collect();
    let Some(type_idx) = children
        .iter()
        .position(|c| TYPE_KINDS.contains(&c.kind().as_ref()))
    else {
        return Vec::new();
    };
    children
        .into_iter()
        .skip(type_idx + 1)
        .filter(|c| DECLARATOR_KINDS.contains(&c.kind().as_ref()))
        .collect()
}

/// The name a declarator introduces.
///
/// Walks pointer, array, init and parenthesized wrappers; parameter lists
/// and initializer values are not searched.
pub(super) fn declarator_name<D: ast_grep_core::Doc>(node: &Node<D>) -> Option<String> {
    let kind = node.kind();
    if NAME_KINDS.contains(&kind.as_ref()) {
        return Some(node.text().to_string());
    }
    match kind.as_ref() {
        "parameter_list" | "argument_list" | "initializer_list" => None,
        "init_declarator" | "function_declarator" => {
            node.field("declarator").and_then(|d| declarator_name(&d))
        }
        _ => node.children().find_map(|c| declarator_name(&c)),
    }
}

/// The `function_declarator` a declarator wraps, if any.
///
/// `int *make(void)` and `int (*cb)(int)` both have one; `int *p` does not.
pub(super) fn function_declarator_of<'r, D: ast_grep_core::Doc>(
    node: &Node<'r, D>,
) -> Option<Node<'r, D>> {
    match node.kind().as_ref() {
        "function_declarator" => Some(node.clone()),
        "init_declarator" | "pointer_declarator" | "array_declarator"
        | "attributed_declarator" => node
            .field("declarator")
            .and_then(|d| function_declarator_of(&d)),
        _ => None,
    }
}

/// True for `(*name)(...)`: the function declarator names a pointer, not a
/// function.
pub(super) fn is_function_pointer<D: ast_grep_core::Doc>(func_decl: &Node<D>) -> bool {
    func_decl
        .field("declarator")
        .is_some_and(|d| d.kind().as_ref() == "parenthesized_declarator")
}

/// Whether a `compound_statement` ends with a real closing brace.
///
/// A document prefix that stops inside a block yields a body whose `}` is
/// missing; such a scope stays open so its declarations remain visible.
pub(super) fn block_is_closed<D: ast_grep_core::Doc>(node: &Node<D>) -> bool {
    node.children()
        .last()
        .is_some_and(|c| c.kind().as_ref() == "}" && c.text() == "}")
}

/// Collapse runs of whitespace, e.g. `unsigned   long` -> `unsigned long`.
pub(super) fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
