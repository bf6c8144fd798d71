//! Type resolution: from a type node to a `CType`.

use ast_grep_core::Node;

use crate::symbols::{CType, SymbolTable, TypeFilter};

use super::composites::{process_composite, process_enum};
use super::helpers::{find_descendant, normalize_whitespace};

/// Resolve the type named by `node` against the current table.
///
/// Inline struct, union and enum definitions are registered as a side
/// effect. Names that do not resolve to a type become opaque `Simple` types.
pub(super) fn resolve_type<D: ast_grep_core::Doc>(node: &Node<D>, table: &mut SymbolTable) -> CType {
    match node.kind().as_ref() {
        "primitive_type" | "sized_type_specifier" => {
            CType::simple(normalize_whitespace(&node.text()))
        }
        "struct_specifier" | "union_specifier" => process_composite(node, table)
            .unwrap_or_else(|| CType::simple(normalize_whitespace(&node.text()))),
        "enum_specifier" => process_enum(node, table),
        _ => {
            let name = find_descendant(node, "type_identifier")
                .map_or_else(|| node.text().to_string(), |n| n.text().to_string());
            let name = normalize_whitespace(&name);
            table.lookup_type(&name, TypeFilter::Any).unwrap_or_else(|| {
                tracing::debug!(%name, "unresolved type name");
                CType::simple(name)
            })
        }
    }
}
