//! Struct, union, enum and typedef processing.

use ast_grep_core::Node;

use crate::symbols::{
    CType, CompositeKind, Declaration, Function, Member, SymbolTable, TypeFilter, Variable,
};

use super::declarations::{function_pointer_type, parameters};
use super::helpers::{declarator_name, declarators, function_declarator_of, is_function_pointer};
use super::types::resolve_type;

// ── Structs and unions ─────────────────────────────────────────────

/// Process a `struct_specifier` or `union_specifier`.
///
/// - `struct P { ... }`: builds the body; an incomplete `P` declared in
///   the same scope is completed in place, otherwise a new composite is
///   bound to `P`, shadowing any outer one.
/// - `struct { ... }`: anonymous, referenced by id only.
/// - `struct P` / `struct P;`: the visible `P`, or a fresh incomplete one.
///
/// Returns `None` for a specifier with neither tag nor body.
pub(super) fn process_composite<D: ast_grep_core::Doc>(
    node: &Node<D>,
    table: &mut SymbolTable,
) -> Option<CType> {
    let (kind, filter) = match node.kind().as_ref() {
        "union_specifier" => (CompositeKind::Union, TypeFilter::Union),
        _ => (CompositeKind::Struct, TypeFilter::Struct),
    };
    let name = node.field("name").map(|n| n.text().to_string());

    let Some(body) = node.field("body") else {
        let name = name?;
        if let Some(existing) = table.lookup_type(&name, filter) {
            return Some(existing);
        }
        tracing::trace!(%name, "forward {}", kind.keyword());
        let ty = table.define_composite(kind, Some(name), Vec::new(), false);
        table.add_identifier(Declaration::Type(ty.clone()));
        return Some(ty);
    };

    let members = build_members(&body, table);

    if let Some(name) = &name
        && let Some(existing) = table.lookup_type(name, filter)
        && table.bound_in_current_scope(name)
        && let Some(id) = existing.composite_id()
        && let Some(composite) = table.composite_mut(id)
        && !composite.complete
    {
        // Methods attached through the forward declaration survive.
        let methods = std::mem::take(&mut composite.members)
            .into_iter()
            .filter(|m| matches!(m, Member::Method(_)));
        composite.members = members.into_iter().chain(methods).collect();
        composite.complete = true;
        return Some(existing);
    }

    let ty = table.define_composite(kind, name.clone(), members, true);
    if name.is_some() {
        table.add_identifier(Declaration::Type(ty.clone()));
    }
    Some(ty)
}

/// Members from the direct `field_declaration`s of a body.
fn build_members<D: ast_grep_core::Doc>(body: &Node<D>, table: &mut SymbolTable) -> Vec<Member> {
    let mut members = Vec::new();
    for field in body.children() {
        if field.kind().as_ref() != "field_declaration" {
            continue;
        }
        let Some(type_node) = field.field("type") else {
            continue;
        };
        let ty = resolve_type(&type_node, table);
        let field_declarators = declarators(&field);

        // `struct { union { int a; float b; }; };` exposes a and b directly.
        if field_declarators.is_empty() {
            if ty.composite_kind().is_some()
                && ty.name().is_empty()
                && let Some(inner) = table.members_of(&ty)
            {
                members.extend(inner.iter().cloned());
            }
            continue;
        }

        for declarator in &field_declarators {
            let Some(name) = declarator_name(declarator) else {
                continue;
            };
            match function_declarator_of(declarator) {
                Some(func_decl) => {
                    members.push(Member::Function(Function {
                        name,
                        return_type: ty.clone(),
                        params: parameters(&func_decl, table),
                    }));
                }
                None => members.push(Member::Variable(Variable {
                    name,
                    ty: ty.clone(),
                })),
            }
        }
    }
    members
}

// ── Enums ──────────────────────────────────────────────────────────

/// Process an `enum_specifier`, returning the type it denotes.
///
/// A body registers the enum (when named) and each enumerator as a
/// variable of the enum type.
pub(super) fn process_enum<D: ast_grep_core::Doc>(node: &Node<D>, table: &mut SymbolTable) -> CType {
    let name = node.field("name").map(|n| n.text().to_string());
    let ty = name
        .as_ref()
        .map_or_else(|| CType::simple("int"), |n| CType::simple(format!("enum {n}")));

    let Some(body) = node.field("body") else {
        return ty;
    };
    if let Some(name) = name {
        table.add_identifier(Declaration::Enum { name });
    }
    for enumerator in body.children() {
        if enumerator.kind().as_ref() != "enumerator" {
            continue;
        }
        if let Some(constant) = enumerator.field("name") {
            table.add_identifier(Declaration::Variable(Variable {
                name: constant.text().to_string(),
                ty: ty.clone(),
            }));
        }
    }
    ty
}

// ── Typedefs ───────────────────────────────────────────────────────

/// `typedef T A, *PA, (*FA)(int);` binds each alias to the resolved target.
///
/// Pointer levels are not tracked, so `PA` aliases `T` itself; function
/// pointer aliases get a `ret (*)(params)` label.
pub(super) fn process_type_definition<D: ast_grep_core::Doc>(
    node: &Node<D>,
    table: &mut SymbolTable,
) {
    let Some(type_node) = node.field("type") else {
        return;
    };
    let target = resolve_type(&type_node, table);

    for declarator in declarators(node) {
        let Some(name) = declarator_name(&declarator) else {
            continue;
        };
        let target = match function_declarator_of(&declarator) {
            Some(func_decl) if is_function_pointer(&func_decl) => {
                function_pointer_type(&target, &func_decl, table)
            }
            _ => target.clone(),
        };
        table.add_identifier(Declaration::Typedef { name, target });
    }
}
