//! Function definitions, prototypes and variable declarations.

use ast_grep_core::Node;

use crate::symbols::{CType, CompositeKind, Declaration, Function, Param, SymbolTable, Variable};

use super::helpers::{
    block_is_closed, declarator_name, declarators, function_declarator_of, is_function_pointer,
};
use super::types::resolve_type;
use super::visit;

// ── Function definition processing ────────────────────────────────

/// `ret name(params) { body }`
///
/// The function is registered in the enclosing scope before its body is
/// visited, so recursion and later code see it. Parameters are visible as
/// variables inside the body scope.
pub(super) fn process_function_definition<D: ast_grep_core::Doc>(
    node: &Node<D>,
    table: &mut SymbolTable,
) {
    let function = node.field("type").and_then(|type_node| {
        let return_type = resolve_type(&type_node, table);
        let func_decl = node
            .field("declarator")
            .and_then(|d| function_declarator_of(&d))?;
        build_function(return_type, &func_decl, table)
    });

    if function.is_none() {
        tracing::debug!(
            line = node.start_pos().line() + 1,
            "function definition without name or type"
        );
    }
    enter_function(function, table);

    let body = node.field("body");
    if let Some(body) = &body {
        for child in body.children() {
            visit(&child, table);
        }
    }
    if body.as_ref().is_none_or(block_is_closed) {
        table.close_scope();
    }
}

/// Register `function` in the enclosing scope, then open its body scope
/// with the named parameters bound. The caller closes the scope.
pub(super) fn enter_function(function: Option<Function>, table: &mut SymbolTable) {
    if let Some(function) = &function {
        register_function(function.clone(), table);
    }
    table.open_scope();
    for param in function.iter().flat_map(|f| &f.params) {
        if !param.name.is_empty() {
            table.add_identifier(Declaration::Variable(Variable {
                name: param.name.clone(),
                ty: param.ty.clone(),
            }));
        }
    }
}

/// Register a function and, when its first parameter is a struct, attach
/// it to that struct as a method.
fn register_function(function: Function, table: &mut SymbolTable) {
    if let Some(first) = function.params.first()
        && first.ty.composite_kind() == Some(CompositeKind::Struct)
        && let Some(id) = first.ty.composite_id()
    {
        table.attach_method(id, function.clone());
    }
    table.add_identifier(Declaration::Function(function));
}

pub(super) fn build_function<D: ast_grep_core::Doc>(
    return_type: CType,
    func_decl: &Node<D>,
    table: &mut SymbolTable,
) -> Option<Function> {
    let name = func_decl
        .field("declarator")
        .and_then(|d| declarator_name(&d))?;
    Some(Function {
        name,
        return_type,
        params: parameters(func_decl, table),
    })
}

/// Ordered parameters of a `function_declarator`.
///
/// Unnamed parameters keep an empty name; `(void)` means no parameters and
/// `...` is not represented.
pub(super) fn parameters<D: ast_grep_core::Doc>(
    func_decl: &Node<D>,
    table: &mut SymbolTable,
) -> Vec<Param> {
    let Some(list) = func_decl.field("parameters") else {
        return Vec::new();
    };

    let mut params = Vec::new();
    for param in list.children() {
        if param.kind().as_ref() != "parameter_declaration" {
            continue;
        }
        let Some(type_node) = param.field("type") else {
            continue;
        };
        let mut ty = resolve_type(&type_node, table);
        let declarator = param.field("declarator");
        let name = declarator
            .as_ref()
            .and_then(declarator_name)
            .unwrap_or_default();
        if let Some(func_decl) = declarator.as_ref().and_then(function_declarator_of)
            && is_function_pointer(&func_decl)
        {
            ty = function_pointer_type(&ty, &func_decl, table);
        }
        params.push(Param { name, ty });
    }

    if let [only] = params.as_slice()
        && only.name.is_empty()
        && only.ty == CType::simple("void")
    {
        params.clear();
    }
    params
}

/// `ret (*)(types)` label for a function pointer declarator.
pub(super) fn function_pointer_type<D: ast_grep_core::Doc>(
    return_type: &CType,
    func_decl: &Node<D>,
    table: &mut SymbolTable,
) -> CType {
    let params = parameters(func_decl, table)
        .iter()
        .map(|p| p.ty.label())
        .collect::<Vec<_>>();
    CType::simple(format!(
        "{} (*)({})",
        return_type.label(),
        params.join(", ")
    ))
}

// ── Declaration processing (variables, prototypes, function pointers) ──

/// `T a, *b, c[3], f(int), (*cb)(void);`
///
/// The type is resolved once (registering inline composites), then each
/// declarator registers a variable or a function.
pub(super) fn process_declaration<D: ast_grep_core::Doc>(node: &Node<D>, table: &mut SymbolTable) {
    let Some(type_node) = node.field("type") else {
        return;
    };
    let ty = resolve_type(&type_node, table);

    for declarator in declarators(node) {
        match function_declarator_of(&declarator) {
            Some(func_decl) if is_function_pointer(&func_decl) => {
                if let Some(name) = declarator_name(&declarator) {
                    let ty = function_pointer_type(&ty, &func_decl, table);
                    table.add_identifier(Declaration::Variable(Variable { name, ty }));
                }
            }
            Some(func_decl) => {
                if let Some(function) = build_function(ty.clone(), &func_decl, table) {
                    register_function(function, table);
                }
            }
            None => {
                if let Some(name) = declarator_name(&declarator) {
                    table.add_identifier(Declaration::Variable(Variable {
                        name,
                        ty: ty.clone(),
                    }));
                }
            }
        }
    }
}
