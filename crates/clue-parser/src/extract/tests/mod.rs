use super::*;
use crate::parser::parse_c;
pub(super) use crate::symbols::{CType, Declaration, Member};

mod typedef_enum_tests;

fn extract(source: &str) -> SymbolTable {
    extract_symbols(&parse_c(source))
}

fn names(table: &SymbolTable) -> String {
    table
        .visible()
        .map(|(name, decl)| format!("{name}: {decl:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn find<'a>(table: &'a SymbolTable, name: &str) -> &'a Declaration {
    table.lookup(name).unwrap_or_else(|| {
        panic!(
            "symbol {name:?} not found. Visible symbols:\n{}",
            names(table)
        )
    })
}

/// Type label of a visible variable.
fn variable_type(table: &SymbolTable, name: &str) -> String {
    match find(table, name) {
        Declaration::Variable(v) => v.ty.label(),
        other => panic!("{name:?} is not a variable: {other:?}"),
    }
}

/// Type of a visible variable.
fn variable_ctype(table: &SymbolTable, name: &str) -> CType {
    match find(table, name) {
        Declaration::Variable(v) => v.ty.clone(),
        other => panic!("{name:?} is not a variable: {other:?}"),
    }
}

/// Member names of the struct/union type bound to `tag`.
fn member_names(table: &SymbolTable, tag: &str) -> Vec<String> {
    let ty = find(table, tag)
        .as_type()
        .unwrap_or_else(|| panic!("{tag:?} is not a type"));
    table
        .members_of(&ty)
        .unwrap_or_else(|| panic!("{tag:?} is not a struct or union"))
        .iter()
        .map(|m| m.name().to_string())
        .collect()
}

fn member<'a>(table: &'a SymbolTable, tag: &str, name: &str) -> &'a Member {
    let ty = find(table, tag).as_type().expect("type binding");
    table
        .members_of(&ty)
        .and_then(|members| members.iter().find(|m| m.name() == name))
        .unwrap_or_else(|| panic!("member {name:?} not found in {tag:?}"))
}
