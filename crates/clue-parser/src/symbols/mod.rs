//! Symbol model and scoped symbol table.

mod declaration;
mod table;

pub use declaration::{
    CType, Composite, CompositeId, CompositeKind, Declaration, Function, Member, Param, Variable,
};
pub use table::{PRIMITIVE_TYPES, SymbolTable, TypeFilter};
