//! Scoped symbol table with explicit scope frames.
//!
//! Each name maps to a stack of declarations; the top shadows the rest.
//! A scope frame records the keys pushed while it was open, so closing it
//! removes exactly those entries, newest first. Additions made with no frame
//! open are permanent.

use std::collections::BTreeMap;

use super::declaration::{
    CType, Composite, CompositeId, CompositeKind, Declaration, Function, Member,
};

/// Primitive types seeded into every table; they are never removed.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "void",
    "char",
    "unsigned char",
    "short",
    "unsigned short",
    "int",
    "unsigned int",
    "long",
    "unsigned long",
    "long long",
    "unsigned long long",
    "float",
    "double",
    "long double",
];

/// Which type bindings `lookup_type` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    /// `struct NAME` tag.
    Struct,
    /// `union NAME` tag.
    Union,
    /// Plain type name: struct/union tags, typedefs, enums, simple types.
    Any,
}

#[derive(Debug, Default)]
struct ScopeFrame {
    keys: Vec<String>,
}

#[derive(Debug)]
pub struct SymbolTable {
    bindings: BTreeMap<String, Vec<Declaration>>,
    frames: Vec<ScopeFrame>,
    composites: Vec<Composite>,
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTable {
    #[must_use]
    pub fn new() -> Self {
        let mut table = Self {
            bindings: BTreeMap::new(),
            frames: Vec::new(),
            composites: Vec::new(),
        };
        for name in PRIMITIVE_TYPES {
            table.add_identifier(Declaration::Type(CType::simple(*name)));
        }
        table
    }

    pub fn open_scope(&mut self) {
        self.frames.push(ScopeFrame::default());
        tracing::trace!(depth = self.frames.len(), "open scope");
    }

    /// Pop the innermost frame and undo its additions in reverse order.
    pub fn close_scope(&mut self) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        tracing::trace!(
            depth = self.frames.len() + 1,
            removed = frame.keys.len(),
            "close scope"
        );
        for key in frame.keys.iter().rev() {
            if let Some(stack) = self.bindings.get_mut(key) {
                stack.pop();
                if stack.is_empty() {
                    self.bindings.remove(key);
                }
            }
        }
    }

    pub fn add_identifier(&mut self, decl: Declaration) {
        let key = decl.name().to_string();
        if let Some(frame) = self.frames.last_mut() {
            frame.keys.push(key.clone());
        }
        self.bindings.entry(key).or_default().push(decl);
    }

    /// Top of the name's stack.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Declaration> {
        self.bindings.get(name).and_then(|stack| stack.last())
    }

    /// Most recent binding of `name` usable as a type under `filter`.
    #[must_use]
    pub fn lookup_type(&self, name: &str, filter: TypeFilter) -> Option<CType> {
        let stack = self.bindings.get(name)?;
        stack.iter().rev().find_map(|decl| match (filter, decl) {
            (TypeFilter::Struct, Declaration::Type(ty @ CType::Struct { .. }))
            | (TypeFilter::Union, Declaration::Type(ty @ CType::Union { .. })) => {
                Some(ty.clone())
            }
            (TypeFilter::Any, decl) => decl.as_type(),
            _ => None,
        })
    }

    /// Whether `name` was bound in the innermost open scope, or anywhere
    /// at file scope when no scope is open.
    #[must_use]
    pub fn bound_in_current_scope(&self, name: &str) -> bool {
        match self.frames.last() {
            Some(frame) => frame.keys.iter().any(|key| key == name),
            None => self.bindings.contains_key(name),
        }
    }

    /// Number of open scopes.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Every visible name with its top declaration, in name order.
    pub fn visible(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.bindings
            .iter()
            .filter_map(|(name, stack)| stack.last().map(|decl| (name.as_str(), decl)))
    }

    /// Allocate a composite body and return the type referring to it.
    ///
    /// Does not bind the tag; callers decide whether to `add_identifier`.
    pub fn define_composite(
        &mut self,
        kind: CompositeKind,
        name: Option<String>,
        members: Vec<Member>,
        complete: bool,
    ) -> CType {
        let id = CompositeId(self.composites.len());
        self.composites.push(Composite {
            kind,
            name: name.clone(),
            members,
            complete,
        });
        match kind {
            CompositeKind::Struct => CType::Struct { id, name },
            CompositeKind::Union => CType::Union { id, name },
        }
    }

    #[must_use]
    pub fn composite(&self, id: CompositeId) -> Option<&Composite> {
        self.composites.get(id.0)
    }

    pub fn composite_mut(&mut self, id: CompositeId) -> Option<&mut Composite> {
        self.composites.get_mut(id.0)
    }

    /// Members of the composite behind `ty`, if it is a struct or union.
    #[must_use]
    pub fn members_of(&self, ty: &CType) -> Option<&[Member]> {
        ty.composite_id()
            .and_then(|id| self.composite(id))
            .map(|c| c.members.as_slice())
    }

    /// Attach `function` as a method of the composite. A method of the same
    /// name (an earlier prototype) is replaced. Returns false if `id` is
    /// unknown.
    pub fn attach_method(&mut self, id: CompositeId, function: Function) -> bool {
        let Some(composite) = self.composite_mut(id) else {
            return false;
        };
        let existing = composite
            .members
            .iter_mut()
            .find(|m| matches!(m, Member::Method(f) if f.name == function.name));
        match existing {
            Some(slot) => *slot = Member::Method(function),
            None => composite.members.push(Member::Method(function)),
        }
        true
    }
}
