//! Declaration model: the closed set of things a C name can be bound to.

use serde::Serialize;

/// Index of a struct/union body in the symbol table's composite arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CompositeId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeKind {
    Struct,
    Union,
}

impl CompositeKind {
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Struct => "struct",
            Self::Union => "union",
        }
    }
}

/// A resolved C type.
///
/// Composite types carry their tag so labels can be rendered without the
/// table; their members live in the arena behind `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CType {
    /// Primitive or opaque named type; completable by label only.
    Simple { name: String },
    Struct { id: CompositeId, name: Option<String> },
    Union { id: CompositeId, name: Option<String> },
}

impl CType {
    #[must_use]
    pub fn simple(name: impl Into<String>) -> Self {
        Self::Simple { name: name.into() }
    }

    #[must_use]
    pub const fn composite_id(&self) -> Option<CompositeId> {
        match self {
            Self::Simple { .. } => None,
            Self::Struct { id, .. } | Self::Union { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub const fn composite_kind(&self) -> Option<CompositeKind> {
        match self {
            Self::Simple { .. } => None,
            Self::Struct { .. } => Some(CompositeKind::Struct),
            Self::Union { .. } => Some(CompositeKind::Union),
        }
    }

    /// Name used as the table key: the type name or the tag.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Simple { name } => name,
            Self::Struct { name, .. } | Self::Union { name, .. } => name.as_deref().unwrap_or(""),
        }
    }

    /// Human readable type, e.g. `int`, `struct Point`, `union (anonymous)`.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Simple { name } => name.clone(),
            Self::Struct { name, .. } | Self::Union { name, .. } => {
                let keyword = self.composite_kind().map_or("", CompositeKind::keyword);
                format!("{keyword} {}", name.as_deref().unwrap_or("(anonymous)"))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variable {
    pub name: String,
    pub ty: CType,
}

/// A function parameter. Unnamed prototype parameters keep an empty name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: CType,
}

impl Param {
    fn render(&self) -> String {
        if self.name.is_empty() {
            self.ty.label()
        } else {
            format!("{} {}", self.ty.label(), self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub return_type: CType,
    pub params: Vec<Param>,
}

impl Function {
    /// Render as `ret(type name, ...)`.
    #[must_use]
    pub fn signature(&self) -> String {
        let params = self.params.iter().map(Param::render).collect::<Vec<_>>();
        format!("{}({})", self.return_type.label(), params.join(", "))
    }
}

/// An entry of a struct/union member list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Member {
    Variable(Variable),
    Function(Function),
    /// A free function whose first parameter is this struct.
    Method(Function),
}

impl Member {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable(v) => &v.name,
            Self::Function(f) | Self::Method(f) => &f.name,
        }
    }
}

/// Body of a struct or union.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Composite {
    pub kind: CompositeKind,
    pub name: Option<String>,
    pub members: Vec<Member>,
    /// False for a body-less forward declaration (`struct P;`).
    pub complete: bool,
}

impl Composite {
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.name() == name)
    }
}

/// Something a name can be bound to in the symbol table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Declaration {
    Variable(Variable),
    Function(Function),
    Type(CType),
    Typedef { name: String, target: CType },
    Enum { name: String },
}

impl Declaration {
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Variable(v) => &v.name,
            Self::Function(f) => &f.name,
            Self::Type(ty) => ty.name(),
            Self::Typedef { name, .. } | Self::Enum { name } => name,
        }
    }

    /// The type this binding denotes when used as a type name.
    #[must_use]
    pub fn as_type(&self) -> Option<CType> {
        match self {
            Self::Type(ty) => Some(ty.clone()),
            Self::Typedef { target, .. } => Some(target.clone()),
            Self::Enum { name } => Some(CType::simple(format!("enum {name}"))),
            Self::Variable(_) | Self::Function(_) => None,
        }
    }
}
