//! The model graph's data types: models, type expressions, method kinds.

use indexmap::IndexMap;
use smol_str::SmolStr;
use text_size::TextRange;

use super::ids::{ModelId, Placeholder};

/// How an action or view entry is declared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MethodKind {
    AccessorGet,
    AccessorSet,
    PlainMethod,
    AsyncMethod,
}

impl MethodKind {
    /// Whether the entry is a `get`/`set` accessor.
    pub fn is_accessor(self) -> bool {
        matches!(self, Self::AccessorGet | Self::AccessorSet)
    }
}

/// The constructor at the root of a [`TypeExpr`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    // Leaves
    String,
    Number,
    Integer,
    Boolean,
    Date,
    Null,
    Undefined,
    /// Wildcard for anything not understood.
    Opaque,
    /// A symbolic type name (custom display names, unresolved identifiers).
    Named(SmolStr),

    // Wrappers
    Array,
    Map,
    Optional,
    Maybe,
    MaybeNull,
    Reference,
    SafeReference,
    Refinement,
    Custom,
    Late,
    Frozen,
    Literal,
    Enumeration,
    Union,
    ComposedAsType,

    /// A registered model.
    Model(ModelId),
}

/// A type constructor applied to zero or more child types.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeExpr {
    pub kind: TypeKind,
    pub children: Vec<TypeExpr>,
}

impl TypeExpr {
    pub fn leaf(kind: TypeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn wrap(kind: TypeKind, child: TypeExpr) -> Self {
        Self {
            kind,
            children: vec![child],
        }
    }

    pub fn opaque() -> Self {
        Self::leaf(TypeKind::Opaque)
    }

    pub fn model(id: ModelId) -> Self {
        Self::leaf(TypeKind::Model(id))
    }

    pub fn named(name: impl Into<SmolStr>) -> Self {
        Self::leaf(TypeKind::Named(name.into()))
    }

    /// The single tracked child of a wrapper.
    pub fn child(&self) -> Option<&TypeExpr> {
        self.children.first()
    }
}

/// A composition parent.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Base {
    Model(ModelId),
    /// A base not declared in the analysed text, kept by name.
    Symbol(SmolStr),
}

/// A declared record type.
#[derive(Clone, Debug)]
pub struct Model {
    pub id: ModelId,
    /// Declared name; `None` marks the model anonymous.
    pub name: Option<SmolStr>,
    /// Variable the declaration is bound to, if any.
    pub binding: Option<SmolStr>,
    pub placeholder: Placeholder,
    pub properties: IndexMap<SmolStr, TypeExpr>,
    pub actions: IndexMap<SmolStr, MethodKind>,
    pub views: IndexMap<SmolStr, MethodKind>,
    pub bases: Vec<Base>,
    /// Set once another construct points at this model; never reverts.
    pub referenced: bool,
    /// Range of the whole logical declaration.
    pub range: TextRange,
}

impl Model {
    pub fn new(id: ModelId, placeholder: Placeholder, range: TextRange) -> Self {
        Self {
            id,
            name: None,
            binding: None,
            placeholder,
            properties: IndexMap::new(),
            actions: IndexMap::new(),
            views: IndexMap::new(),
            bases: Vec::new(),
            referenced: false,
            range,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_none()
    }

    /// Declared name, else binding name, else placeholder token.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.binding.as_deref())
            .unwrap_or(self.placeholder.token.as_str())
    }

    /// The last base kept by name, used as the declared parent.
    pub fn parent_symbol(&self) -> Option<&str> {
        self.bases.iter().rev().find_map(|base| match base {
            Base::Symbol(name) => Some(name.as_str()),
            Base::Model(_) => None,
        })
    }

    /// Named models and top-level models nobody points at get their own block.
    pub fn is_emitted(&self) -> bool {
        !self.is_anonymous() || !self.referenced
    }
}
