//! Recognition of the model-declaration vocabulary.

use smol_str::SmolStr;

use super::model::TypeKind;
use crate::base::constants as names;
use crate::parser::Expr;

/// Which identifiers spell the vocabulary in the analysed text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vocabulary {
    namespace: SmolStr,
    async_helper: SmolStr,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(names::DEFAULT_NAMESPACE, names::DEFAULT_ASYNC_HELPER)
    }
}

/// A vocabulary name found at a callee or type position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct VocabRef {
    pub name: SmolStr,
    /// Written as `namespace.name` rather than a bare identifier.
    pub qualified: bool,
}

/// A constructor recognised in call position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Construct {
    Model,
    Compose,
    /// Single-argument wrapper recursing into its one type argument.
    Wrapper(TypeKind),
    Late,
    Literal,
    Enumeration,
    Refinement,
    Custom,
    Union,
    SnapshotProcessor,
    /// Legacy `identifier(T)` form, with the leaf used when `T` is absent.
    Identifier(TypeKind),
}

impl Vocabulary {
    pub fn new(namespace: impl Into<SmolStr>, async_helper: impl Into<SmolStr>) -> Self {
        Self {
            namespace: namespace.into(),
            async_helper: async_helper.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn async_helper(&self) -> &str {
        &self.async_helper
    }

    /// `types.name` or a bare `name`.
    pub(crate) fn vocab_ref(&self, expr: &Expr) -> Option<VocabRef> {
        match expr {
            Expr::NameRef(name) => Some(VocabRef {
                name: name.text(),
                qualified: false,
            }),
            Expr::Member(member) => {
                let Some(Expr::NameRef(object)) = member.object() else {
                    return None;
                };
                if object.text() != self.namespace {
                    return None;
                }
                Some(VocabRef {
                    name: member.name()?.text(),
                    qualified: true,
                })
            }
            Expr::Paren(paren) => self.vocab_ref(&paren.expr()?),
            _ => None,
        }
    }

    /// Callee of a model-declaration or composition constructor.
    pub(crate) fn declaration_construct(&self, callee: &Expr) -> Option<Construct> {
        let vocab = self.vocab_ref(callee)?;
        match vocab.name.as_str() {
            names::MODEL => Some(Construct::Model),
            names::COMPOSE => Some(Construct::Compose),
            _ => None,
        }
    }

    /// Whether `callee` names the async generator wrapper (`flow`, `mst.flow`).
    pub fn is_async_helper(&self, callee: &Expr) -> bool {
        match callee {
            Expr::NameRef(name) => name.text() == self.async_helper,
            Expr::Member(member) => member
                .name()
                .is_some_and(|name| name.text() == self.async_helper),
            Expr::Paren(paren) => paren.expr().is_some_and(|e| self.is_async_helper(&e)),
            _ => false,
        }
    }
}

/// Leaf kind spelled by a vocabulary name used as a value.
pub(crate) fn leaf_kind(name: &str) -> Option<TypeKind> {
    let kind = match name {
        names::STRING | names::IDENTIFIER => TypeKind::String,
        names::NUMBER | names::IDENTIFIER_NUMBER | names::FINITE | names::FLOAT => TypeKind::Number,
        names::INTEGER => TypeKind::Integer,
        names::BOOLEAN => TypeKind::Boolean,
        names::DATE => TypeKind::Date,
        names::NULL => TypeKind::Null,
        names::UNDEFINED => TypeKind::Undefined,
        _ => return None,
    };
    Some(kind)
}

/// Constructor spelled by a vocabulary name used as a callee.
pub(crate) fn call_construct(name: &str) -> Option<Construct> {
    let construct = match name {
        names::MODEL => Construct::Model,
        names::COMPOSE => Construct::Compose,
        names::ARRAY => Construct::Wrapper(TypeKind::Array),
        names::MAP => Construct::Wrapper(TypeKind::Map),
        names::OPTIONAL => Construct::Wrapper(TypeKind::Optional),
        names::MAYBE => Construct::Wrapper(TypeKind::Maybe),
        names::MAYBE_NULL => Construct::Wrapper(TypeKind::MaybeNull),
        names::REFERENCE => Construct::Wrapper(TypeKind::Reference),
        names::SAFE_REFERENCE => Construct::Wrapper(TypeKind::SafeReference),
        names::FROZEN => Construct::Wrapper(TypeKind::Frozen),
        names::LATE => Construct::Late,
        names::LITERAL => Construct::Literal,
        names::ENUMERATION => Construct::Enumeration,
        names::REFINEMENT => Construct::Refinement,
        names::CUSTOM => Construct::Custom,
        names::UNION => Construct::Union,
        names::SNAPSHOT_PROCESSOR => Construct::SnapshotProcessor,
        names::IDENTIFIER => Construct::Identifier(TypeKind::String),
        names::IDENTIFIER_NUMBER => Construct::Identifier(TypeKind::Number),
        _ => return None,
    };
    Some(construct)
}
