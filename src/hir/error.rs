//! Non-fatal errors raised while resolving models.

use text_size::TextRange;
use thiserror::Error;

/// A problem found while interpreting a declaration.
///
/// None of these abort analysis: the offending construct is skipped or
/// degraded and the rest of the model still resolves.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// An argument did not have the expected shape.
    #[error("{message}")]
    Structure { message: String, range: TextRange },

    /// An unrecognised type constructor; degraded to an opaque type.
    #[error("unknown type construct '{name}'")]
    UnknownConstruct { name: String, range: TextRange },

    /// An identifier used as a model reference is not a registered model.
    #[error("unresolved model reference '{name}'")]
    UnresolvedReference { name: String, range: TextRange },

    /// A composition base is still being resolved.
    #[error("circular composition through '{name}'")]
    CircularComposition { name: String, range: TextRange },
}

impl ResolveError {
    pub fn structure(message: impl Into<String>, range: TextRange) -> Self {
        Self::Structure {
            message: message.into(),
            range,
        }
    }

    pub fn unknown_construct(name: impl Into<String>, range: TextRange) -> Self {
        Self::UnknownConstruct {
            name: name.into(),
            range,
        }
    }

    pub fn unresolved_reference(name: impl Into<String>, range: TextRange) -> Self {
        Self::UnresolvedReference {
            name: name.into(),
            range,
        }
    }

    pub fn circular_composition(name: impl Into<String>, range: TextRange) -> Self {
        Self::CircularComposition {
            name: name.into(),
            range,
        }
    }

    /// Source range of the offending construct.
    pub fn range(&self) -> TextRange {
        match self {
            Self::Structure { range, .. }
            | Self::UnknownConstruct { range, .. }
            | Self::UnresolvedReference { range, .. }
            | Self::CircularComposition { range, .. } => *range,
        }
    }
}
