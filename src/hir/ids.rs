//! Identity types for registered models.

use std::fmt;

use smol_str::SmolStr;

/// Identity of a registered model.
///
/// Assigned by the [`ModelRegistry`](super::ModelRegistry) in source order and
/// stable for the lifetime of one analysis run. Doubles as the index of the
/// model in [`ModelGraph::models`](super::ModelGraph::models).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModelId(u32);

impl ModelId {
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A synthetic token standing in for a model declaration.
///
/// The token never occurs in the analysed source text, so it can be used as
/// the label of a model that has neither a declared nor a bound name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placeholder {
    pub model: ModelId,
    pub token: SmolStr,
}

impl Placeholder {
    /// Mint a placeholder for `model` that does not occur in `source`.
    pub fn mint(model: ModelId, source: &str) -> Self {
        let mut token = format!("Model{}", model.raw());
        while source.contains(token.as_str()) {
            token.push('_');
        }
        Self {
            model,
            token: SmolStr::new(token),
        }
    }
}
