//! Analysis options

use crate::base::constants::{DEFAULT_ASYNC_HELPER, DEFAULT_NAMESPACE, DEFAULT_PARENT};
use crate::hir::Vocabulary;

/// Options controlling how declarations are read and typedefs rendered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Identifier the type vocabulary hangs off (`types` in `types.model`)
    pub namespace: String,
    /// Name of the helper wrapping generator actions (`flow`)
    pub async_helper: String,
    /// Parent symbol of a typedef without a symbolic base
    pub default_parent: String,
    /// Upper-case the first letter of declared model names
    pub capitalize_names: bool,
    /// Analyse the recovered tree instead of failing on syntax errors
    pub allow_syntax_errors: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            async_helper: DEFAULT_ASYNC_HELPER.to_string(),
            default_parent: DEFAULT_PARENT.to_string(),
            capitalize_names: false,
            allow_syntax_errors: false,
        }
    }
}

impl AnalysisOptions {
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_async_helper(mut self, async_helper: impl Into<String>) -> Self {
        self.async_helper = async_helper.into();
        self
    }

    pub fn with_default_parent(mut self, default_parent: impl Into<String>) -> Self {
        self.default_parent = default_parent.into();
        self
    }

    pub fn with_capitalize_names(mut self, capitalize_names: bool) -> Self {
        self.capitalize_names = capitalize_names;
        self
    }

    pub fn with_allow_syntax_errors(mut self, allow_syntax_errors: bool) -> Self {
        self.allow_syntax_errors = allow_syntax_errors;
        self
    }

    /// The vocabulary spelling these options describe
    pub fn vocabulary(&self) -> Vocabulary {
        Vocabulary::new(self.namespace.as_str(), self.async_helper.as_str())
    }
}
