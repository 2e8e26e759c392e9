//! The resolved model graph and the pipeline that builds it.
//!
//! ```text
//! SourceFile
//!     │
//!     ▼
//! ModelRegistry::discover   ← every declaration, ids in source order
//!     │
//!     ▼
//! LowerCtx::lower_body      ← names, properties, method groups, bases
//!     │
//!     ▼
//! compose_all               ← base merging, cycle breaking
//!     │
//!     ▼
//! ModelGraph
//! ```

use super::body::ModelBody;
use super::compose::{Composed, compose_all};
use super::error::ResolveError;
use super::ids::ModelId;
use super::model::Model;
use super::registry::ModelRegistry;
use super::type_expr::LowerCtx;
use super::vocab::Vocabulary;
use crate::parser::SourceFile;

/// All models of one source file, indexed by [`ModelId`].
#[derive(Clone, Debug, Default)]
pub struct ModelGraph {
    models: Vec<Model>,
}

/// A graph plus the non-fatal problems found while building it.
#[derive(Clone, Debug)]
pub struct LowerResult {
    pub graph: ModelGraph,
    pub errors: Vec<ResolveError>,
}

impl ModelGraph {
    /// Run the full resolution pipeline over `file`.
    pub fn build(file: &SourceFile, source: &str, vocab: &Vocabulary) -> LowerResult {
        let registry = ModelRegistry::discover(file, vocab, source);

        let mut ctx = LowerCtx::new(&registry, vocab);
        let bodies: Vec<ModelBody> = registry
            .declarations()
            .iter()
            .map(|decl| ctx.lower_body(decl))
            .collect();
        let LowerCtx {
            errors: mut lower_errors,
            referenced,
            ..
        } = ctx;

        let (composed, compose_errors) = compose_all(&registry, &bodies);

        let models: Vec<Model> = registry
            .declarations()
            .iter()
            .zip(bodies)
            .zip(composed)
            .map(|((decl, body), composed)| {
                let Composed {
                    properties,
                    actions,
                    views,
                    bases,
                } = composed;
                let mut model = Model::new(decl.id, decl.placeholder.clone(), decl.range());
                model.name = body.name;
                model.binding = decl.binding.clone();
                model.properties = properties;
                model.actions = actions;
                model.views = views;
                model.bases = bases;
                model.referenced = referenced.contains(&decl.id);
                model
            })
            .collect();

        lower_errors.extend(compose_errors);
        lower_errors.sort_by_key(|error| error.range().start());

        tracing::debug!(
            models = models.len(),
            errors = lower_errors.len(),
            "model graph resolved"
        );

        LowerResult {
            graph: ModelGraph { models },
            errors: lower_errors,
        }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn model(&self, id: ModelId) -> Option<&Model> {
        self.models.get(id.index())
    }

    /// Look a model up by declared name, falling back to its binding.
    pub fn by_name(&self, name: &str) -> Option<&Model> {
        self.models
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
            .or_else(|| self.models.iter().find(|m| m.binding.as_deref() == Some(name)))
    }

    /// Models that get a block of their own, in id order.
    pub fn emitted(&self) -> impl Iterator<Item = &Model> + '_ {
        self.models.iter().filter(|m| m.is_emitted())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
