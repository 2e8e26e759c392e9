//! Composition resolver.
//!
//! Merges the bodies of registered bases into each composing model, in
//! argument order, with later bases overriding earlier keys and the model's
//! own entries overriding all bases. Bases are resolved depth-first before
//! they are merged; a base reached again while still in progress is a cycle
//! and contributes only its symbolic name.

use indexmap::IndexMap;
use smol_str::SmolStr;

use super::body::ModelBody;
use super::error::ResolveError;
use super::ids::ModelId;
use super::model::{Base, MethodKind, TypeExpr};
use super::registry::ModelRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ResolveState {
    Pending,
    InProgress,
    Done,
}

/// A model's members after merging its bases.
#[derive(Clone, Debug, Default)]
pub(crate) struct Composed {
    pub properties: IndexMap<SmolStr, TypeExpr>,
    pub actions: IndexMap<SmolStr, MethodKind>,
    pub views: IndexMap<SmolStr, MethodKind>,
    pub bases: Vec<Base>,
}

impl Composed {
    fn absorb(
        &mut self,
        properties: &IndexMap<SmolStr, TypeExpr>,
        actions: &IndexMap<SmolStr, MethodKind>,
        views: &IndexMap<SmolStr, MethodKind>,
    ) {
        for (key, ty) in properties {
            self.properties.insert(key.clone(), ty.clone());
        }
        for (key, kind) in actions {
            self.actions.insert(key.clone(), *kind);
        }
        for (key, kind) in views {
            self.views.insert(key.clone(), *kind);
        }
    }
}

struct Composer<'a> {
    registry: &'a ModelRegistry,
    bodies: &'a [ModelBody],
    states: Vec<ResolveState>,
    composed: Vec<Composed>,
    errors: Vec<ResolveError>,
}

/// Resolve every model in id order.
pub(crate) fn compose_all(
    registry: &ModelRegistry,
    bodies: &[ModelBody],
) -> (Vec<Composed>, Vec<ResolveError>) {
    let mut composer = Composer {
        registry,
        bodies,
        states: vec![ResolveState::Pending; bodies.len()],
        composed: vec![Composed::default(); bodies.len()],
        errors: Vec::new(),
    };
    for index in 0..bodies.len() {
        composer.resolve(ModelId::new(index as u32));
    }
    (composer.composed, composer.errors)
}

impl Composer<'_> {
    fn label(&self, id: ModelId) -> SmolStr {
        let name = self.bodies.get(id.index()).and_then(|body| body.name.clone());
        let decl = self.registry.declaration(id);
        name.or_else(|| decl.and_then(|d| d.binding.clone()))
            .or_else(|| decl.map(|d| d.placeholder.token.clone()))
            .unwrap_or_default()
    }

    fn resolve(&mut self, id: ModelId) {
        let index = id.index();
        if self.states.get(index) != Some(&ResolveState::Pending) {
            return;
        }
        self.states[index] = ResolveState::InProgress;

        let bodies = self.bodies;
        let body = &bodies[index];
        let mut out = Composed::default();

        for (base, range) in &body.bases {
            match base {
                Base::Model(base_id) => {
                    if self.states.get(base_id.index()) == Some(&ResolveState::InProgress) {
                        let label = self.label(*base_id);
                        tracing::trace!(%id, base = %base_id, "composition cycle, keeping base by name");
                        self.errors
                            .push(ResolveError::circular_composition(label.as_str(), *range));
                        out.bases.push(Base::Symbol(label));
                        continue;
                    }
                    self.resolve(*base_id);
                    if let Some(resolved) = self.composed.get(base_id.index()) {
                        out.absorb(&resolved.properties, &resolved.actions, &resolved.views);
                    }
                    out.bases.push(Base::Model(*base_id));
                }
                Base::Symbol(name) => out.bases.push(Base::Symbol(name.clone())),
            }
        }

        out.absorb(&body.properties, &body.actions, &body.views);
        self.composed[index] = out;
        self.states[index] = ResolveState::Done;
    }
}
