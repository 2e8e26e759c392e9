//! Flattening of type expressions into final type descriptors.
//!
//! Named models are always projected symbolically, so any reference cycle
//! through a named model terminates. Anonymous models expand inline; the
//! expansion path is tracked so a cycle made only of anonymous models
//! renders `*` at the repeated model instead of diverging.

use super::graph::ModelGraph;
use super::ids::ModelId;
use super::model::{MethodKind, Model, TypeExpr, TypeKind};

/// Final type descriptor of one property.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Projection {
    pub type_name: String,
    pub optional: bool,
}

impl Projection {
    pub fn required(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            optional: false,
        }
    }

    fn opaque() -> Self {
        Self::required(WILDCARD)
    }
}

const WILDCARD: &str = "*";

/// Type rendered for an action or view entry.
pub fn method_type(kind: MethodKind) -> &'static str {
    if kind.is_accessor() {
        WILDCARD
    } else {
        "function"
    }
}

/// Upper-case the first character.
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Projects type expressions against one model graph.
pub struct Projector<'a> {
    graph: &'a ModelGraph,
    capitalize_names: bool,
    expanding: Vec<ModelId>,
}

impl<'a> Projector<'a> {
    pub fn new(graph: &'a ModelGraph, capitalize_names: bool) -> Self {
        Self {
            graph,
            capitalize_names,
            expanding: Vec::new(),
        }
    }

    /// Symbolic name of a named model, honouring the capitalisation option.
    pub fn declared_name(&self, model: &Model) -> Option<String> {
        let name = model.name.as_deref()?;
        Some(if self.capitalize_names {
            capitalize(name)
        } else {
            name.to_string()
        })
    }

    pub fn project(&mut self, ty: &TypeExpr) -> Projection {
        match &ty.kind {
            TypeKind::String => Projection::required("string"),
            TypeKind::Number => Projection::required("number"),
            TypeKind::Integer => Projection::required("integer"),
            TypeKind::Boolean => Projection::required("boolean"),
            TypeKind::Date => Projection::required("Date"),
            TypeKind::Null => Projection::required("null"),
            TypeKind::Undefined => Projection::required("undefined"),
            TypeKind::Opaque => Projection::opaque(),
            TypeKind::Named(name) => Projection::required(name.as_str()),

            TypeKind::Array => {
                let inner = self.inner_type(ty);
                Projection::required(format!("{}[]", group(&inner)))
            }
            TypeKind::Map => {
                let inner = self.inner_type(ty);
                Projection::required(format!("Map<*,{}>", inner))
            }
            TypeKind::Optional | TypeKind::Maybe => {
                let mut projection = self.child(ty);
                projection.optional = true;
                projection
            }
            TypeKind::MaybeNull => {
                let mut projection = self.child(ty);
                if !projection.type_name.starts_with('?') {
                    projection.type_name = format!("?{}", projection.type_name);
                }
                projection.optional = true;
                projection
            }
            TypeKind::Reference
            | TypeKind::SafeReference
            | TypeKind::Refinement
            | TypeKind::Custom
            | TypeKind::Late
            | TypeKind::Frozen
            | TypeKind::Literal
            | TypeKind::Enumeration
            | TypeKind::Union
            | TypeKind::ComposedAsType => self.child(ty),

            TypeKind::Model(id) => Projection::required(self.model_type(*id)),
        }
    }

    /// Projection of the sole tracked child, `*` when there is none.
    fn child(&mut self, ty: &TypeExpr) -> Projection {
        match ty.child() {
            Some(child) => self.project(child),
            None => Projection::opaque(),
        }
    }

    /// Like [`Self::child`] but optionality does not cross a collection.
    fn inner_type(&mut self, ty: &TypeExpr) -> String {
        self.child(ty).type_name
    }

    fn model_type(&mut self, id: ModelId) -> String {
        let graph = self.graph;
        let Some(model) = graph.model(id) else {
            return WILDCARD.to_string();
        };
        if let Some(name) = self.declared_name(model) {
            return name;
        }
        // Members inherited from an unresolved base are unknown, so no inline
        // shape would be complete.
        if let Some(parent) = model.parent_symbol() {
            tracing::trace!(%id, parent, "anonymous model with unresolved base, using wildcard");
            return WILDCARD.to_string();
        }
        if self.expanding.contains(&id) {
            tracing::trace!(%id, "anonymous model cycle, using wildcard");
            return WILDCARD.to_string();
        }

        self.expanding.push(id);
        let mut entries = Vec::new();
        for (key, ty) in &model.properties {
            let projection = self.project(ty);
            entries.push(format!("{}:{}", property_key(key, projection.optional), projection.type_name));
        }
        for (key, kind) in model.actions.iter().chain(&model.views) {
            entries.push(format!("{}:{}", key, method_type(*kind)));
        }
        self.expanding.pop();

        format!("{{{}}}", entries.join(","))
    }
}

/// `name`, or `[name]` when optional.
pub fn property_key(name: &str, optional: bool) -> String {
    if optional {
        format!("[{}]", name)
    } else {
        name.to_string()
    }
}

/// Parenthesise a nullable element type so `[]` applies to all of it.
fn group(type_name: &str) -> String {
    if type_name.starts_with('?') {
        format!("({})", type_name)
    } else {
        type_name.to_string()
    }
}
