//! High-level IR (HIR): the model resolution engine.
//!
//! This module turns a parsed source file into a graph of resolved models.
//! All work happens in one synchronous run with no state kept between runs.
//!
//! ## Key Types
//!
//! - [`ModelRegistry`]: Discovery pass assigning every declaration a [`ModelId`]
//! - [`TypeExpr`]: Tree of type constructors over leaves and model links
//! - [`Model`]: A resolved record type with properties, actions and views
//! - [`ModelGraph`]: All models of one file, built by [`ModelGraph::build`]
//! - [`Projector`]: Flattens a `TypeExpr` into a final [`Projection`]
//! - [`DiagnosticCollector`]: Converts problems into positioned diagnostics
//!
//! ## Passes
//!
//! ```text
//! discover(file)            ← register declarations, source pre-order
//!     │
//!     ▼
//! lower_body(decl)          ← name, properties, actions, views, bases
//!     │
//!     ▼
//! compose_all               ← merge bases, break composition cycles
//!     │
//!     ▼
//! Projector::project        ← type descriptors for emission
//! ```

mod body;
mod compose;
mod diagnostics;
mod error;
mod graph;
mod ids;
mod model;
mod project;
mod registry;
mod type_expr;
mod vocab;

pub use diagnostics::{Diagnostic, DiagnosticCollector, Severity, codes};
pub use error::ResolveError;
pub use graph::{LowerResult, ModelGraph};
pub use ids::{ModelId, Placeholder};
pub use model::{Base, MethodKind, Model, TypeExpr, TypeKind};
pub use project::{Projection, Projector, capitalize, method_type, property_key};
pub use registry::{ChainCall, DeclKind, Declaration, ModelRegistry};
pub use vocab::Vocabulary;
