//! # mst-jsdoc
//!
//! Model/type resolution engine for mobx-state-tree style declarations.
//! Reads `types.model(...)` / `types.compose(...)` chains from JavaScript
//! source and produces one JSDoc `@typedef` block per declared model.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → Analysis entry point, options, JSDoc emission
//!   ↓
//! hir       → Model registry, type/body interpretation, composition, projection
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, rowan CST, typed AST
//!   ↓
//! base      → Primitives (LineIndex, TextRange, vocabulary names)
//! ```
//!
//! ## Example
//!
//! ```
//! use mstdoc::{AnalysisOptions, generate_jsdoc};
//!
//! let source = r#"
//! const Todo = types.model("Todo", {
//!     title: types.string,
//!     done: types.optional(types.boolean, false),
//! }).actions(self => ({
//!     toggle() { self.done = !self.done },
//! }));
//! "#;
//!
//! let docs = generate_jsdoc(source, &AnalysisOptions::default()).unwrap();
//! assert_eq!(
//!     docs,
//!     "/**\n\
//!      * @typedef {Object} Todo\n\
//!      * @property {string} title\n\
//!      * @property {boolean} [done]\n\
//!      * @property {function} toggle\n\
//!      */\n"
//! );
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → ide)
// ============================================================================

/// Foundation types: LineIndex, TextRange, vocabulary names
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed AST
pub mod parser;

/// High-level IR: model registry and resolution passes
pub mod hir;

/// Entry points: Analysis, options, JSDoc emission
pub mod ide;

// Re-export foundation types
pub use base::{LineCol, LineIndex, TextRange, TextSize};

// Re-export the engine's main types
pub use hir::{Diagnostic, Model, ModelGraph, ModelId, Severity, TypeExpr, TypeKind};
pub use ide::{Analysis, AnalysisError, AnalysisOptions, generate_jsdoc};
