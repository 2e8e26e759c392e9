//! IDE layer: high-level entry points over the model engine.
//!
//! This module provides the interface between the resolved model graph
//! (HIR) and callers that want typedefs or diagnostics.
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: Take text in, return data out
//! 2. **Single run**: Every `Analysis` is built from scratch
//! 3. **Composable**: Built on top of HIR passes
//!
//! ## Usage
//!
//! ```
//! use mstdoc::ide::{AnalysisOptions, generate_jsdoc};
//!
//! let docs = generate_jsdoc("types.model('Todo', {})", &AnalysisOptions::default()).unwrap();
//! assert_eq!(docs, "/**\n* @typedef {Object} Todo\n*/\n");
//! ```

mod analysis;
mod jsdoc;
mod options;

pub use analysis::{Analysis, AnalysisError, generate_jsdoc};
pub use jsdoc::{emit_graph, model_label, render_model};
pub use options::AnalysisOptions;
