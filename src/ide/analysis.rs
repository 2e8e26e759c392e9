//! Analysis: one resolved source file, ready for querying and emission.
//!
//! An `Analysis` owns the model graph, the diagnostics and the line index
//! of a single run. Nothing is shared between runs, so analysing the same
//! text twice yields identical results.
//!
//! ## Usage
//!
//! ```
//! use mstdoc::ide::{Analysis, AnalysisOptions};
//!
//! let source = "const Todo = types.model('Todo', { title: types.string })";
//! let analysis = Analysis::new(source, &AnalysisOptions::default()).unwrap();
//! assert_eq!(analysis.models().len(), 1);
//! assert!(analysis.emit().contains("@property {string} title"));
//! ```

use thiserror::Error;

use crate::base::LineIndex;
use crate::hir::{Diagnostic, DiagnosticCollector, Model, ModelGraph, Projection, Projector, TypeExpr};
use crate::parser::{AstNode, SourceFile, SyntaxError, parse};

use super::AnalysisOptions;
use super::jsdoc::emit_graph;

/// Fatal analysis failure.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The source has syntax errors and lenient parsing is off.
    #[error("source has {} syntax error(s)", .errors.len())]
    Parse { errors: Vec<SyntaxError> },
}

/// A resolved source file.
#[derive(Debug)]
pub struct Analysis {
    graph: ModelGraph,
    diagnostics: Vec<Diagnostic>,
    line_index: LineIndex,
    options: AnalysisOptions,
}

impl Analysis {
    /// Parse and resolve `text`.
    pub fn new(text: &str, options: &AnalysisOptions) -> Result<Self, AnalysisError> {
        let parse = parse(text);
        if !parse.ok() && !options.allow_syntax_errors {
            tracing::debug!(errors = parse.errors.len(), "aborting on syntax errors");
            return Err(AnalysisError::Parse {
                errors: parse.errors,
            });
        }

        let line_index = LineIndex::new(text);
        let mut collector = DiagnosticCollector::new();
        for error in &parse.errors {
            collector.syntax_error(error, &line_index);
        }

        let graph = match SourceFile::cast(parse.syntax()) {
            Some(file) => {
                let result = ModelGraph::build(&file, text, &options.vocabulary());
                for error in &result.errors {
                    collector.resolve_error(error, &line_index);
                }
                result.graph
            }
            None => ModelGraph::default(),
        };

        Ok(Self {
            graph,
            diagnostics: collector.into_vec(),
            line_index,
            options: options.clone(),
        })
    }

    /// All models in id order, emitted or not.
    pub fn models(&self) -> &[Model] {
        self.graph.models()
    }

    pub fn graph(&self) -> &ModelGraph {
        &self.graph
    }

    /// Look a model up by declared name, falling back to its binding.
    pub fn model_by_name(&self, name: &str) -> Option<&Model> {
        self.graph.by_name(name)
    }

    /// Flatten a type expression of this file's graph.
    pub fn project(&self, ty: &TypeExpr) -> Projection {
        Projector::new(&self.graph, self.options.capitalize_names).project(ty)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Render the JSDoc typedefs of all emitted models.
    pub fn emit(&self) -> String {
        emit_graph(&self.graph, &self.options)
    }
}

/// Parse, resolve and emit in one call.
pub fn generate_jsdoc(text: &str, options: &AnalysisOptions) -> Result<String, AnalysisError> {
    Analysis::new(text, options).map(|analysis| analysis.emit())
}
