//! Diagnostics: error reporting for model resolution.
//!
//! This module provides diagnostic types for syntax errors and the
//! non-fatal problems found while resolving models, with positions
//! converted to 0-indexed line/column pairs.

use std::fmt;
use std::sync::Arc;

use super::error::ResolveError;
use crate::base::LineIndex;
use crate::parser::SyntaxError;
use text_size::TextRange;

// ============================================================================
// DIAGNOSTIC TYPES
// ============================================================================

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
            Severity::Hint => "hint",
        };
        f.write_str(label)
    }
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Start line (0-indexed).
    pub start_line: u32,
    /// Start column (0-indexed).
    pub start_col: u32,
    /// End line (0-indexed).
    pub end_line: u32,
    /// End column (0-indexed).
    pub end_col: u32,
    /// Severity level.
    pub severity: Severity,
    /// Error/warning code (e.g., "E0101").
    pub code: Option<Arc<str>>,
    /// The diagnostic message.
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(line: u32, col: u32, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Error, line, col, message)
    }

    /// Create a new warning diagnostic.
    pub fn warning(line: u32, col: u32, message: impl Into<Arc<str>>) -> Self {
        Self::new(Severity::Warning, line, col, message)
    }

    fn new(severity: Severity, line: u32, col: u32, message: impl Into<Arc<str>>) -> Self {
        Self {
            start_line: line,
            start_col: col,
            end_line: line,
            end_col: col,
            severity,
            code: None,
            message: message.into(),
        }
    }

    /// Create a diagnostic covering `range`.
    pub fn at_range(
        severity: Severity,
        range: TextRange,
        index: &LineIndex,
        message: impl Into<Arc<str>>,
    ) -> Self {
        let (start, end) = index.range(range);
        Self::new(severity, start.line, start.col, message).with_span(end.line, end.col)
    }

    /// Set the span (range) for this diagnostic.
    pub fn with_span(mut self, end_line: u32, end_col: u32) -> Self {
        self.end_line = end_line;
        self.end_col = end_col;
        self
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.start_line + 1, self.start_col + 1, self.severity)?;
        if let Some(code) = &self.code {
            write!(f, "[{}]", code)?;
        }
        write!(f, ": {}", self.message)
    }
}

// ============================================================================
// DIAGNOSTIC CODES
// ============================================================================

/// Standard diagnostic codes.
///
/// ## Error Code Ranges
///
/// - **E0001-E0099**: Syntax errors
/// - **E0101-E0199**: Model resolution errors
/// - **W0101-W0199**: Model resolution warnings (degraded, not dropped)
pub mod codes {
    /// Source text could not be parsed.
    pub const SYNTAX_ERROR: &str = "E0001";

    /// An argument or entry did not have the expected shape.
    pub const STRUCTURE: &str = "E0101";
    /// A composition base is part of a cycle.
    pub const CIRCULAR_COMPOSITION: &str = "E0102";

    /// Unrecognised type construct, rendered as `*`.
    pub const UNKNOWN_CONSTRUCT: &str = "W0101";
    /// Name that is not a registered model, kept symbolically.
    pub const UNRESOLVED_REFERENCE: &str = "W0102";
}

// ============================================================================
// DIAGNOSTIC COLLECTOR
// ============================================================================

/// Collects diagnostics during analysis.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn add(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a syntax error.
    pub fn syntax_error(&mut self, error: &SyntaxError, index: &LineIndex) {
        self.add(
            Diagnostic::at_range(Severity::Error, error.range, index, error.message.as_str())
                .with_code(codes::SYNTAX_ERROR),
        );
    }

    /// Add a resolution problem.
    pub fn resolve_error(&mut self, error: &ResolveError, index: &LineIndex) {
        let (severity, code) = match error {
            ResolveError::Structure { .. } => (Severity::Error, codes::STRUCTURE),
            ResolveError::CircularComposition { .. } => {
                (Severity::Error, codes::CIRCULAR_COMPOSITION)
            }
            ResolveError::UnknownConstruct { .. } => (Severity::Warning, codes::UNKNOWN_CONSTRUCT),
            ResolveError::UnresolvedReference { .. } => {
                (Severity::Warning, codes::UNRESOLVED_REFERENCE)
            }
        };
        self.add(
            Diagnostic::at_range(severity, error.range(), index, error.to_string())
                .with_code(code),
        );
    }

    /// Get all diagnostics.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Get the number of errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Get the number of warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Take all diagnostics, leaving the collector empty.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Consume the collector.
    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
