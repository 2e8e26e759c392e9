//! Helpers for building analyses from model declaration sources.

use mstdoc::hir::Severity;
use mstdoc::{Analysis, AnalysisOptions, Diagnostic};

/// Analyse `source` with default options, failing the test on syntax errors.
pub fn analysis_from_source(source: &str) -> Analysis {
    analysis_with_options(source, &AnalysisOptions::default())
}

pub fn analysis_with_options(source: &str, options: &AnalysisOptions) -> Analysis {
    match Analysis::new(source, options) {
        Ok(analysis) => analysis,
        Err(err) => panic!("analysis failed: {err}\nsource:\n{source}"),
    }
}

/// Emitted typedefs for `source` with default options.
pub fn emit(source: &str) -> String {
    analysis_from_source(source).emit()
}

/// The `@property` line for `key` in the block labelled `label`.
pub fn property_line(output: &str, label: &str, key: &str) -> Option<String> {
    let block = typedef_block(output, label)?;
    block
        .lines()
        .filter_map(|line| line.strip_prefix("* @property "))
        .find(|line| line.ends_with(&format!(" {key}")) || line.ends_with(&format!(" [{key}]")))
        .map(str::to_string)
}

/// The whole block whose header names `label`.
pub fn typedef_block<'a>(output: &'a str, label: &str) -> Option<&'a str> {
    output.split("/**\n").find(|block| {
        block
            .lines()
            .next()
            .and_then(|header| header.strip_prefix("* @typedef {"))
            .and_then(|rest| rest.split_once("} "))
            .is_some_and(|(_, name)| name == label)
    })
}

/// Labels of all emitted blocks, in output order.
pub fn typedef_labels(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| line.strip_prefix("* @typedef {"))
        .filter_map(|rest| rest.split_once("} "))
        .map(|(_, label)| label.to_string())
        .collect()
}

pub fn diagnostics_with_code<'a>(analysis: &'a Analysis, code: &str) -> Vec<&'a Diagnostic> {
    analysis
        .diagnostics()
        .iter()
        .filter(|d| d.code.as_deref() == Some(code))
        .collect()
}

/// Assert an analysis has no error-level diagnostics.
pub fn assert_no_errors(analysis: &Analysis) {
    let errors: Vec<_> = analysis
        .diagnostics()
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .collect();
    assert!(
        errors.is_empty(),
        "Expected no errors, got {} error(s):\n{}",
        errors.len(),
        errors
            .iter()
            .map(|e| format!("  {e}"))
            .collect::<Vec<_>>()
            .join("\n")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_line_finds_optional_keys() {
        let output = "/**\n* @typedef {Object} A\n* @property {string} [x]\n*/\n";
        assert_eq!(property_line(output, "A", "x").as_deref(), Some("{string} [x]"));
        assert_eq!(property_line(output, "B", "x"), None);
    }

    #[test]
    fn test_typedef_labels_in_order() {
        let output = "/**\n* @typedef {Object} A\n*/\n\n/**\n* @typedef {Base} B\n*/\n";
        assert_eq!(typedef_labels(output), vec!["A", "B"]);
    }
}
