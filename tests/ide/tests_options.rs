//! Analysis options and syntax error handling.

#![allow(clippy::unwrap_used)]

use mstdoc::hir::codes;
use mstdoc::{Analysis, AnalysisError, AnalysisOptions, Severity};

use crate::helpers::analysis_helpers::{analysis_with_options, diagnostics_with_code, typedef_labels};

#[test]
fn test_capitalize_names() {
    let options = AnalysisOptions::default().with_capitalize_names(true);
    let analysis = analysis_with_options(
        "const item = types.model('item', {})\n\
         const list = types.model('list', { items: types.array(item) })\n\
         const plain = types.model({})",
        &options,
    );
    let output = analysis.emit();
    // bindings and placeholders are left alone
    assert_eq!(typedef_labels(&output), vec!["Item", "List", "plain"]);
    assert!(output.contains("* @property {Item[]} items\n"));
}

#[test]
fn test_custom_async_helper() {
    let options = AnalysisOptions::default().with_async_helper("task");
    let analysis = analysis_with_options(
        "types.model('A', {}).actions(self => ({\n  load: task(function* () {}),\n  other: flow(function* () {}),\n}))",
        &options,
    );
    let a = analysis.model_by_name("A").unwrap();
    assert!(a.actions.contains_key("load"));
    assert!(!a.actions.contains_key("other"));
    assert_eq!(diagnostics_with_code(&analysis, codes::STRUCTURE).len(), 1);
}

#[test]
fn test_qualified_async_helper() {
    let analysis = analysis_with_options(
        "types.model('A', {}).actions(self => ({ load: mst.flow(function* () {}) }))",
        &AnalysisOptions::default(),
    );
    assert!(analysis.diagnostics().is_empty());
}

#[test]
fn test_syntax_errors_fail_by_default() {
    let err = Analysis::new("types.model('A', { a: ", &AnalysisOptions::default()).unwrap_err();
    let AnalysisError::Parse { errors } = &err;
    assert!(!errors.is_empty());
    assert!(err.to_string().starts_with("source has "));
}

#[test]
fn test_lenient_mode_reports_syntax_diagnostics() {
    let options = AnalysisOptions::default().with_allow_syntax_errors(true);
    let analysis = analysis_with_options(
        "const A = types.model('A', { a: types.string })\nconst broken = (;\n",
        &options,
    );
    assert_eq!(typedef_labels(&analysis.emit()), vec!["A"]);
    let syntax = diagnostics_with_code(&analysis, codes::SYNTAX_ERROR);
    assert!(!syntax.is_empty());
    assert!(syntax.iter().all(|d| d.severity == Severity::Error));
}

#[test]
fn test_options_are_kept_on_analysis() {
    let options = AnalysisOptions::default().with_default_parent("Base");
    let analysis = analysis_with_options("types.model('A', {})", &options);
    assert_eq!(analysis.options(), &options);
    assert_eq!(analysis.emit(), "/**\n* @typedef {Base} A\n*/\n");
}
