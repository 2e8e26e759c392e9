//! Resolution diagnostics: codes, severities, positions and ordering.

#![allow(clippy::unwrap_used)]

use mstdoc::Severity;
use mstdoc::hir::codes;
use rstest::rstest;

use crate::helpers::analysis_helpers::{
    analysis_from_source, assert_no_errors, diagnostics_with_code, property_line,
};
use crate::helpers::source_fixtures::{EXAMPLE_STORE, TODO_STORE};

#[rstest]
#[case::unknown_member("types.model('A', { x: types.bogus })", codes::UNKNOWN_CONSTRUCT, Severity::Warning)]
#[case::unknown_call("types.model('A', { x: types.bogus(1) })", codes::UNKNOWN_CONSTRUCT, Severity::Warning)]
#[case::unknown_expression("types.model('A', { x: [types.string] })", codes::UNKNOWN_CONSTRUCT, Severity::Warning)]
#[case::unresolved_name("types.model('A', { x: Missing })", codes::UNRESOLVED_REFERENCE, Severity::Warning)]
#[case::non_object_properties("types.model('A', props)", codes::STRUCTURE, Severity::Error)]
#[case::computed_key("types.model('A', { [key]: types.string })", codes::STRUCTURE, Severity::Error)]
#[case::method_in_properties("types.model('A', { x() {} })", codes::STRUCTURE, Severity::Error)]
#[case::spread_in_properties("types.model('A', { ...shared })", codes::STRUCTURE, Severity::Error)]
#[case::builder_returns_non_object("types.model('A', {}).actions(self => 42)", codes::STRUCTURE, Severity::Error)]
#[case::builder_missing("types.model('A', {}).views()", codes::STRUCTURE, Severity::Error)]
#[case::non_function_entry("types.model('A', {}).actions(self => ({ x: 1 }))", codes::STRUCTURE, Severity::Error)]
#[case::non_helper_call_entry("types.model('A', {}).actions(self => ({ x: wrap(() => {}) }))", codes::STRUCTURE, Severity::Error)]
#[case::wrapper_without_argument("types.model('A', { x: types.array() })", codes::STRUCTURE, Severity::Error)]
#[case::named_without_string("types.model({}).named(name)", codes::STRUCTURE, Severity::Error)]
fn test_single_diagnostic(#[case] source: &str, #[case] code: &str, #[case] severity: Severity) {
    let analysis = analysis_from_source(source);
    let diagnostics = analysis.diagnostics();
    assert_eq!(diagnostics.len(), 1, "{diagnostics:?}");
    assert_eq!(diagnostics[0].code.as_deref(), Some(code));
    assert_eq!(diagnostics[0].severity, severity);
}

#[test]
fn test_problems_degrade_instead_of_aborting() {
    let analysis = analysis_from_source(
        "types.model('A', {\n  good: types.string,\n  bad: types.bogus,\n  [computed]: types.number,\n})",
    );
    let output = analysis.emit();
    assert_eq!(property_line(&output, "A", "good").as_deref(), Some("{string} good"));
    assert_eq!(property_line(&output, "A", "bad").as_deref(), Some("{*} bad"));
    assert_eq!(analysis.model_by_name("A").unwrap().properties.len(), 2);
}

#[test]
fn test_malformed_attachment_keeps_earlier_group() {
    let analysis = analysis_from_source(
        "types.model('A', {})\n  .actions(self => ({ first() {} }))\n  .actions(self => 42)",
    );
    let a = analysis.model_by_name("A").unwrap();
    assert!(a.actions.contains_key("first"));
    assert_eq!(diagnostics_with_code(&analysis, codes::STRUCTURE).len(), 1);
}

#[test]
fn test_diagnostics_sorted_by_position() {
    let analysis = analysis_from_source(
        "const A = types.model('A', {\n  a: Missing,\n  b: types.bogus,\n  c: Other,\n})",
    );
    let lines: Vec<_> = analysis.diagnostics().iter().map(|d| d.start_line).collect();
    assert_eq!(lines, vec![1, 2, 3]);
}

#[test]
fn test_diagnostic_display() {
    let analysis = analysis_from_source("const A = types.model('A', {\n  x: types.bogus,\n})");
    assert_eq!(
        analysis.diagnostics()[0].to_string(),
        "2:6: warning[W0101]: unknown type construct 'types.bogus'"
    );
}

#[test]
fn test_example_store_warnings() {
    let analysis = analysis_from_source(EXAMPLE_STORE);
    assert_no_errors(&analysis);
    let unresolved: Vec<_> = diagnostics_with_code(&analysis, codes::UNRESOLVED_REFERENCE)
        .iter()
        .map(|d| d.message.to_string())
        .collect();
    assert_eq!(
        unresolved,
        vec![
            "unresolved model reference 'ItemsMap'",
            "unresolved model reference 'A'",
            "unresolved model reference 'B'",
            "unresolved model reference 'C'",
            "unresolved model reference 'D'",
            "unresolved model reference 'SomeReference'",
        ]
    );
    assert_eq!(analysis.diagnostics().len(), 6);
}

#[test]
fn test_todo_store_is_clean() {
    let analysis = analysis_from_source(TODO_STORE);
    assert!(analysis.diagnostics().is_empty(), "{:?}", analysis.diagnostics());
}
