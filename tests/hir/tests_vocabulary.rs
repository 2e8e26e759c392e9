//! Type vocabulary grid: one property per construct, checked through the
//! rendered `@property` line.

#![allow(clippy::unwrap_used)]

use mstdoc::{AnalysisOptions, TypeKind};
use rstest::rstest;

use crate::helpers::analysis_helpers::{analysis_from_source, analysis_with_options, property_line};

fn rendered(type_source: &str) -> String {
    let source = format!("types.model('Host', {{\n  p: {type_source},\n}})");
    let output = analysis_from_source(&source).emit();
    property_line(&output, "Host", "p").unwrap_or_else(|| panic!("no line for p in:\n{output}"))
}

#[rstest]
#[case::string("types.string", "{string} p")]
#[case::identifier("types.identifier", "{string} p")]
#[case::identifier_number("types.identifierNumber", "{number} p")]
#[case::number("types.number", "{number} p")]
#[case::finite("types.finite", "{number} p")]
#[case::float("types.float", "{number} p")]
#[case::integer("types.integer", "{integer} p")]
#[case::boolean("types.boolean", "{boolean} p")]
#[case::date("types.Date", "{Date} p")]
#[case::null("types.null", "{null} p")]
#[case::undefined("types.undefined", "{undefined} p")]
#[case::string_default("'hello'", "{string} p")]
#[case::number_default("0", "{number} p")]
#[case::boolean_default("true", "{boolean} p")]
#[case::template_default("`x`", "{string} p")]
#[case::array("types.array(types.string)", "{string[]} p")]
#[case::nested_array("types.array(types.array(types.string))", "{string[][]} p")]
#[case::map("types.map(types.number)", "{Map<*,number>} p")]
#[case::optional("types.optional(types.string, '')", "{string} [p]")]
#[case::maybe("types.maybe(types.string)", "{string} [p]")]
#[case::maybe_null("types.maybeNull(types.string)", "{?string} [p]")]
#[case::nullable_elements("types.array(types.maybeNull(types.string))", "{(?string)[]} p")]
#[case::optional_inside_array("types.array(types.optional(types.number, 0))", "{number[]} p")]
#[case::literal_string("types.literal('a')", "{string} p")]
#[case::literal_number("types.literal(1)", "{number} p")]
#[case::enumeration("types.enumeration(['a', 'b'])", "{string} p")]
#[case::named_enumeration("types.enumeration('Kind', ['a', 'b'])", "{string} p")]
#[case::refinement("types.refinement(types.number, n => n > 0)", "{number} p")]
#[case::named_refinement("types.refinement('Positive', types.number, n => n > 0)", "{number} p")]
#[case::late_expression("types.late(() => types.string)", "{string} p")]
#[case::late_block("types.late(() => { return types.number })", "{number} p")]
#[case::late_empty("types.late(() => {})", "{*} p")]
#[case::frozen_call("types.frozen()", "{*} p")]
#[case::frozen_uncalled("types.frozen", "{*} p")]
#[case::frozen_typed("types.frozen(types.string)", "{string} p")]
#[case::union("types.union(types.string, types.number)", "{*} p")]
#[case::custom_named("types.custom({ name: 'Decimal' })", "{Decimal} p")]
#[case::custom_unnamed("types.custom({})", "{*} p")]
#[case::snapshot_processor("types.snapshotProcessor(types.string, {})", "{string} p")]
#[case::safe_reference("types.safeReference(Item)", "{Item} p")]
#[case::unknown_member("types.bogus", "{*} p")]
#[case::unknown_call("types.bogus(types.string)", "{*} p")]
#[case::parenthesised("(types.string)", "{string} p")]
fn test_property_rendering(#[case] type_source: &str, #[case] expected: &str) {
    assert_eq!(rendered(type_source), expected);
}

#[test]
fn test_custom_namespace() {
    let options = AnalysisOptions::default().with_namespace("t");
    let analysis = analysis_with_options(
        "const A = t.model('A', { a: t.array(t.string), b: types.string })",
        &options,
    );
    let a = analysis.model_by_name("A").unwrap();
    assert_eq!(a.properties["a"].kind, TypeKind::Array);
    // `types` is no longer the vocabulary, so this is just an unknown path
    assert_eq!(a.properties["b"].kind, TypeKind::Named("types.string".into()));
}

#[test]
fn test_shorthand_property_resolves_name() {
    let analysis = analysis_from_source(
        "const Item = types.model('Item', {})\nconst List = types.model('List', { Item })",
    );
    let list = analysis.model_by_name("List").unwrap();
    assert_eq!(analysis.project(&list.properties["Item"]).type_name, "Item");
}
