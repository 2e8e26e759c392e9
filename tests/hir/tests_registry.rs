//! Declaration discovery: ids, names, bindings and which models get a block.

#![allow(clippy::unwrap_used)]

use mstdoc::hir::{DeclKind, ModelRegistry, Vocabulary, codes};
use mstdoc::parser::{AstNode, SourceFile, parse};
use mstdoc::{ModelId, TypeKind};
use rstest::rstest;

use crate::helpers::analysis_helpers::{
    analysis_from_source, diagnostics_with_code, emit, typedef_labels,
};
use crate::helpers::source_fixtures::EXAMPLE_STORE;

fn discover(source: &str) -> ModelRegistry {
    let parse = parse(source);
    let file = SourceFile::cast(parse.syntax()).unwrap();
    ModelRegistry::discover(&file, &Vocabulary::default(), source)
}

#[test]
fn test_example_store_declarations_in_preorder() {
    let registry = discover(EXAMPLE_STORE);
    let kinds: Vec<_> = registry.declarations().iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DeclKind::Model,
            DeclKind::Model,
            DeclKind::Model,
            DeclKind::Compose,
            DeclKind::Compose,
        ]
    );
    assert_eq!(registry.model_bound_to("ExampleStore"), Some(ModelId::new(0)));
}

#[test]
fn test_forward_reference_resolves() {
    let analysis = analysis_from_source(
        "const A = types.model('A', { b: types.array(B) })\n\
         const B = types.model('B', { a: types.maybe(A) })",
    );
    let a = analysis.model_by_name("A").unwrap();
    let b = analysis.model_by_name("B").unwrap();
    assert_eq!(analysis.project(&a.properties["b"]).type_name, "B[]");
    assert_eq!(analysis.project(&b.properties["a"]).type_name, "A");
    assert!(analysis.diagnostics().is_empty());
}

#[test]
fn test_anonymous_labels() {
    let output = emit(
        "const Bound = types.model({ x: types.string })\n\
         types.model({ y: types.number })",
    );
    assert_eq!(typedef_labels(&output), vec!["Bound", "Model1"]);
}

#[test]
fn test_placeholder_avoids_identifiers_in_source() {
    let output = emit("const Model0 = 1\ntypes.model({ y: types.number })");
    assert_eq!(typedef_labels(&output), vec!["Model0_"]);
}

#[test]
fn test_declared_name_beats_binding() {
    let analysis = analysis_from_source("const TodoModel = types.model('Todo', {})");
    let model = &analysis.models()[0];
    assert_eq!(model.label(), "Todo");
    assert_eq!(model.binding.as_deref(), Some("TodoModel"));
    assert_eq!(typedef_labels(&analysis.emit()), vec!["Todo"]);
}

#[test]
fn test_named_chain_renames() {
    let output = emit("const A = types.model({ x: types.string }).named('Renamed')");
    assert_eq!(typedef_labels(&output), vec!["Renamed"]);
}

#[test]
fn test_referenced_anonymous_model_is_inlined() {
    let analysis = analysis_from_source(
        "types.model('Root', {\n  child: types.model({ a: types.string, b: types.maybe(types.number) }),\n})",
    );
    assert_eq!(analysis.models().len(), 2);
    let child = &analysis.models()[1];
    assert!(child.is_anonymous() && child.referenced);
    assert!(!child.is_emitted());

    let output = analysis.emit();
    assert_eq!(typedef_labels(&output), vec!["Root"]);
    assert!(output.contains("* @property {{a:string,[b]:number}} child\n"));
}

#[test]
fn test_anonymous_models_in_union_stay_top_level() {
    let output = emit("types.model('Root', { u: types.union(types.model({ a: types.string }), X) })");
    assert_eq!(typedef_labels(&output), vec!["Root", "Model1"]);
}

#[test]
fn test_binding_through_member_assignment() {
    let analysis = analysis_from_source(
        "exports.Todo = types.model({ title: types.string })\n\
         const List = types.model('List', { items: types.array(exports.Todo) })",
    );
    let list = analysis.model_by_name("List").unwrap();
    assert_eq!(list.properties["items"].children[0].kind, TypeKind::Model(ModelId::new(0)));
    assert_eq!(analysis.models()[0].label(), "Todo");
    assert!(analysis.diagnostics().is_empty());
}

#[test]
fn test_member_binding_is_not_a_bare_name() {
    let analysis = analysis_from_source(
        "stores.Todo = types.model({ title: types.string })\n\
         const List = types.model('List', { items: types.array(Todo) })",
    );
    let list = analysis.model_by_name("List").unwrap();
    assert_eq!(list.properties["items"].children[0].kind, TypeKind::Named("Todo".into()));
    assert_eq!(diagnostics_with_code(&analysis, codes::UNRESOLVED_REFERENCE).len(), 1);
}

#[test]
fn test_member_binding_as_composition_base() {
    let analysis = analysis_from_source(
        "app.models.Base = types.model('Base', { id: types.string })\n\
         const Child = types.compose('Child', app.models.Base, types.model({ n: types.number }))",
    );
    let child = analysis.model_by_name("Child").unwrap();
    let keys: Vec<_> = child.properties.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["id", "n"]);
    assert_eq!(child.parent_symbol(), None);
    assert!(analysis.diagnostics().is_empty());
}

#[rstest]
#[case::module_exports("module.exports = types.model({ x: types.string })")]
#[case::exports_default("exports.default = types.model({ x: types.string })")]
fn test_export_assignment_keeps_placeholder_label(#[case] source: &str) {
    assert_eq!(typedef_labels(&emit(source)), vec!["Model0"]);
}

#[test]
fn test_first_binding_wins() {
    let analysis = analysis_from_source(
        "let A = types.model('First', {})\n\
         A = types.model('Second', {})\n\
         const User = types.model('User', { a: A })",
    );
    let user = analysis.model_by_name("User").unwrap();
    assert_eq!(analysis.project(&user.properties["a"]).type_name, "First");
}

#[test]
fn test_anonymous_cycle_collapses_to_wildcard() {
    let analysis = analysis_from_source(
        "const A = types.model({ b: types.late(() => B) })\n\
         const B = types.model({ a: A })\n\
         const Root = types.model('Root', { a: A })",
    );
    let output = analysis.emit();
    assert_eq!(typedef_labels(&output), vec!["Root"]);
    assert!(output.contains("* @property {{b:{a:*}}} a\n"), "{output}");
}

#[test]
fn test_named_cycle_stays_symbolic() {
    let analysis = analysis_from_source(
        "const Node = types.model('Node', {\n\
           children: types.array(types.late(() => Node)),\n\
           parent: types.maybe(types.reference(types.late(() => Node))),\n\
         })",
    );
    let node = analysis.model_by_name("Node").unwrap();
    assert_eq!(analysis.project(&node.properties["children"]).type_name, "Node[]");
    let parent = analysis.project(&node.properties["parent"]);
    assert_eq!((parent.type_name.as_str(), parent.optional), ("Node", true));
}
