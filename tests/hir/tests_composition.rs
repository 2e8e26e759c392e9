//! Composition: merge order, overrides, parents and cycles.

#![allow(clippy::unwrap_used)]

use mstdoc::hir::{Base, MethodKind, codes};
use mstdoc::{AnalysisOptions, TypeKind};

use crate::helpers::analysis_helpers::{
    analysis_from_source, analysis_with_options, diagnostics_with_code, typedef_block, typedef_labels,
};

const DOCUMENT: &str = r#"
const Entity = types
  .model("Entity", { id: types.identifier, label: types.string })
  .actions(self => ({ save() {} }));

const Timestamps = types.model("Timestamps", { createdAt: types.Date });

const Document = types
  .compose("Document", Entity, Timestamps, Mixins.Auditable)
  .props({ label: types.number })
  .views(self => ({ get title() { return self.label } }));
"#;

#[test]
fn test_merge_order_and_override() {
    let analysis = analysis_from_source(DOCUMENT);
    let doc = analysis.model_by_name("Document").unwrap();

    let keys: Vec<_> = doc.properties.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys, vec!["id", "label", "createdAt"]);
    assert_eq!(doc.properties["label"].kind, TypeKind::Number);
    assert_eq!(doc.actions.get("save"), Some(&MethodKind::PlainMethod));
    assert_eq!(doc.views.get("title"), Some(&MethodKind::AccessorGet));
    assert_eq!(doc.parent_symbol(), Some("Mixins.Auditable"));
}

#[test]
fn test_composed_block() {
    let output = analysis_from_source(DOCUMENT).emit();
    assert_eq!(typedef_labels(&output), vec!["Entity", "Timestamps", "Document"]);
    assert_eq!(
        typedef_block(&output, "Document").unwrap(),
        "* @typedef {Mixins.Auditable} Document\n\
         * @property {string} id\n\
         * @property {number} label\n\
         * @property {Date} createdAt\n\
         * @property {function} save\n\
         * @property {*} title\n\
         */\n"
    );
}

#[test]
fn test_bases_are_unchanged_by_composition() {
    let analysis = analysis_from_source(DOCUMENT);
    let entity = analysis.model_by_name("Entity").unwrap();
    assert_eq!(entity.properties["label"].kind, TypeKind::String);
    assert!(entity.views.is_empty());
}

#[test]
fn test_later_base_overrides_earlier() {
    let analysis = analysis_from_source(
        "const A = types.model({ x: types.string, y: types.string })\n\
         const B = types.model({ x: types.number })\n\
         const C = types.compose('C', A, B)",
    );
    let c = analysis.model_by_name("C").unwrap();
    assert_eq!(c.properties["x"].kind, TypeKind::Number);
    assert_eq!(c.properties["y"].kind, TypeKind::String);
    assert_eq!(c.bases.len(), 2);
    assert!(c.bases.iter().all(|b| matches!(b, Base::Model(_))));
    assert_eq!(c.parent_symbol(), None);
}

#[test]
fn test_default_parent_option() {
    let options = AnalysisOptions::default().with_default_parent("BaseModel");
    let analysis = analysis_with_options(
        "const A = types.model('A', {})\nconst C = types.compose('C', A)",
        &options,
    );
    assert!(analysis.emit().contains("* @typedef {BaseModel} C\n"));
}

#[test]
fn test_last_symbolic_base_is_parent() {
    let analysis = analysis_from_source("const C = types.compose('C', First, Second)");
    let c = analysis.model_by_name("C").unwrap();
    assert_eq!(c.parent_symbol(), Some("Second"));
    assert_eq!(diagnostics_with_code(&analysis, codes::UNRESOLVED_REFERENCE).len(), 2);
}

#[test]
fn test_inline_base_model() {
    let analysis = analysis_from_source(
        "const C = types.compose('C', types.model({ a: types.string }), Other)",
    );
    let output = analysis.emit();
    assert_eq!(typedef_labels(&output), vec!["C"]);
    let c = analysis.model_by_name("C").unwrap();
    assert_eq!(c.properties.len(), 1);
}

#[test]
fn test_composition_cycle_terminates() {
    let analysis = analysis_from_source(
        "const A = types.compose('A', B, types.model({ a: types.string }))\n\
         const B = types.compose('B', A)",
    );
    let cycles = diagnostics_with_code(&analysis, codes::CIRCULAR_COMPOSITION);
    assert_eq!(cycles.len(), 1);
    assert_eq!(&*cycles[0].message, "circular composition through 'A'");

    let a = analysis.model_by_name("A").unwrap();
    let b = analysis.model_by_name("B").unwrap();
    assert!(a.properties.contains_key("a"));
    assert_eq!(b.parent_symbol(), Some("A"));
    assert_eq!(typedef_labels(&analysis.emit()), vec!["A", "B"]);
}

#[test]
fn test_self_composition() {
    let analysis = analysis_from_source("const A = types.compose('A', A)");
    assert_eq!(diagnostics_with_code(&analysis, codes::CIRCULAR_COMPOSITION).len(), 1);
    assert_eq!(analysis.model_by_name("A").unwrap().parent_symbol(), Some("A"));
}

#[test]
fn test_non_model_base_is_structure_error() {
    let analysis = analysis_from_source("const C = types.compose('C', {}, 42)");
    assert_eq!(diagnostics_with_code(&analysis, codes::STRUCTURE).len(), 2);
    assert!(analysis.model_by_name("C").unwrap().bases.is_empty());
}
