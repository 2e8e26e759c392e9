//! Parsing of the declaration shapes model sources are written in.

#![allow(clippy::unwrap_used)]

use mstdoc::parser::{AstNode, Expr, SourceFile, Stmt, parse};
use rstest::rstest;

use crate::helpers::source_fixtures::{EXAMPLE_STORE, TODO_STORE};

fn file(source: &str) -> SourceFile {
    let parse = parse(source);
    assert!(parse.ok(), "unexpected syntax errors: {:?}", parse.errors);
    SourceFile::cast(parse.syntax()).unwrap()
}

#[rstest]
#[case::const_binding("const A = types.model({})")]
#[case::let_binding("let A = types.model({})")]
#[case::export_const("export const A = types.model({})")]
#[case::export_default("export default types.model('A', {})")]
#[case::assignment("A = types.model({})")]
#[case::member_assignment("module.exports.A = types.model({})")]
#[case::bare_statement("types.model('A', {});")]
#[case::import_first("import { types } from 'mobx-state-tree';\ntypes.model({})")]
#[case::function_wrapper("function make() { return types.model({}) }")]
#[case::multiline_chain("const A = types\n  .model({})\n  .actions(self => ({}))\n  .views(self => ({}))")]
#[case::async_arrow("const f = async () => {}")]
#[case::generator("const g = function* () { yield 1 }")]
#[case::optional_chaining("const v = a?.b?.c")]
#[case::spread("const o = { ...base, x: 1 }")]
#[case::for_of("for (const t of todos) { t.done = true }")]
#[case::for_in_bare("for (k in obj) delete obj[k]")]
#[case::classic_for("for (let i = 0, n = xs.length; i < n; i += 1) {}")]
#[case::while_loop("while (node) node = node.parent")]
#[case::do_while("do { i++ } while (i < 3)")]
#[case::switch("switch (f) { case 'all': break; default: return 1 }")]
#[case::labeled_continue("rows: for (;;) { continue rows }")]
#[case::try_catch("try { load() } catch (e) { throw e } finally { done() }")]
#[case::class_declaration("class Store extends Base { get x() { return {} } }")]
#[case::class_expression("const Store = class {}")]
#[case::regex_argument("const ok = /^[a-z\\/]+$/i.test(name)")]
#[case::regex_after_return("function f() { return /\\s+/g }")]
#[case::division_chain("const r = a / b / (c / 2)")]
fn test_parses_cleanly(#[case] source: &str) {
    file(source);
}

#[test]
fn test_fixtures_parse_cleanly() {
    assert!(file(EXAMPLE_STORE).statements().count() >= 2);
    assert!(file(TODO_STORE).statements().count() >= 3);
}

#[test]
fn test_chain_nests_calls_inside_out() {
    let file = file("const A = types.model({}).actions(self => ({})).views(self => ({}))");
    let Some(Stmt::VarDecl(decl)) = file.statements().next() else {
        panic!("expected a declaration");
    };
    let init = decl.declarators().next().unwrap().initializer().unwrap();
    let Expr::Call(outer) = init else {
        panic!("expected a call");
    };
    assert_eq!(outer.method_name().as_deref(), Some("views"));

    let Some(Expr::Member(member)) = outer.callee() else {
        panic!("expected a member callee");
    };
    let Some(Expr::Call(inner)) = member.object() else {
        panic!("expected a chained call");
    };
    assert_eq!(inner.method_name().as_deref(), Some("actions"));
}

#[test]
fn test_export_default_expression() {
    let file = file("export default ExampleStore;");
    let Some(Stmt::Export(export)) = file.statements().next() else {
        panic!("expected an export");
    };
    assert!(export.is_default());
    assert_eq!(export.default_expr().and_then(|e| e.path()).as_deref(), Some("ExampleStore"));
}

#[test]
fn test_builder_body_forms() {
    let file = file("x(self => ({ a() {} }))\nx(self => { return { b: () => {} } })");
    let arrows: Vec<_> = file
        .syntax()
        .descendants()
        .filter_map(mstdoc::parser::ArrowFn::cast)
        .collect();
    assert!(arrows.len() >= 3);
    assert!(arrows.iter().all(|arrow| arrow.body().is_some()));
}

#[test]
fn test_recovers_from_stray_tokens() {
    let parse = parse("const x = a # b;\nconst A = types.model('A', {})");
    assert!(!parse.ok());
    let file = SourceFile::cast(parse.syntax()).unwrap();
    let declared = file
        .statements()
        .any(|stmt| matches!(stmt, Stmt::VarDecl(_)));
    assert!(declared, "declaration after the error should survive");
}

#[test]
fn test_tree_is_lossless() {
    let parse = parse(TODO_STORE);
    assert_eq!(parse.syntax().text().to_string(), TODO_STORE);
}

#[test]
fn test_statements_after_control_flow_survive() {
    let file = file(
        "for (const t of todos) {}\n\
         switch (x) { case 1: break }\n\
         const A = types.model('A', { re: /x/ })",
    );
    let declared = file
        .statements()
        .any(|stmt| matches!(stmt, Stmt::VarDecl(_)));
    assert!(declared);
}
