//! Lexer tests over whole declaration snippets.

#![allow(clippy::unwrap_used)]

use mstdoc::parser::{SyntaxKind, tokenize};
use rstest::rstest;

fn significant(source: &str) -> Vec<SyntaxKind> {
    tokenize(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

#[test]
fn test_lexing_is_lossless() {
    let source = "const A = types.model('A', {\n  // note\n  x: types.string, /* y */\n})";
    let rebuilt: String = tokenize(source).iter().map(|t| t.text).collect();
    assert_eq!(rebuilt, source);
}

#[test]
fn test_offsets_are_contiguous() {
    let tokens = tokenize("a.b(`t`, 1.5)");
    let mut expected = 0u32;
    for token in &tokens {
        assert_eq!(u32::from(token.offset), expected);
        expected += token.text.len() as u32;
    }
}

#[test]
fn test_member_call_shape() {
    assert_eq!(
        significant("types.array(Todo)"),
        vec![
            SyntaxKind::IDENT,
            SyntaxKind::DOT,
            SyntaxKind::IDENT,
            SyntaxKind::L_PAREN,
            SyntaxKind::IDENT,
            SyntaxKind::R_PAREN,
        ]
    );
}

#[rstest]
#[case("'single'", SyntaxKind::STRING)]
#[case("\"double\"", SyntaxKind::STRING)]
#[case("`template`", SyntaxKind::TEMPLATE)]
#[case("0xff", SyntaxKind::NUMBER)]
#[case("3.14", SyntaxKind::NUMBER)]
#[case("=>", SyntaxKind::FAT_ARROW)]
#[case("?.", SyntaxKind::QUESTION_DOT)]
#[case("...", SyntaxKind::DOT_DOT_DOT)]
#[case("null", SyntaxKind::NULL_KW)]
#[case("function", SyntaxKind::FUNCTION_KW)]
#[case("/[a-z]+/gi", SyntaxKind::REGEX)]
#[case("/=/", SyntaxKind::REGEX)]
#[case("do", SyntaxKind::DO_KW)]
#[case("finally", SyntaxKind::FINALLY_KW)]
fn test_single_token(#[case] source: &str, #[case] kind: SyntaxKind) {
    assert_eq!(significant(source), vec![kind]);
}

#[rstest]
#[case("get")]
#[case("set")]
#[case("async")]
#[case("flow")]
#[case("types")]
fn test_contextual_words_are_identifiers(#[case] source: &str) {
    assert_eq!(significant(source), vec![SyntaxKind::IDENT]);
}

#[rstest]
#[case::after_identifier("total / count", SyntaxKind::SLASH)]
#[case::after_call("f() / 2", SyntaxKind::SLASH)]
#[case::after_number("10 /2/ 5", SyntaxKind::SLASH)]
#[case::after_assignment("x = /2/", SyntaxKind::REGEX)]
#[case::after_paren_open("test(/a/)", SyntaxKind::REGEX)]
#[case::after_comma("f(a, /b/)", SyntaxKind::REGEX)]
#[case::after_return("return /r/", SyntaxKind::REGEX)]
fn test_slash_depends_on_preceding_token(#[case] source: &str, #[case] kind: SyntaxKind) {
    let first_slash = significant(source)
        .into_iter()
        .find(|k| matches!(k, SyntaxKind::SLASH | SyntaxKind::REGEX));
    assert_eq!(first_slash, Some(kind));
}
