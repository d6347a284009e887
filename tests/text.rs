use weft::prelude::*;

#[test]
fn whitespace_is_greedy_and_optional() {
    match text::whitespace().parse("  \t x") {
        ParseResult::Success { rest, .. } => assert_eq!(rest.location().offset(), 4),
        other => panic!("unexpected result: {:?}", other),
    }
    assert!(text::whitespace().parse("x").is_success());
}

#[test]
fn padded_strips_both_sides() {
    let word = text::ident().padded();
    assert_eq!(word.parse("  hello \n").into_result(), Ok("hello".to_string()));
    assert_eq!(word.parse("hello").into_result(), Ok("hello".to_string()));
}

#[test]
fn digits_and_int() {
    assert_eq!(text::digits().parse("007x").into_result(), Ok("007".to_string()));
    assert_eq!(text::int().parse("42").into_result(), Ok("42".to_string()));
    // Leading zeroes are not part of an integer.
    assert_eq!(text::int().parse("042").into_result(), Ok("0".to_string()));
    assert_eq!(
        text::int().parse("x").into_result().unwrap_err().expected,
        "integer"
    );
}

#[test]
fn ident_shape() {
    assert_eq!(text::ident().parse("_x1 y").into_result(), Ok("_x1".to_string()));
    assert!(text::ident().parse("1x").is_failure());
}

#[test]
fn keyword_matches_whole_words_only() {
    let kw = text::keyword("let");
    assert!(kw.parse("let x").is_success());
    assert!(kw.parse("letter").is_failure());
    assert!(kw.parse("lex").is_failure());
}

#[test]
fn newline_variants() {
    assert!(text::newline().parse("\n").is_success());
    assert!(text::newline().parse("\r\n").is_success());
    assert!(text::newline().parse("\r").is_success());
    assert!(text::newline().parse("x").is_failure());
}

#[test]
fn locations_in_text_are_line_aware() {
    let p = text::ident().padded().then(text::ident());
    match p.parse("one\ntwo three") {
        ParseResult::Success { rest, value } => {
            assert_eq!(value, ("one".to_string(), "two".to_string()));
            assert_eq!(rest.location().line_column(), Some((2, 4)));
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
