use test_case::test_case;
use weft::prelude::*;

fn digit() -> impl Parser<char, i64> + Clone {
    text::digit().map(|c| i64::from(c.to_digit(10).unwrap()))
}

#[test]
fn single_digit() {
    match digit().parse("7") {
        ParseResult::Success { rest, value } => {
            assert_eq!(value, 7);
            assert_eq!(rest.location().offset(), 1);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn digit_mismatch_reports_entry_location() {
    match digit().parse("ab") {
        ParseResult::Failure(m) => {
            assert_eq!(m.expected, "digit");
            assert_eq!(m.at.offset(), 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn many_collects_until_mismatch() {
    match digit().many().parse("12") {
        ParseResult::Success { rest, value } => {
            assert_eq!(value, vec![1, 2]);
            assert_eq!(rest.location().offset(), 2);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn many_accepts_nothing() {
    match digit().many().parse("") {
        ParseResult::Success { rest, value } => {
            assert!(value.is_empty());
            assert_eq!(rest.location().offset(), 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn many_rejects_non_consuming_inner_parser() {
    let result = <weft::primitive::Empty as Parser<char, ()>>::many(empty()).parse("abc");
    assert!(result.is_error());
    let m = result.mismatch().unwrap();
    assert!(m.expected.contains("non-consuming"));
    assert_eq!(m.at.offset(), 0);
}

#[test]
fn many1_requires_one() {
    assert!(digit().many1().parse("x1").is_failure());
    assert_eq!(digit().many1().parse("12x").into_result(), Ok(vec![1, 2]));
}

// The repetition count must land in the range; too few is a failure at
// the position the repetition started from, extra input is left alone.
#[test_case("", None ; "empty input is below the minimum")]
#[test_case("a", None ; "one is below the minimum")]
#[test_case("aa", Some(2) ; "minimum")]
#[test_case("aaa", Some(3) ; "within range")]
#[test_case("aaaa", Some(4) ; "maximum")]
#[test_case("aaaaa", Some(4) ; "surplus input is not consumed")]
fn repeated_range(input: &str, expected: Option<usize>) {
    match just('a').repeated(2..=4).parse(input) {
        ParseResult::Success { rest, value } => {
            assert_eq!(Some(value.len()), expected);
            assert_eq!(rest.location().offset(), value.len());
        }
        ParseResult::Failure(m) => {
            assert_eq!(expected, None);
            assert_eq!(m.at.offset(), 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn repeated_empty_range_matches_nothing() {
    match just('a').repeated(3..=2).parse("aaaa") {
        ParseResult::Success { rest, value } => {
            assert!(value.is_empty());
            assert_eq!(rest.location().offset(), 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn exactly_matches_a_fixed_count() {
    assert_eq!(
        just('a').exactly(3).parse("aaa").into_result(),
        Ok(vec!['a'; 3])
    );
    assert!(just('a').exactly(3).parse("aa").is_failure());
}

#[test]
fn choice_reports_last_failure() {
    let p = choice([just('a').boxed(), just('b').boxed()]);
    match p.parse("c") {
        ParseResult::Failure(m) => {
            assert_eq!(m.expected, "'b'");
            assert_eq!(m.at.offset(), 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn choice_stops_at_first_success() {
    let p = choice([just('a').to(1).boxed(), any().to(2).boxed()]);
    assert_eq!(p.parse("a").into_result(), Ok(1));
    assert_eq!(p.parse("b").into_result(), Ok(2));
}

#[test]
fn empty_choice_fails() {
    let p = choice(Vec::<Boxed<char, char>>::new());
    match p.parse("x") {
        ParseResult::Failure(m) => assert_eq!(m.expected, "<empty choice>"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn sequence_threads_input_through() {
    let p = sequence("ab".chars().map(|c| just(c).boxed()));
    match p.parse("abc") {
        ParseResult::Success { rest, value } => {
            assert_eq!(value, vec!['a', 'b']);
            assert_eq!(rest.location().offset(), 2);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn empty_sequence_succeeds_in_place() {
    let p = sequence(Vec::<Boxed<char, char>>::new());
    match p.parse("xyz") {
        ParseResult::Success { rest, value } => {
            assert!(value.is_empty());
            assert_eq!(rest.location().offset(), 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn or_else_never_fails() {
    let p = digit().or_else(0);
    assert_eq!(p.parse("5").into_result(), Ok(5));
    match p.parse("x") {
        ParseResult::Success { rest, value } => {
            assert_eq!(value, 0);
            assert_eq!(rest.location().offset(), 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn or_else_passes_committed_errors_through() {
    let p = digit().must().or_else(0);
    assert!(p.parse("x").is_error());
}

#[test]
fn or_not_leaves_input_on_failure() {
    match just('-').or_not().parse("5") {
        ParseResult::Success { rest, value } => {
            assert_eq!(value, None);
            assert_eq!(rest.location().offset(), 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn error_absorbs_through_alternation() {
    // `must` commits the left branch, so the right branch is never tried.
    let p = just('a').must().or(just('b'));
    let result = p.parse("b");
    assert!(result.is_error());
    assert_eq!(result.mismatch().unwrap().expected, "'a'");
}

#[test]
fn must_relocates_to_its_entry() {
    let p = just('a').ignore_then(digit().must());
    match p.parse("ax") {
        ParseResult::Error(m) => {
            assert_eq!(m.expected, "digit");
            assert_eq!(m.at.offset(), 1);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn must_leaves_success_and_error_alone() {
    assert_eq!(digit().must().parse("3").into_result(), Ok(3));
    // Already an error: location and text are preserved.
    let inner = just('a').ignore_then(digit().must());
    let m = match inner.must().parse("ax") {
        ParseResult::Error(m) => m,
        other => panic!("unexpected result: {:?}", other),
    };
    assert_eq!(m.at.offset(), 1);
}

#[test]
fn filter_rejects_at_entry() {
    let even = digit().filter(|n| n % 2 == 0);
    assert_eq!(even.parse("4").into_result(), Ok(4));
    match even.parse("3") {
        ParseResult::Failure(m) => {
            assert_eq!(m.expected, "filter");
            assert_eq!(m.at.offset(), 0);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn then_threads_sources() {
    match digit().then(digit()).parse("12") {
        ParseResult::Success { rest, value } => {
            assert_eq!(value, (1, 2));
            assert_eq!(rest.location().offset(), 2);
        }
        other => panic!("unexpected result: {:?}", other),
    }
    // A failure in the second half carries its own position.
    match digit().then(digit()).parse("1x") {
        ParseResult::Failure(m) => assert_eq!(m.at.offset(), 1),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn then_with_picks_the_next_parser() {
    let run = digit().then_with(|n| just('x').repeated(n as usize..=n as usize));
    assert_eq!(run.parse("2xx").into_result(), Ok(vec!['x'; 2]));
    assert!(run.parse("2x").is_failure());
}

#[test]
fn separated_by_keeps_values_only() {
    let csv = digit().separated_by(just(','));
    assert_eq!(csv.parse("1,2,3").into_result(), Ok(vec![1, 2, 3]));
    match csv.parse("1,2,") {
        ParseResult::Success { rest, value } => {
            assert_eq!(value, vec![1, 2]);
            // The trailing separator is left unconsumed.
            assert_eq!(rest.location().offset(), 3);
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(csv.parse("").into_result(), Ok(vec![]));
}

#[test]
fn joined_by_interleaves_flat() {
    let listing = digit().joined_by(just(',').to(-1));
    assert_eq!(listing.parse("1,2,3").into_result(), Ok(vec![1, -1, 2, -1, 3]));
    // Odd length whenever non-empty.
    assert_eq!(listing.parse("1").into_result(), Ok(vec![1]));
    assert_eq!(listing.parse("x").into_result(), Ok(vec![]));
}

fn add(a: i64, b: i64) -> i64 {
    a + b
}

fn sub(a: i64, b: i64) -> i64 {
    a - b
}

#[test]
fn folded_by_groups_left() {
    let p = digit().folded_by(just('-').to(sub as fn(i64, i64) -> i64));
    // (8 - 3) - 2
    assert_eq!(p.parse("8-3-2").into_result(), Ok(3));
}

#[test]
fn rfolded_by_groups_right() {
    let p = digit().rfolded_by(just('-').to(sub as fn(i64, i64) -> i64));
    // 8 - (3 - 2)
    assert_eq!(p.parse("8-3-2").into_result(), Ok(7));
}

#[test]
fn folds_mix_operators() {
    let op = choice([
        just('+').to(add as fn(i64, i64) -> i64).boxed(),
        just('-').to(sub as fn(i64, i64) -> i64).boxed(),
    ]);
    let p = digit().folded_by(op);
    assert_eq!(p.parse("9-4+2").into_result(), Ok(7));
}

#[test]
fn folded_by_requires_a_first_element() {
    let p = digit().folded_by(just('+').to(add as fn(i64, i64) -> i64));
    assert!(p.parse("+1").is_failure());
}

#[test]
fn and_is_keeps_base_consumption() {
    let p = just('a').and_is(filter(|c: &char| c.is_alphabetic()));
    match p.parse("ab") {
        ParseResult::Success { rest, value } => {
            assert_eq!(value, 'a');
            // Only the base parser consumes.
            assert_eq!(rest.location().offset(), 1);
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn and_is_propagates_aux_verdict() {
    let p = just('a').and_is(just('b'));
    assert!(p.parse("a").is_failure());
    let committed = just('a').and_is(just('b').must());
    assert!(committed.parse("a").is_error());
}

#[test]
fn parsing_is_pure() {
    let p = digit().then_ignore(just('+').or_not()).many();
    let first = p.parse("1+2+3");
    let second = p.parse("1+2+3");
    assert_eq!(first, second);
    assert_eq!(first.into_result(), Ok(vec![1, 2, 3]));
}

#[test]
fn token_list_and_array_inputs() {
    #[derive(Clone, Debug, PartialEq)]
    enum Tok {
        Num(i64),
        Plus,
    }

    let num = filter(|t: &Tok| matches!(t, Tok::Num(_))).map(|t| match t {
        Tok::Num(n) => n,
        Tok::Plus => unreachable!(),
    });
    let sum = num.clone().then_ignore(just(Tok::Plus)).then(num);

    let tokens = vec![Tok::Num(1), Tok::Plus, Tok::Num(2)];
    assert_eq!(sum.parse(tokens.clone()).into_result(), Ok((1, 2)));
    assert_eq!(sum.parse(tokens.as_slice()).into_result(), Ok((1, 2)));
    assert_eq!(
        sum.parse([Tok::Num(3), Tok::Plus, Tok::Num(4)]).into_result(),
        Ok((3, 4))
    );
}
