//! Token-level parsers, the leaves every grammar is built from.

use super::*;

/// See [`end`].
#[derive(Copy, Clone)]
pub struct End;

impl<T> Parser<T, ()> for End {
    fn go(&self, input: Source<T>) -> ParseResult<T, ()> {
        match input.head() {
            None => ParseResult::Success {
                rest: input,
                value: (),
            },
            Some(_) => ParseResult::Failure(Mismatch {
                expected: <Self as Parser<T, ()>>::describe(self),
                at: input.location(),
            }),
        }
    }

    fn describe(&self) -> String {
        "end of input".to_string()
    }
}

/// A parser that accepts only the end of input.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// assert!(end().parse("").is_success());
/// assert!(end().parse("hello").is_failure());
/// ```
pub fn end() -> End {
    End
}

/// See [`empty`].
#[derive(Copy, Clone)]
pub struct Empty;

impl<T> Parser<T, ()> for Empty {
    fn go(&self, input: Source<T>) -> ParseResult<T, ()> {
        ParseResult::Success {
            rest: input,
            value: (),
        }
    }

    fn describe(&self) -> String {
        "<empty>".to_string()
    }
}

/// A parser that parses no tokens and always succeeds.
pub fn empty() -> Empty {
    Empty
}

/// See [`just`].
#[derive(Copy, Clone)]
pub struct Just<T>(T);

impl<T: Clone + PartialEq + fmt::Debug> Parser<T, T> for Just<T> {
    fn go(&self, input: Source<T>) -> ParseResult<T, T> {
        match input.head() {
            Some(tok) if tok == &self.0 => {
                let value = tok.clone();
                ParseResult::Success {
                    rest: input.advance(),
                    value,
                }
            }
            _ => ParseResult::Failure(Mismatch {
                expected: self.describe(),
                at: input.location(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("{:?}", self.0)
    }
}

/// A parser that accepts only the given token.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// let question = just('?');
///
/// assert_eq!(question.parse("?").into_result(), Ok('?'));
/// assert!(question.parse("!").is_failure());
/// // Parsers do not eagerly consume input, so the '!' is simply left over.
/// assert_eq!(question.parse("?!").into_result(), Ok('?'));
/// // To insist on consuming everything, follow with `end`.
/// assert!(question.then_ignore(end()).parse("?!").is_failure());
/// ```
pub fn just<T: Clone + PartialEq + fmt::Debug>(token: T) -> Just<T> {
    Just(token)
}

/// See [`one_of`].
#[derive(Clone)]
pub struct OneOf<T>(Vec<T>);

impl<T: Clone + PartialEq + fmt::Debug> Parser<T, T> for OneOf<T> {
    fn go(&self, input: Source<T>) -> ParseResult<T, T> {
        match input.head() {
            Some(tok) if self.0.contains(tok) => {
                let value = tok.clone();
                ParseResult::Success {
                    rest: input.advance(),
                    value,
                }
            }
            _ => ParseResult::Failure(Mismatch {
                expected: self.describe(),
                at: input.location(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("one of {:?}", self.0)
    }
}

/// A parser that accepts any one of a set of specific tokens.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// let op = one_of("+-*/".chars());
///
/// assert_eq!(op.parse("*").into_result(), Ok('*'));
/// assert!(op.parse("x").is_failure());
/// ```
pub fn one_of<T: Clone + PartialEq + fmt::Debug>(tokens: impl IntoIterator<Item = T>) -> OneOf<T> {
    OneOf(tokens.into_iter().collect())
}

/// See [`none_of`].
#[derive(Clone)]
pub struct NoneOf<T>(Vec<T>);

impl<T: Clone + PartialEq + fmt::Debug> Parser<T, T> for NoneOf<T> {
    fn go(&self, input: Source<T>) -> ParseResult<T, T> {
        match input.head() {
            Some(tok) if !self.0.contains(tok) => {
                let value = tok.clone();
                ParseResult::Success {
                    rest: input.advance(),
                    value,
                }
            }
            _ => ParseResult::Failure(Mismatch {
                expected: self.describe(),
                at: input.location(),
            }),
        }
    }

    fn describe(&self) -> String {
        format!("none of {:?}", self.0)
    }
}

/// A parser that accepts any token *not* in a set of specific tokens.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// let string = just('"')
///     .ignore_then(none_of(['"']).many().collect::<String>())
///     .then_ignore(just('"'));
///
/// assert_eq!(string.parse("\"world\"").into_result(), Ok("world".to_string()));
/// ```
pub fn none_of<T: Clone + PartialEq + fmt::Debug>(tokens: impl IntoIterator<Item = T>) -> NoneOf<T> {
    NoneOf(tokens.into_iter().collect())
}

/// See [`filter`].
#[derive(Copy, Clone)]
pub struct Filter<F>(F);

impl<T: Clone, F: Fn(&T) -> bool> Parser<T, T> for Filter<F> {
    fn go(&self, input: Source<T>) -> ParseResult<T, T> {
        match input.head() {
            Some(tok) if (self.0)(tok) => {
                let value = tok.clone();
                ParseResult::Success {
                    rest: input.advance(),
                    value,
                }
            }
            _ => ParseResult::Failure(Mismatch {
                expected: self.describe(),
                at: input.location(),
            }),
        }
    }

    fn describe(&self) -> String {
        "<filter>".to_string()
    }
}

/// A parser that accepts a single token matching the given predicate.
///
/// Combine with [`Parser::labelled`] to give failures a better description
/// than the generic `<filter>`.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// let lowercase = filter(char::is_ascii_lowercase)
///     .many1()
///     .collect::<String>();
///
/// assert_eq!(lowercase.parse("hello").into_result(), Ok("hello".to_string()));
/// assert!(lowercase.parse("Hello").is_failure());
/// ```
pub fn filter<T, F: Fn(&T) -> bool>(f: F) -> Filter<F> {
    Filter(f)
}

/// See [`any`].
pub type Any<T> = Filter<fn(&T) -> bool>;

/// A parser that accepts any single token (but not the end of input).
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// assert_eq!(any().parse("7").into_result(), Ok('7'));
/// assert!(any::<char>().parse("").is_failure());
/// ```
pub fn any<T>() -> Any<T> {
    Filter(|_| true)
}

/// See [`seq`].
#[derive(Clone)]
pub struct Seq<T>(Vec<T>);

impl<T: Clone + PartialEq + fmt::Debug> Parser<T, ()> for Seq<T> {
    fn go(&self, input: Source<T>) -> ParseResult<T, ()> {
        let at = input.location();
        let mut src = input;
        for expected in &self.0 {
            match src.head() {
                Some(tok) if tok == expected => src = src.advance(),
                _ => {
                    return ParseResult::Failure(Mismatch {
                        expected: self.describe(),
                        at,
                    })
                }
            }
        }
        ParseResult::Success {
            rest: src,
            value: (),
        }
    }

    fn describe(&self) -> String {
        format!("{:?}", self.0)
    }
}

/// A parser that accepts only the given sequence of tokens.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// let hello = seq("Hello".chars());
///
/// assert!(hello.parse("Hello, world!").is_success());
/// assert!(hello.parse("Goodbye").is_failure());
/// ```
pub fn seq<T: Clone + PartialEq + fmt::Debug>(tokens: impl IntoIterator<Item = T>) -> Seq<T> {
    Seq(tokens.into_iter().collect())
}

/// See [`custom`].
#[derive(Copy, Clone)]
pub struct Custom<F>(F);

impl<T, O, F: Fn(Source<T>) -> ParseResult<T, O>> Parser<T, O> for Custom<F> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        (self.0)(input)
    }

    fn describe(&self) -> String {
        "<custom>".to_string()
    }
}

/// A parser wrapping a bare invocation function, for the rare pattern no
/// combinator expresses.
///
/// The function must uphold the [`Parser`] contract: purity, monotone
/// consumption, and non-success locations at the entry position.
pub fn custom<T, O, F: Fn(Source<T>) -> ParseResult<T, O>>(f: F) -> Custom<F> {
    Custom(f)
}
