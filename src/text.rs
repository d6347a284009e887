//! Text-specific parsers and extensions for `char`-token grammars.

use super::*;
use crate::primitive::{filter, just, Filter};

/// The type of a parser that accepts (and ignores) any number of
/// whitespace characters.
pub type Padding = Ignored<Many<Filter<fn(&char) -> bool>>, Vec<char>>;

/// The type of a parser that accepts (and ignores) whitespace before and
/// after another pattern. See [`TextParser::padded`].
pub type Padded<P, O> = ThenIgnore<IgnoreThen<Padding, P, (), O>, Padding, O, ()>;

/// A trait containing text-specific functionality that extends the
/// [`Parser`] trait.
pub trait TextParser<O>: Parser<char, O> {
    /// Parse a pattern, allowing whitespace both before and after.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let spaced = text::ident().padded();
    ///
    /// assert_eq!(spaced.parse("  hello  ").into_result(), Ok("hello".to_string()));
    /// ```
    fn padded(self) -> Padded<Self, O>
    where
        Self: Sized,
    {
        whitespace().ignore_then(self).then_ignore(whitespace())
    }
}

impl<O, P: Parser<char, O>> TextParser<O> for P {}

/// A parser that accepts (and ignores) any number of whitespace
/// characters.
pub fn whitespace() -> Padding {
    filter((|c: &char| c.is_whitespace()) as fn(&char) -> bool)
        .many()
        .ignored()
}

/// A parser that accepts any newline character or character sequence.
pub fn newline() -> impl Parser<char, ()> + Clone {
    just('\r')
        .or_not()
        .ignore_then(just('\n'))
        .or(just('\x0B')) // Vertical tab
        .or(just('\x0C')) // Form feed
        .or(just('\r'))
        .or(just('\u{0085}')) // Next line
        .or(just('\u{2028}')) // Line separator
        .or(just('\u{2029}')) // Paragraph separator
        .ignored()
        .labelled("newline")
}

/// A parser that accepts a single ASCII digit.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// assert_eq!(text::digit().parse("7").into_result(), Ok('7'));
/// assert_eq!(
///     text::digit().parse("ab").into_result().unwrap_err().expected,
///     "digit",
/// );
/// ```
pub fn digit() -> impl Parser<char, char> + Clone {
    filter(|c: &char| c.is_ascii_digit()).labelled("digit")
}

/// A parser that accepts one or more ASCII digits.
pub fn digits() -> impl Parser<char, String> + Clone {
    filter(|c: &char| c.is_ascii_digit())
        .many1()
        .collect::<String>()
        .labelled("digits")
}

/// A parser that accepts a positive integer.
///
/// An integer is a non-empty sequence of ASCII digits whose first digit is
/// non-zero, or the single digit `0`.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// assert_eq!(text::int().parse("42").into_result(), Ok("42".to_string()));
/// // No leading zeroes: only the '0' itself is consumed.
/// assert_eq!(text::int().parse("042").into_result(), Ok("0".to_string()));
/// ```
pub fn int() -> impl Parser<char, String> + Clone {
    filter(|c: &char| c.is_ascii_digit() && *c != '0')
        .then(filter(|c: &char| c.is_ascii_digit()).many())
        .map(|(first, rest)| core::iter::once(first).chain(rest).collect())
        .or(just('0').map(String::from))
        .labelled("integer")
}

/// A parser that accepts a C-style identifier: an ASCII letter or
/// underscore, followed by any number of letters, digits or underscores.
pub fn ident() -> impl Parser<char, String> + Clone {
    filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .then(filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_').many())
        .map(|(first, rest)| core::iter::once(first).chain(rest).collect())
        .labelled("identifier")
}

/// A parser that accepts the given word as a whole identifier, so that
/// `keyword("let")` does not match the start of `letter`.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// let kw = text::keyword("let");
///
/// assert!(kw.parse("let x").is_success());
/// assert!(kw.parse("letter").is_failure());
/// ```
pub fn keyword(word: &'static str) -> impl Parser<char, ()> + Clone {
    ident()
        .filter(move |s: &String| s.as_str() == word)
        .ignored()
        .labelled(word)
}
