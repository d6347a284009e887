//! Support for the [`either`](::either) crate, allowing two parsers of
//! the same signature to be selected between at runtime without boxing.

use super::*;
use ::either::Either;

/// Run whichever parser the `Either` holds.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// use either::Either;
///
/// let upper = filter(char::is_ascii_uppercase);
/// let lower = filter(char::is_ascii_lowercase);
/// let cased = |want_upper: bool| {
///     if want_upper {
///         Either::Left(upper)
///     } else {
///         Either::Right(lower)
///     }
/// };
///
/// assert_eq!(cased(true).parse("F").into_result(), Ok('F'));
/// assert_eq!(cased(false).parse("f").into_result(), Ok('f'));
/// assert!(cased(true).parse("f").is_failure());
/// ```
impl<T, O, L, R> Parser<T, O> for Either<L, R>
where
    L: Parser<T, O>,
    R: Parser<T, O>,
{
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        match self {
            Either::Left(l) => l.go(input),
            Either::Right(r) => r.go(input),
        }
    }

    fn describe(&self) -> String {
        match self {
            Either::Left(l) => l.describe(),
            Either::Right(r) => r.describe(),
        }
    }
}
