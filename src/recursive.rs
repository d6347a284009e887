//! Recursion gadgets: [`defer`] for forward references and [`recursive`]
//! for self-referential grammars.
//!
//! Parsers are built bottom-up, which a recursive grammar cannot be. Both
//! gadgets break the cycle the same way: construction of the inner parser
//! is postponed until the first invocation and memoized from then on. The
//! memoization cell is initialised exactly once with a happens-before
//! publication, so a parser graph shared between threads may be first
//! invoked from any of them.

use super::*;
use std::sync::{Mutex, OnceLock};

/// See [`defer`].
pub struct Defer<F, P> {
    thunk: F,
    cell: OnceLock<P>,
}

impl<F: Clone, P> Clone for Defer<F, P> {
    fn clone(&self) -> Self {
        // The clone re-runs the thunk on its own first use.
        Self {
            thunk: self.thunk.clone(),
            cell: OnceLock::new(),
        }
    }
}

impl<T, O, P, F> Parser<T, O> for Defer<F, P>
where
    P: Parser<T, O>,
    F: Fn() -> P,
{
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        self.cell.get_or_init(&self.thunk).go(input)
    }

    // Deliberately opaque: the thunk may (indirectly) produce this very
    // parser, and a description built from children must stay finite.
    fn describe(&self) -> String {
        "<deferred>".to_string()
    }
}

/// A parser that calls a thunk for the real parser on first use, then
/// reuses it.
///
/// This is the way to reference a parser that is not yet defined at
/// construction time, such as the other half of a mutually recursive pair:
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// fn value() -> Boxed<char, i64> {
///     choice([
///         filter(|c: &char| c.is_ascii_digit())
///             .map(|c| i64::from(c.to_digit(10).unwrap()))
///             .boxed(),
///         array().boxed(),
///     ])
///     .boxed()
/// }
///
/// // `array` references `value` before `value` has been built: `defer`
/// // postpones the call until parse time.
/// fn array() -> Boxed<char, i64> {
///     just('[')
///         .ignore_then(defer(value).separated_by(just(',')))
///         .then_ignore(just(']'))
///         .map(|xs| xs.into_iter().sum())
///         .boxed()
/// }
///
/// assert_eq!(value().parse("[1,[2,3],4]").into_result(), Ok(10));
/// ```
pub fn defer<F, P>(thunk: F) -> Defer<F, P>
where
    F: Fn() -> P,
{
    Defer {
        thunk,
        cell: OnceLock::new(),
    }
}

type Make<T, O> = Box<dyn FnOnce(Recursive<T, O>) -> Boxed<T, O> + Send>;

struct RecursiveInner<T, O> {
    parser: OnceLock<Boxed<T, O>>,
    make: Mutex<Option<Make<T, O>>>,
}

/// See [`recursive`].
pub struct Recursive<T, O> {
    inner: Arc<RecursiveInner<T, O>>,
}

impl<T, O> Clone for Recursive<T, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, O> Parser<T, O> for Recursive<T, O> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        self.inner
            .parser
            .get_or_init(|| {
                let make = self
                    .inner
                    .make
                    .lock()
                    .expect("recursive parser poisoned")
                    .take()
                    .expect("recursive parser missing its definition");
                make(self.clone())
            })
            .go(input)
    }

    // Deliberately opaque: delegating to the body would recurse through
    // the self-reference forever.
    fn describe(&self) -> String {
        "<recursive>".to_string()
    }
}

/// Construct a recursive parser: one that may contain itself as part of
/// its own pattern.
///
/// The function receives a cloneable handle standing for the parser being
/// defined and must return the parser's body, which may embed the handle
/// anywhere a parser is expected. The function is only called on the first
/// invocation, never during construction, so it is free to reference
/// parsers defined after this one. The handle must not be used to *parse*
/// input before construction of the body has completed.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// // A digit, possibly wrapped in any number of balanced parentheses.
/// let expr = recursive(|expr| {
///     choice([
///         filter(|c: &char| c.is_ascii_digit())
///             .map(|c| i64::from(c.to_digit(10).unwrap()))
///             .boxed(),
///         just('(').ignore_then(expr).then_ignore(just(')')).boxed(),
///     ])
/// });
///
/// assert_eq!(expr.parse("((5))").into_result(), Ok(5));
/// assert!(expr.parse("((5)").is_failure());
/// ```
pub fn recursive<T, O, P, F>(f: F) -> Recursive<T, O>
where
    P: Parser<T, O> + Send + Sync + 'static,
    F: FnOnce(Recursive<T, O>) -> P + Send + 'static,
{
    Recursive {
        inner: Arc::new(RecursiveInner {
            parser: OnceLock::new(),
            make: Mutex::new(Some(Box::new(move |handle| f(handle).boxed()))),
        }),
    }
}
