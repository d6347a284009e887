//! A parser combinator library with explicit commit semantics, recursion
//! gadgets and operator-precedence tables.
//!
//! Parsers are small values combined into larger ones: a parser consumes a
//! [`Source`] of tokens and produces a [`ParseResult`], which is either a
//! [`Success`](ParseResult::Success) carrying a value and the remaining
//! input, a recoverable [`Failure`](ParseResult::Failure) that lets an
//! enclosing alternation try something else, or a committed
//! [`Error`](ParseResult::Error) that aborts the whole parse. Keeping the
//! two non-success flavours distinct is what lets grammars produce precise
//! diagnostics without giving up backtracking: a parser fails *softly*
//! until the grammar reaches a point of no return, where
//! [`must`](Parser::must) upgrades failures into errors.
//!
//! Input is never mutated. A [`Source`] is an immutable cursor, so trying
//! an alternative is as simple as handing the same cursor to another
//! parser, and every combinator threads the cursor of the last success on
//! to the next step.
//!
//! # Example
//!
//! A pocket calculator, using [`recursive`](recursive::recursive) for the
//! self-referential grammar and an [`OperatorTable`](operator::OperatorTable)
//! for precedence and associativity:
//!
//! ```
//! use weft::prelude::*;
//!
//! let digit = filter(|c: &char| c.is_ascii_digit())
//!     .labelled("digit")
//!     .map(|c| i64::from(c.to_digit(10).unwrap()));
//!
//! let expr = recursive(|expr| {
//!     let atom = choice([
//!         digit.boxed(),
//!         just('(').ignore_then(expr).then_ignore(just(')')).boxed(),
//!     ]);
//!
//!     OperatorTable::new(atom)
//!         .infix(just('*'), Assoc::Left, 8, |l, _, r| l * r)
//!         .infix(just('/'), Assoc::Left, 8, |l, _, r| l / r)
//!         .infix(just('+'), Assoc::Left, 7, |l, _, r| l + r)
//!         .infix(just('-'), Assoc::Left, 7, |l, _, r| l - r)
//!         .build()
//! });
//!
//! assert_eq!(expr.parse("(1+2)*3-4").into_result(), Ok(5));
//! ```
//!
//! # Design notes
//!
//! - Combinator graphs are immutable once built. A parser may be invoked
//!   any number of times, from any number of threads, on independent
//!   sources; the one-time initialisation inside
//!   [`defer`](recursive::defer) and [`recursive`](recursive::recursive)
//!   is published safely.
//! - Unbounded repetition refuses to loop over a parser that succeeds
//!   without consuming input; see [`Parser::many`].
//! - Descriptions ([`Parser::describe`]) and the `expected` text carried
//!   by failures exist for diagnostics only and never influence parsing.

#![deny(missing_docs)]

pub mod combinator;
pub mod either;
pub mod operator;
pub mod primitive;
pub mod recursive;
pub mod result;
pub mod source;
pub mod text;

pub use crate::{
    result::{Mismatch, ParseResult},
    source::{Location, Source},
};

use crate::combinator::*;
use core::{
    fmt,
    marker::PhantomData,
    ops::{Bound, RangeBounds},
};
use std::sync::Arc;

/// Commonly used functions, traits and types.
pub mod prelude {
    pub use crate::{
        combinator::{choice, sequence},
        operator::{Assoc, OperatorTable, DEFAULT_PRIORITY},
        primitive::{any, custom, empty, end, filter, just, none_of, one_of, seq},
        recursive::{defer, recursive, Recursive},
        result::{Mismatch, ParseResult},
        source::{Location, Source},
        text,
        text::TextParser,
        Boxed, Parser,
    };
}

/// A trait implemented by parsers.
///
/// A parser takes a [`Source`] of tokens of type `T` and attempts to turn a
/// prefix of them into a value of type `O`, reporting the outcome as a
/// [`ParseResult`]. Parsers are pure: invoking the same parser on sources
/// presenting the same tokens at the same position yields the same result,
/// so a parser may be run any number of times, including concurrently.
///
/// Two further guarantees hold for every combinator in this crate and
/// should hold for any manual implementation:
///
/// - **Monotone consumption**: a `Success` never rewinds; the returned
///   source is at or after the position the parser was invoked at.
/// - **Error absorption**: a committed [`Error`](ParseResult::Error)
///   from a sub-parser is returned unchanged, whatever the combinator.
///
/// Implementing the trait by hand is rarely necessary; compose the
/// provided combinators, or use [`custom`](crate::primitive::custom) for a
/// one-off.
pub trait Parser<T, O> {
    /// Invoke this parser at the position of the given source.
    ///
    /// This is the raw invocation contract; most callers want
    /// [`parse`](Parser::parse) instead.
    fn go(&self, input: Source<T>) -> ParseResult<T, O>;

    /// A human-readable description of what this parser accepts, built
    /// from its children. Used in diagnostics only; never parsed.
    fn describe(&self) -> String;

    /// Run this parser against an input.
    ///
    /// Anything convertible into a [`Source`] is accepted: string slices
    /// (for `char` parsers), vectors, slices and arrays of tokens.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// assert_eq!(just('a').parse("abc").into_result(), Ok('a'));
    ///
    /// let seven = just(7u8);
    /// assert_eq!(seven.parse(vec![7u8]).into_result(), Ok(7));
    /// assert_eq!(seven.parse([7u8, 8]).into_result(), Ok(7));
    /// ```
    fn parse<In: Into<Source<T>>>(&self, input: In) -> ParseResult<T, O>
    where
        Self: Sized,
    {
        self.go(input.into())
    }

    /// Map the output of this parser to another value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let digit = filter(|c: &char| c.is_ascii_digit())
    ///     .map(|c| c.to_digit(10).unwrap());
    ///
    /// assert_eq!(digit.parse("7").into_result(), Ok(7));
    /// ```
    fn map<U, F>(self, f: F) -> Map<Self, F, O>
    where
        Self: Sized,
        F: Fn(O) -> U,
    {
        Map(self, f, PhantomData)
    }

    /// Transform all outputs of this parser to a predetermined value.
    fn to<U>(self, x: U) -> To<Self, O, U>
    where
        Self: Sized,
        U: Clone,
    {
        To(self, x, PhantomData)
    }

    /// Ignore the output of this parser, yielding `()` instead.
    fn ignored(self) -> Ignored<Self, O>
    where
        Self: Sized,
    {
        To(self, (), PhantomData)
    }

    /// Replace the `expected` text of this parser's failures with a label,
    /// for more useful error messages.
    ///
    /// Only recoverable failures are relabelled; a committed
    /// [`Error`](ParseResult::Error) from within passes through untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let digit = filter(|c: &char| c.is_ascii_digit()).labelled("digit");
    ///
    /// assert_eq!(digit.parse("x").into_result().unwrap_err().expected, "digit");
    /// ```
    fn labelled<L>(self, label: L) -> Labelled<Self>
    where
        Self: Sized,
        L: Into<String>,
    {
        Labelled(self, label.into())
    }

    /// Accept the output of this parser only if it satisfies a predicate;
    /// otherwise fail at the position this parser started from.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let even = filter(|c: &char| c.is_ascii_digit())
    ///     .map(|c| c.to_digit(10).unwrap())
    ///     .filter(|n| n % 2 == 0);
    ///
    /// assert_eq!(even.parse("4").into_result(), Ok(4));
    /// assert!(even.parse("3").is_failure());
    /// ```
    fn filter<F>(self, pred: F) -> Filtered<Self, F>
    where
        Self: Sized,
        F: Fn(&O) -> bool,
    {
        Filtered(self, pred)
    }

    /// Parse one thing and then another, yielding both outputs as a pair.
    ///
    /// Longer sequences are built by nesting, and n-ary homogeneous
    /// sequences by [`sequence`](crate::combinator::sequence).
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let pair = just('a').then(just('b'));
    ///
    /// assert_eq!(pair.parse("ab").into_result(), Ok(('a', 'b')));
    /// assert!(pair.parse("ax").is_failure());
    /// ```
    fn then<U, Q>(self, q: Q) -> Then<Self, Q>
    where
        Self: Sized,
        Q: Parser<T, U>,
    {
        Then(self, q)
    }

    /// Parse one thing and then another, keeping only the first output.
    fn then_ignore<U, Q>(self, q: Q) -> ThenIgnore<Self, Q, O, U>
    where
        Self: Sized,
        Q: Parser<T, U>,
    {
        Map(Then(self, q), |(o, _)| o, PhantomData)
    }

    /// Parse one thing and then another, keeping only the second output.
    fn ignore_then<U, Q>(self, q: Q) -> IgnoreThen<Self, Q, O, U>
    where
        Self: Sized,
        Q: Parser<T, U>,
    {
        Map(Then(self, q), |(_, u)| u, PhantomData)
    }

    /// Use the output of this parser to decide what to parse next.
    ///
    /// On success, `f` is handed the output and must return the parser to
    /// run at the remaining input. Non-successes propagate.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// // A length-prefixed run: the leading digit says how many 'x's follow.
    /// let run = filter(|c: &char| c.is_ascii_digit())
    ///     .map(|c| c.to_digit(10).unwrap() as usize)
    ///     .then_with(|n| just('x').repeated(n..=n));
    ///
    /// assert_eq!(run.parse("3xxx").into_result(), Ok(vec!['x'; 3]));
    /// assert!(run.parse("3xx").is_failure());
    /// ```
    fn then_with<U, Q, F>(self, f: F) -> ThenWith<Self, F, O, Q>
    where
        Self: Sized,
        Q: Parser<T, U>,
        F: Fn(O) -> Q,
    {
        ThenWith(self, f, PhantomData)
    }

    /// If this parser fails, try another one from the same position.
    ///
    /// A committed [`Error`](ParseResult::Error) is *not* recovered from.
    /// When both alternatives fail, the failure of the last one is
    /// reported, it being the most recently attempted diagnostic.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let ab = just('a').or(just('b'));
    ///
    /// assert_eq!(ab.parse("a").into_result(), Ok('a'));
    /// assert_eq!(ab.parse("b").into_result(), Ok('b'));
    /// assert_eq!(ab.parse("c").into_result().unwrap_err().expected, "'b'");
    /// ```
    fn or<Q>(self, q: Q) -> Or<Self, Q>
    where
        Self: Sized,
        Q: Parser<T, O>,
    {
        Or(self, q)
    }

    /// Make this parser optional: failure becomes `None` with no input
    /// consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let sign = just('-').or_not();
    ///
    /// assert_eq!(sign.parse("-1").into_result(), Ok(Some('-')));
    /// assert_eq!(sign.parse("1").into_result(), Ok(None));
    /// ```
    fn or_not(self) -> OrNot<Self>
    where
        Self: Sized,
    {
        OrNot(self)
    }

    /// Recover from failure with a default value, consuming no input.
    ///
    /// The result is never a [`Failure`](ParseResult::Failure); a
    /// committed [`Error`](ParseResult::Error) still propagates.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let digit = filter(|c: &char| c.is_ascii_digit()).or_else('0');
    ///
    /// assert_eq!(digit.parse("7").into_result(), Ok('7'));
    /// assert_eq!(digit.parse("x").into_result(), Ok('0'));
    /// ```
    fn or_else(self, default: O) -> OrElse<Self, O>
    where
        Self: Sized,
        O: Clone,
    {
        OrElse(self, default)
    }

    /// Parse this pattern zero or more times, collecting the outputs.
    ///
    /// Repetition stops at the first failure, which is swallowed; a
    /// committed error propagates. An iteration that succeeds without
    /// consuming any input would repeat forever, so it is reported as an
    /// [`Error`](ParseResult::Error) naming the offending parser.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let digits = filter(|c: &char| c.is_ascii_digit()).many();
    ///
    /// assert_eq!(digits.parse("12").into_result(), Ok(vec!['1', '2']));
    /// assert_eq!(digits.parse("").into_result(), Ok(vec![]));
    ///
    /// // The non-consumption guard in action:
    /// assert!(Parser::<char, ()>::many(empty()).parse("12").is_error());
    /// ```
    fn many(self) -> Many<Self>
    where
        Self: Sized,
    {
        Many(self)
    }

    /// Parse this pattern one or more times, collecting the outputs.
    ///
    /// Fails exactly when the first attempt fails, with that attempt's
    /// diagnostic.
    fn many1(self) -> Many1<Self>
    where
        Self: Sized,
    {
        Many1(self)
    }

    /// Parse this pattern a bounded number of times.
    ///
    /// Accepts any range expression; `lo..=hi` parses at most `hi`
    /// repetitions and fails (at the starting position) if fewer than `lo`
    /// matched. An empty range succeeds with no output and consumes
    /// nothing. An unbounded upper end behaves like [`many`](Parser::many),
    /// including its non-consumption guard.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let run = just('a').repeated(2..=4);
    ///
    /// assert!(run.parse("a").is_failure());
    /// assert_eq!(run.parse("aaa").into_result(), Ok(vec!['a'; 3]));
    /// // No more than four are consumed, even if more would match.
    /// assert_eq!(run.parse("aaaaa").into_result(), Ok(vec!['a'; 4]));
    /// ```
    fn repeated<R>(self, range: R) -> Repeated<Self>
    where
        Self: Sized,
        R: RangeBounds<usize>,
    {
        let lo = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0,
        };
        let hi = match range.end_bound() {
            Bound::Included(&n) => Some(n),
            Bound::Excluded(&n) => Some(n.saturating_sub(1)),
            Bound::Unbounded => None,
        };
        Repeated {
            parser: self,
            lo,
            hi,
        }
    }

    /// Parse this pattern exactly `n` times. Shorthand for
    /// `repeated(n..=n)`.
    fn exactly(self, n: usize) -> Repeated<Self>
    where
        Self: Sized,
    {
        self.repeated(n..=n)
    }

    /// Parse this pattern separated by another, keeping only this
    /// pattern's outputs.
    ///
    /// The empty sequence is accepted. A trailing separator is left
    /// unconsumed.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let nums = filter(|c: &char| c.is_ascii_digit()).separated_by(just(','));
    ///
    /// assert_eq!(nums.parse("1,2,3").into_result(), Ok(vec!['1', '2', '3']));
    /// // The separator is only consumed when another element follows.
    /// assert_eq!(nums.parse("1,2,").into_result(), Ok(vec!['1', '2']));
    /// assert_eq!(nums.parse("").into_result(), Ok(vec![]));
    /// ```
    fn separated_by<U, S>(self, sep: S) -> SeparatedBy<Self, S, U>
    where
        Self: Sized,
        S: Parser<T, U>,
    {
        SeparatedBy(self, sep, PhantomData)
    }

    /// Parse this pattern separated by another of the same output type,
    /// keeping *all* outputs in one flat list.
    ///
    /// Values and separators interleave, so the list has odd length
    /// whenever it is non-empty. The empty sequence is accepted.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let listing = filter(|c: &char| c.is_ascii_digit()).joined_by(just(','));
    ///
    /// assert_eq!(listing.parse("1,2").into_result(), Ok(vec!['1', ',', '2']));
    /// ```
    fn joined_by<S>(self, sep: S) -> JoinedBy<Self, S>
    where
        Self: Sized,
        S: Parser<T, O>,
    {
        JoinedBy(self, sep)
    }

    /// Parse this pattern separated by operators, folding the outputs
    /// left-associatively.
    ///
    /// The separator parser yields the combining function itself, so
    /// different operators can fold differently within one chain. At least
    /// one element is required.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// fn add(a: u32, b: u32) -> u32 { a + b }
    /// fn sub(a: u32, b: u32) -> u32 { a - b }
    ///
    /// let digit = filter(|c: &char| c.is_ascii_digit())
    ///     .map(|c| c.to_digit(10).unwrap());
    /// let sum = digit.folded_by(choice([
    ///     just('+').to(add as fn(u32, u32) -> u32).boxed(),
    ///     just('-').to(sub as fn(u32, u32) -> u32).boxed(),
    /// ]));
    ///
    /// // Left-associative: (9 - 2) + 1.
    /// assert_eq!(sum.parse("9-2+1").into_result(), Ok(8));
    /// ```
    fn folded_by<F, S>(self, sep: S) -> FoldedBy<Self, S, F>
    where
        Self: Sized,
        S: Parser<T, F>,
        F: Fn(O, O) -> O,
    {
        FoldedBy(self, sep, PhantomData)
    }

    /// Parse this pattern separated by operators, folding the outputs
    /// right-associatively.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// fn pow(a: u32, b: u32) -> u32 { a.pow(b) }
    ///
    /// let digit = filter(|c: &char| c.is_ascii_digit())
    ///     .map(|c| c.to_digit(10).unwrap());
    /// let power = digit.rfolded_by(just('^').to(pow as fn(u32, u32) -> u32));
    ///
    /// // Right-associative: 2 ^ (3 ^ 2).
    /// assert_eq!(power.parse("2^3^2").into_result(), Ok(512));
    /// ```
    fn rfolded_by<F, S>(self, sep: S) -> RFoldedBy<Self, S, F>
    where
        Self: Sized,
        S: Parser<T, F>,
        F: Fn(O, O) -> O,
    {
        RFoldedBy(self, sep, PhantomData)
    }

    /// Require another parser to also match at the *same* position,
    /// without consuming its input.
    ///
    /// The auxiliary parser acts as intersection look-ahead: it is re-run
    /// from the position this parser started at, its output is discarded
    /// and its non-success propagates. Chain several calls for an n-way
    /// conjunction.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let word_start = filter(|c: &char| c.is_ascii_alphanumeric())
    ///     .and_is(filter(|c: &char| c.is_ascii_alphabetic()));
    ///
    /// assert_eq!(word_start.parse("a1").into_result(), Ok('a'));
    /// assert!(word_start.parse("1a").is_failure());
    /// ```
    fn and_is<U, Q>(self, aux: Q) -> AndIs<Self, Q, U>
    where
        Self: Sized,
        Q: Parser<T, U>,
    {
        AndIs(self, aux, PhantomData)
    }

    /// Commit to this parser: upgrade its recoverable failures into
    /// committed errors at the position it started from.
    ///
    /// Use this at a grammatical point of no return, so that enclosing
    /// alternations report the real problem instead of backtracking past
    /// it.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// // After '(', a digit must follow: stop `or`/`choice` from trying
    /// // other alternatives once the parenthesis is seen.
    /// let group = just('(')
    ///     .ignore_then(filter(|c: &char| c.is_ascii_digit()).must())
    ///     .then_ignore(just(')').must());
    ///
    /// assert!(group.parse("(4)").is_success());
    /// assert!(group.parse("(x").is_error());
    /// ```
    fn must(self) -> Must<Self>
    where
        Self: Sized,
    {
        Must(self)
    }

    /// Collect the output of this parser into any [`FromIterator`] type,
    /// most commonly a `String` from a `Vec<char>`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use weft::prelude::*;
    /// let word = filter(|c: &char| c.is_ascii_alphabetic())
    ///     .many1()
    ///     .collect::<String>();
    ///
    /// assert_eq!(word.parse("hello").into_result(), Ok("hello".to_string()));
    /// ```
    fn collect<C>(self) -> Map<Self, fn(O) -> C, O>
    where
        Self: Sized,
        O: IntoIterator,
        C: FromIterator<O::Item>,
    {
        Map(self, |xs| xs.into_iter().collect(), PhantomData)
    }

    /// Erase this parser's concrete type behind a cheaply cloneable
    /// handle.
    ///
    /// Boxing is how parsers of different concrete types meet in
    /// [`choice`](crate::combinator::choice) and
    /// [`sequence`](crate::combinator::sequence), and how recursive
    /// grammars tie the knot.
    fn boxed(self) -> Boxed<T, O>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Boxed {
            inner: Arc::new(self),
        }
    }
}

/// A type-erased, cheaply cloneable parser handle. See [`Parser::boxed`].
pub struct Boxed<T, O> {
    inner: Arc<dyn Parser<T, O> + Send + Sync>,
}

impl<T, O> Clone for Boxed<T, O> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, O> Parser<T, O> for Boxed<T, O> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        self.inner.go(input)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}
