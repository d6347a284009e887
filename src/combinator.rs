//! Combinator structs returned by the methods on [`Parser`], plus the
//! free-standing n-ary combinators [`choice`] and [`sequence`].
//!
//! Everything here follows the same conventions: a sub-parser's
//! [`Failure`](ParseResult::Failure) is returned as-is unless the
//! combinator exists to recover from it, an
//! [`Error`](ParseResult::Error) is always returned unchanged, and a
//! [`Success`](ParseResult::Success) threads its remaining input to the
//! next step.

use super::*;

/// See [`Parser::ignored`].
pub type Ignored<A, O> = To<A, O, ()>;

/// See [`Parser::then_ignore`].
pub type ThenIgnore<A, B, O, U> = Map<Then<A, B>, fn((O, U)) -> O, (O, U)>;

/// See [`Parser::ignore_then`].
pub type IgnoreThen<A, B, O, U> = Map<Then<A, B>, fn((O, U)) -> U, (O, U)>;

/// See [`Parser::map`].
pub struct Map<A, F, O>(pub(crate) A, pub(crate) F, pub(crate) PhantomData<O>);

impl<A: Copy, F: Copy, O> Copy for Map<A, F, O> {}
impl<A: Clone, F: Clone, O> Clone for Map<A, F, O> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<T, O, U, A: Parser<T, O>, F: Fn(O) -> U> Parser<T, U> for Map<A, F, O> {
    fn go(&self, input: Source<T>) -> ParseResult<T, U> {
        self.0.go(input).map(&self.1)
    }

    fn describe(&self) -> String {
        self.0.describe()
    }
}

/// See [`Parser::to`].
pub struct To<A, O, U>(pub(crate) A, pub(crate) U, pub(crate) PhantomData<O>);

impl<A: Copy, O, U: Copy> Copy for To<A, O, U> {}
impl<A: Clone, O, U: Clone> Clone for To<A, O, U> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<T, O, U: Clone, A: Parser<T, O>> Parser<T, U> for To<A, O, U> {
    fn go(&self, input: Source<T>) -> ParseResult<T, U> {
        self.0.go(input).map(|_| self.1.clone())
    }

    fn describe(&self) -> String {
        self.0.describe()
    }
}

/// See [`Parser::labelled`].
#[derive(Clone)]
pub struct Labelled<A>(pub(crate) A, pub(crate) String);

impl<T, O, A: Parser<T, O>> Parser<T, O> for Labelled<A> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        match self.0.go(input) {
            ParseResult::Failure(m) => ParseResult::Failure(Mismatch {
                expected: self.1.clone(),
                at: m.at,
            }),
            other => other,
        }
    }

    fn describe(&self) -> String {
        self.1.clone()
    }
}

/// See [`Parser::filter`].
#[derive(Copy, Clone)]
pub struct Filtered<A, F>(pub(crate) A, pub(crate) F);

impl<T, O, A: Parser<T, O>, F: Fn(&O) -> bool> Parser<T, O> for Filtered<A, F> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        let at = input.location();
        match self.0.go(input) {
            ParseResult::Success { rest, value } if (self.1)(&value) => {
                ParseResult::Success { rest, value }
            }
            ParseResult::Success { .. } => ParseResult::Failure(Mismatch {
                expected: "filter".to_string(),
                at,
            }),
            other => other,
        }
    }

    fn describe(&self) -> String {
        format!("{} (filtered)", self.0.describe())
    }
}

/// See [`Parser::then`].
#[derive(Copy, Clone)]
pub struct Then<A, B>(pub(crate) A, pub(crate) B);

impl<T, O, U, A: Parser<T, O>, B: Parser<T, U>> Parser<T, (O, U)> for Then<A, B> {
    fn go(&self, input: Source<T>) -> ParseResult<T, (O, U)> {
        match self.0.go(input) {
            ParseResult::Success { rest, value: a } => match self.1.go(rest) {
                ParseResult::Success { rest, value: b } => ParseResult::Success {
                    rest,
                    value: (a, b),
                },
                ParseResult::Failure(m) => ParseResult::Failure(m),
                ParseResult::Error(m) => ParseResult::Error(m),
            },
            ParseResult::Failure(m) => ParseResult::Failure(m),
            ParseResult::Error(m) => ParseResult::Error(m),
        }
    }

    fn describe(&self) -> String {
        format!("{} {}", self.0.describe(), self.1.describe())
    }
}

/// See [`Parser::then_with`].
pub struct ThenWith<A, F, O, Q>(pub(crate) A, pub(crate) F, pub(crate) PhantomData<(O, Q)>);

impl<A: Clone, F: Clone, O, Q> Clone for ThenWith<A, F, O, Q> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<T, O, U, Q, A, F> Parser<T, U> for ThenWith<A, F, O, Q>
where
    A: Parser<T, O>,
    Q: Parser<T, U>,
    F: Fn(O) -> Q,
{
    fn go(&self, input: Source<T>) -> ParseResult<T, U> {
        match self.0.go(input) {
            ParseResult::Success { rest, value } => (self.1)(value).go(rest),
            ParseResult::Failure(m) => ParseResult::Failure(m),
            ParseResult::Error(m) => ParseResult::Error(m),
        }
    }

    fn describe(&self) -> String {
        format!("{} ...", self.0.describe())
    }
}

/// See [`Parser::or`].
#[derive(Copy, Clone)]
pub struct Or<A, B>(pub(crate) A, pub(crate) B);

impl<T, O, A: Parser<T, O>, B: Parser<T, O>> Parser<T, O> for Or<A, B> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        match self.0.go(input.clone()) {
            // The failure of the second alternative, tried later, is the
            // one reported.
            ParseResult::Failure(_) => self.1.go(input),
            other => other,
        }
    }

    fn describe(&self) -> String {
        format!("({} | {})", self.0.describe(), self.1.describe())
    }
}

/// See [`choice`].
pub struct Choice<T, O> {
    parsers: Vec<Boxed<T, O>>,
}

impl<T, O> Clone for Choice<T, O> {
    fn clone(&self) -> Self {
        Self {
            parsers: self.parsers.clone(),
        }
    }
}

impl<T, O> Parser<T, O> for Choice<T, O> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        let mut last = None;
        for parser in &self.parsers {
            match parser.go(input.clone()) {
                ParseResult::Failure(m) => last = Some(m),
                other => return other,
            }
        }
        ParseResult::Failure(last.unwrap_or_else(|| Mismatch {
            expected: "<empty choice>".to_string(),
            at: input.location(),
        }))
    }

    fn describe(&self) -> String {
        if self.parsers.is_empty() {
            "<empty choice>".to_string()
        } else {
            let alts: Vec<_> = self.parsers.iter().map(|p| p.describe()).collect();
            format!("({})", alts.join(" | "))
        }
    }
}

/// A parser trying each of the given parsers in order, all from the same
/// position.
///
/// The first success or committed error is returned. When every
/// alternative fails, the failure of the *last* one is reported, it being
/// the most recently attempted diagnostic. An empty set of alternatives
/// fails with expected `<empty choice>`.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// #[derive(Clone, Debug, PartialEq)]
/// enum Op { Add, Sub, Mul, Div }
///
/// let op = choice([
///     just('+').to(Op::Add).boxed(),
///     just('-').to(Op::Sub).boxed(),
///     just('*').to(Op::Mul).boxed(),
///     just('/').to(Op::Div).boxed(),
/// ]);
///
/// assert_eq!(op.parse("+").into_result(), Ok(Op::Add));
/// assert_eq!(op.parse("/").into_result(), Ok(Op::Div));
/// assert!(op.parse("!").is_failure());
/// ```
pub fn choice<T, O>(parsers: impl IntoIterator<Item = Boxed<T, O>>) -> Choice<T, O> {
    Choice {
        parsers: parsers.into_iter().collect(),
    }
}

/// See [`sequence`].
pub struct Sequence<T, O> {
    parsers: Vec<Boxed<T, O>>,
}

impl<T, O> Clone for Sequence<T, O> {
    fn clone(&self) -> Self {
        Self {
            parsers: self.parsers.clone(),
        }
    }
}

impl<T, O> Parser<T, Vec<O>> for Sequence<T, O> {
    fn go(&self, input: Source<T>) -> ParseResult<T, Vec<O>> {
        let mut values = Vec::with_capacity(self.parsers.len());
        let mut src = input;
        for parser in &self.parsers {
            match parser.go(src) {
                ParseResult::Success { rest, value } => {
                    values.push(value);
                    src = rest;
                }
                ParseResult::Failure(m) => return ParseResult::Failure(m),
                ParseResult::Error(m) => return ParseResult::Error(m),
            }
        }
        ParseResult::Success {
            rest: src,
            value: values,
        }
    }

    fn describe(&self) -> String {
        let parts: Vec<_> = self.parsers.iter().map(|p| p.describe()).collect();
        parts.join(" ")
    }
}

/// A parser running each of the given parsers in order, collecting their
/// outputs into a list.
///
/// An empty set of parsers succeeds with an empty list, consuming nothing;
/// otherwise the remaining input is that of the last parser.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// let abc = sequence("abc".chars().map(|c| just(c).boxed()));
///
/// assert_eq!(abc.parse("abcd").into_result(), Ok(vec!['a', 'b', 'c']));
/// assert!(abc.parse("abd").is_failure());
/// ```
pub fn sequence<T, O>(parsers: impl IntoIterator<Item = Boxed<T, O>>) -> Sequence<T, O> {
    Sequence {
        parsers: parsers.into_iter().collect(),
    }
}

/// See [`Parser::or_else`].
#[derive(Copy, Clone)]
pub struct OrElse<A, O>(pub(crate) A, pub(crate) O);

impl<T, O: Clone, A: Parser<T, O>> Parser<T, O> for OrElse<A, O> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        match self.0.go(input.clone()) {
            ParseResult::Failure(_) => ParseResult::Success {
                rest: input,
                value: self.1.clone(),
            },
            other => other,
        }
    }

    fn describe(&self) -> String {
        format!("({})?", self.0.describe())
    }
}

/// See [`Parser::or_not`].
#[derive(Copy, Clone)]
pub struct OrNot<A>(pub(crate) A);

impl<T, O, A: Parser<T, O>> Parser<T, Option<O>> for OrNot<A> {
    fn go(&self, input: Source<T>) -> ParseResult<T, Option<O>> {
        match self.0.go(input.clone()) {
            ParseResult::Success { rest, value } => ParseResult::Success {
                rest,
                value: Some(value),
            },
            ParseResult::Failure(_) => ParseResult::Success {
                rest: input,
                value: None,
            },
            ParseResult::Error(m) => ParseResult::Error(m),
        }
    }

    fn describe(&self) -> String {
        format!("({})?", self.0.describe())
    }
}

// The diagnostic for repetition over a parser that succeeded without
// advancing the cursor; shared by every repeating combinator.
fn non_consuming<T, O>(parser: &impl Parser<T, O>, at: Location) -> Mismatch {
    Mismatch {
        expected: format!(
            "repetition of non-consuming parser: {}",
            parser.describe()
        ),
        at,
    }
}

/// See [`Parser::many`].
#[derive(Copy, Clone)]
pub struct Many<A>(pub(crate) A);

impl<T, O, A: Parser<T, O>> Parser<T, Vec<O>> for Many<A> {
    fn go(&self, input: Source<T>) -> ParseResult<T, Vec<O>> {
        let mut values = Vec::new();
        let mut src = input;
        loop {
            match self.0.go(src.clone()) {
                ParseResult::Success { rest, value } => {
                    if rest.location() == src.location() {
                        return ParseResult::Error(non_consuming(&self.0, src.location()));
                    }
                    values.push(value);
                    src = rest;
                }
                ParseResult::Failure(_) => {
                    return ParseResult::Success {
                        rest: src,
                        value: values,
                    }
                }
                ParseResult::Error(m) => return ParseResult::Error(m),
            }
        }
    }

    fn describe(&self) -> String {
        format!("({})*", self.0.describe())
    }
}

/// See [`Parser::many1`].
#[derive(Copy, Clone)]
pub struct Many1<A>(pub(crate) A);

impl<T, O, A: Parser<T, O>> Parser<T, Vec<O>> for Many1<A> {
    fn go(&self, input: Source<T>) -> ParseResult<T, Vec<O>> {
        let mut src = input;
        let mut values = Vec::new();
        loop {
            match self.0.go(src.clone()) {
                ParseResult::Success { rest, value } => {
                    if rest.location() == src.location() {
                        return ParseResult::Error(non_consuming(&self.0, src.location()));
                    }
                    values.push(value);
                    src = rest;
                }
                // The first attempt must match; its own diagnostic is the
                // useful one.
                ParseResult::Failure(m) if values.is_empty() => return ParseResult::Failure(m),
                ParseResult::Failure(_) => {
                    return ParseResult::Success {
                        rest: src,
                        value: values,
                    }
                }
                ParseResult::Error(m) => return ParseResult::Error(m),
            }
        }
    }

    fn describe(&self) -> String {
        format!("({})+", self.0.describe())
    }
}

/// See [`Parser::repeated`].
#[derive(Copy, Clone)]
pub struct Repeated<A> {
    pub(crate) parser: A,
    pub(crate) lo: usize,
    pub(crate) hi: Option<usize>,
}

impl<T, O, A: Parser<T, O>> Parser<T, Vec<O>> for Repeated<A> {
    fn go(&self, input: Source<T>) -> ParseResult<T, Vec<O>> {
        // An empty range matches the empty sequence, whatever the input.
        if self.hi.is_some_and(|hi| self.lo > hi) {
            return ParseResult::Success {
                rest: input,
                value: Vec::new(),
            };
        }

        let at = input.location();
        let mut values = Vec::new();
        let mut src = input;
        while self.hi.map_or(true, |hi| values.len() < hi) {
            match self.parser.go(src.clone()) {
                ParseResult::Success { rest, value } => {
                    // Only the unbounded form can spin on a non-consuming
                    // parser; the bounded one terminates regardless.
                    if self.hi.is_none() && rest.location() == src.location() {
                        return ParseResult::Error(non_consuming(&self.parser, src.location()));
                    }
                    values.push(value);
                    src = rest;
                }
                ParseResult::Failure(_) => break,
                ParseResult::Error(m) => return ParseResult::Error(m),
            }
        }

        if values.len() < self.lo {
            ParseResult::Failure(Mismatch {
                expected: format!(
                    "at least {} repetitions of {}",
                    self.lo,
                    self.parser.describe()
                ),
                at,
            })
        } else {
            ParseResult::Success {
                rest: src,
                value: values,
            }
        }
    }

    fn describe(&self) -> String {
        match self.hi {
            Some(hi) => format!("({}){{{},{}}}", self.parser.describe(), self.lo, hi),
            None => format!("({}){{{},}}", self.parser.describe(), self.lo),
        }
    }
}

/// See [`Parser::separated_by`].
pub struct SeparatedBy<A, B, U>(pub(crate) A, pub(crate) B, pub(crate) PhantomData<U>);

impl<A: Clone, B: Clone, U> Clone for SeparatedBy<A, B, U> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<T, O, U, A: Parser<T, O>, B: Parser<T, U>> Parser<T, Vec<O>> for SeparatedBy<A, B, U> {
    fn go(&self, input: Source<T>) -> ParseResult<T, Vec<O>> {
        let mut values = Vec::new();
        let mut src = input;

        match self.0.go(src.clone()) {
            ParseResult::Success { rest, value } => {
                values.push(value);
                src = rest;
            }
            ParseResult::Failure(_) => {
                return ParseResult::Success {
                    rest: src,
                    value: values,
                }
            }
            ParseResult::Error(m) => return ParseResult::Error(m),
        }

        loop {
            let after_sep = match self.1.go(src.clone()) {
                ParseResult::Success { rest, .. } => rest,
                ParseResult::Failure(_) => break,
                ParseResult::Error(m) => return ParseResult::Error(m),
            };
            match self.0.go(after_sep) {
                ParseResult::Success { rest, value } => {
                    if rest.location() == src.location() {
                        return ParseResult::Error(non_consuming(&self.0, src.location()));
                    }
                    values.push(value);
                    src = rest;
                }
                // A trailing separator belongs to whatever follows us.
                ParseResult::Failure(_) => break,
                ParseResult::Error(m) => return ParseResult::Error(m),
            }
        }

        ParseResult::Success {
            rest: src,
            value: values,
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} separated by {}",
            self.0.describe(),
            self.1.describe()
        )
    }
}

/// See [`Parser::joined_by`].
#[derive(Copy, Clone)]
pub struct JoinedBy<A, B>(pub(crate) A, pub(crate) B);

impl<T, O, A: Parser<T, O>, B: Parser<T, O>> Parser<T, Vec<O>> for JoinedBy<A, B> {
    fn go(&self, input: Source<T>) -> ParseResult<T, Vec<O>> {
        let mut values = Vec::new();
        let mut src = input;

        match self.0.go(src.clone()) {
            ParseResult::Success { rest, value } => {
                values.push(value);
                src = rest;
            }
            ParseResult::Failure(_) => {
                return ParseResult::Success {
                    rest: src,
                    value: values,
                }
            }
            ParseResult::Error(m) => return ParseResult::Error(m),
        }

        loop {
            let (after_sep, sep_value) = match self.1.go(src.clone()) {
                ParseResult::Success { rest, value } => (rest, value),
                ParseResult::Failure(_) => break,
                ParseResult::Error(m) => return ParseResult::Error(m),
            };
            match self.0.go(after_sep) {
                ParseResult::Success { rest, value } => {
                    if rest.location() == src.location() {
                        return ParseResult::Error(non_consuming(&self.0, src.location()));
                    }
                    values.push(sep_value);
                    values.push(value);
                    src = rest;
                }
                ParseResult::Failure(_) => break,
                ParseResult::Error(m) => return ParseResult::Error(m),
            }
        }

        ParseResult::Success {
            rest: src,
            value: values,
        }
    }

    fn describe(&self) -> String {
        format!("{} joined by {}", self.0.describe(), self.1.describe())
    }
}

/// See [`Parser::folded_by`].
pub struct FoldedBy<A, B, F>(pub(crate) A, pub(crate) B, pub(crate) PhantomData<F>);

impl<A: Clone, B: Clone, F> Clone for FoldedBy<A, B, F> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<T, O, F, A, B> Parser<T, O> for FoldedBy<A, B, F>
where
    A: Parser<T, O>,
    B: Parser<T, F>,
    F: Fn(O, O) -> O,
{
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        let (mut src, mut acc) = match self.0.go(input) {
            ParseResult::Success { rest, value } => (rest, value),
            ParseResult::Failure(m) => return ParseResult::Failure(m),
            ParseResult::Error(m) => return ParseResult::Error(m),
        };

        loop {
            let (after_sep, op) = match self.1.go(src.clone()) {
                ParseResult::Success { rest, value } => (rest, value),
                ParseResult::Failure(_) => break,
                ParseResult::Error(m) => return ParseResult::Error(m),
            };
            match self.0.go(after_sep) {
                ParseResult::Success { rest, value } => {
                    if rest.location() == src.location() {
                        return ParseResult::Error(non_consuming(&self.0, src.location()));
                    }
                    acc = op(acc, value);
                    src = rest;
                }
                ParseResult::Failure(_) => break,
                ParseResult::Error(m) => return ParseResult::Error(m),
            }
        }

        ParseResult::Success {
            rest: src,
            value: acc,
        }
    }

    fn describe(&self) -> String {
        format!("{} folded by {}", self.0.describe(), self.1.describe())
    }
}

/// See [`Parser::rfolded_by`].
pub struct RFoldedBy<A, B, F>(pub(crate) A, pub(crate) B, pub(crate) PhantomData<F>);

impl<A: Clone, B: Clone, F> Clone for RFoldedBy<A, B, F> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<T, O, F, A, B> Parser<T, O> for RFoldedBy<A, B, F>
where
    A: Parser<T, O>,
    B: Parser<T, F>,
    F: Fn(O, O) -> O,
{
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        let mut values = Vec::new();
        let mut ops = Vec::new();

        let mut src = match self.0.go(input) {
            ParseResult::Success { rest, value } => {
                values.push(value);
                rest
            }
            ParseResult::Failure(m) => return ParseResult::Failure(m),
            ParseResult::Error(m) => return ParseResult::Error(m),
        };

        loop {
            let (after_sep, op) = match self.1.go(src.clone()) {
                ParseResult::Success { rest, value } => (rest, value),
                ParseResult::Failure(_) => break,
                ParseResult::Error(m) => return ParseResult::Error(m),
            };
            match self.0.go(after_sep) {
                ParseResult::Success { rest, value } => {
                    if rest.location() == src.location() {
                        return ParseResult::Error(non_consuming(&self.0, src.location()));
                    }
                    ops.push(op);
                    values.push(value);
                    src = rest;
                }
                ParseResult::Failure(_) => break,
                ParseResult::Error(m) => return ParseResult::Error(m),
            }
        }

        // Fold from the right: the last value is the innermost operand.
        let mut acc = values.pop().expect("at least one value was parsed");
        while let (Some(op), Some(value)) = (ops.pop(), values.pop()) {
            acc = op(value, acc);
        }

        ParseResult::Success {
            rest: src,
            value: acc,
        }
    }

    fn describe(&self) -> String {
        format!(
            "{} right-folded by {}",
            self.0.describe(),
            self.1.describe()
        )
    }
}

/// See [`Parser::and_is`].
pub struct AndIs<A, B, U>(pub(crate) A, pub(crate) B, pub(crate) PhantomData<U>);

impl<A: Clone, B: Clone, U> Clone for AndIs<A, B, U> {
    fn clone(&self) -> Self {
        Self(self.0.clone(), self.1.clone(), PhantomData)
    }
}

impl<T, O, U, A: Parser<T, O>, B: Parser<T, U>> Parser<T, O> for AndIs<A, B, U> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        let base = self.0.go(input.clone());
        if !base.is_success() {
            return base;
        }
        // The auxiliary parser runs from the *original* position and
        // consumes nothing; only its verdict matters.
        match self.1.go(input) {
            ParseResult::Success { .. } => base,
            ParseResult::Failure(m) => ParseResult::Failure(m),
            ParseResult::Error(m) => ParseResult::Error(m),
        }
    }

    fn describe(&self) -> String {
        format!("{} & {}", self.0.describe(), self.1.describe())
    }
}

/// See [`Parser::must`].
#[derive(Copy, Clone)]
pub struct Must<A>(pub(crate) A);

impl<T, O, A: Parser<T, O>> Parser<T, O> for Must<A> {
    fn go(&self, input: Source<T>) -> ParseResult<T, O> {
        let at = input.location();
        match self.0.go(input) {
            ParseResult::Failure(Mismatch { expected, .. }) => {
                ParseResult::Error(Mismatch { expected, at })
            }
            other => other,
        }
    }

    fn describe(&self) -> String {
        format!("({})!", self.0.describe())
    }
}
