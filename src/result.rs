//! The outcome type of a parser invocation and its non-success payload.

use super::*;

/// The payload shared by the two non-success variants of [`ParseResult`]:
/// a human-readable description of what was expected and the location at
/// which the failing parser was entered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// A description of the expected input, for end-user messages only.
    pub expected: String,
    /// Where the failing parser began its attempt.
    pub at: Location,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "expected {} at {}", self.expected, self.at)
    }
}

impl std::error::Error for Mismatch {}

/// The outcome of invoking a parser on a [`Source`].
///
/// There are three concrete outcomes with distinct roles in control flow:
///
/// - [`Success`](ParseResult::Success) carries the parsed value and the
///   source to continue from.
/// - [`Failure`](ParseResult::Failure) is *recoverable*: an enclosing
///   [`or`](crate::Parser::or), [`choice`](crate::combinator::choice),
///   [`or_not`](crate::Parser::or_not) or repetition may try something
///   else from the same position.
/// - [`Error`](ParseResult::Error) is *committed*: the grammar has decided
///   this path must match, so the error propagates unchanged through every
///   combinator, including the alternation ones. Only
///   [`must`](crate::Parser::must) and the non-consumption guard of
///   repetition produce it.
///
/// Both non-success variants carry a [`Mismatch`], so code that does not
/// care about recoverability can match via
/// [`mismatch`](ParseResult::mismatch).
pub enum ParseResult<T, O> {
    /// The parser matched, producing `value`; parsing continues at `rest`.
    Success {
        /// The remainder of the input.
        rest: Source<T>,
        /// The parsed value.
        value: O,
    },
    /// The parser did not match, and alternatives may be tried.
    Failure(Mismatch),
    /// The parser did not match on a committed path; no alternative will
    /// be tried.
    Error(Mismatch),
}

impl<T, O> ParseResult<T, O> {
    /// Transform the value of a `Success`; the other variants pass through
    /// untouched.
    pub fn map<U>(self, f: impl FnOnce(O) -> U) -> ParseResult<T, U> {
        match self {
            Self::Success { rest, value } => ParseResult::Success {
                rest,
                value: f(value),
            },
            Self::Failure(m) => ParseResult::Failure(m),
            Self::Error(m) => ParseResult::Error(m),
        }
    }

    /// Whether this is a `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Whether this is a recoverable `Failure`.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Whether this is a committed `Error`.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The [`Mismatch`] of either non-success variant.
    pub fn mismatch(&self) -> Option<&Mismatch> {
        match self {
            Self::Success { .. } => None,
            Self::Failure(m) | Self::Error(m) => Some(m),
        }
    }

    /// Convert into a [`Result`], discarding the remaining input on
    /// success and the failure/error distinction otherwise.
    pub fn into_result(self) -> Result<O, Mismatch> {
        match self {
            Self::Success { value, .. } => Ok(value),
            Self::Failure(m) | Self::Error(m) => Err(m),
        }
    }
}

impl<T, O: fmt::Debug> fmt::Debug for ParseResult<T, O> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Success { rest, value } => f
                .debug_struct("Success")
                .field("value", value)
                .field("rest", &rest.location())
                .finish(),
            Self::Failure(m) => f.debug_tuple("Failure").field(m).finish(),
            Self::Error(m) => f.debug_tuple("Error").field(m).finish(),
        }
    }
}

// Equality compares values and positions, not token buffers; it exists so
// that results can be asserted on directly in tests.
impl<T, O: PartialEq> PartialEq for ParseResult<T, O> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Success { rest, value },
                Self::Success {
                    rest: other_rest,
                    value: other_value,
                },
            ) => rest.location() == other_rest.location() && value == other_value,
            (Self::Failure(m), Self::Failure(n)) => m == n,
            (Self::Error(m), Self::Error(n)) => m == n,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn map_touches_success_only() {
        let doubled = just('2').parse("2").map(|c| c.to_digit(10).unwrap() * 2);
        assert_eq!(doubled.into_result(), Ok(4));

        let missed = just('2').parse("x").map(|c| c.to_digit(10).unwrap() * 2);
        assert!(missed.is_failure());
        assert_eq!(missed.mismatch().unwrap().expected, "'2'");
    }

    #[test]
    fn mismatch_covers_both_non_successes() {
        assert!(just('a').parse("b").mismatch().is_some());
        assert!(just('a').must().parse("b").mismatch().is_some());
        assert!(just('a').parse("a").mismatch().is_none());
    }

    #[test]
    fn mismatch_displays_location() {
        let m = just('a').parse("b").into_result().unwrap_err();
        assert_eq!(m.to_string(), "expected 'a' at 1:1");
    }
}
