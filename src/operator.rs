//! Operator-precedence tables: compile a declarative set of operators
//! with priorities and associativities into a single parser.
//!
//! An [`OperatorTable`] starts from an *atom* parser (a literal, or a
//! parenthesised expression in a recursive grammar) and layers one parser
//! per `(priority, associativity)` group around it. Higher priority binds
//! tighter, so higher-priority groups sit on the inside of the cascade.
//! Within one priority, groups are layered in [`Assoc`] declaration order
//! (`Left`, `Right`, `None`, `Prefix`, `Postfix`), innermost first. The
//! ordering is observable when the same operator token is registered at
//! one priority with several associativities, which is why it is spelled
//! out here.
//!
//! Each registration wraps its operator parser so that it yields the
//! combining function directly; the layer construction is then the same
//! fold for every operator in a group:
//!
//! | Assoc | Layer built around the current parser `p` |
//! |-------|-------------------------------------------|
//! | `Left` | `p (op p)*`, folded from the left |
//! | `Right` | `(p op)* p`, folded from the right |
//! | `None` | `p (op p)?`, at most one occurrence |
//! | `Prefix` | `op* p`, applied innermost-last |
//! | `Postfix` | `p op*`, applied innermost-first |

use super::*;
use std::{cmp::Reverse, collections::BTreeMap};

/// The priority an operator gets when the grammar has no particular
/// opinion.
pub const DEFAULT_PRIORITY: i32 = 7;

/// How a chain of equal-priority operators groups.
///
/// The declaration order doubles as the layering order within one
/// priority; see the [module docs](self).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Assoc {
    /// Binary, grouping from the left: `a + b + c` is `(a + b) + c`.
    Left,
    /// Binary, grouping from the right: `a ^ b ^ c` is `a ^ (b ^ c)`.
    Right,
    /// Binary, non-associating: at most one occurrence per chain.
    None,
    /// Unary, before the operand.
    Prefix,
    /// Unary, after the operand.
    Postfix,
}

impl Assoc {
    fn index(self) -> u8 {
        match self {
            Assoc::Left => 0,
            Assoc::Right => 1,
            Assoc::None => 2,
            Assoc::Prefix => 3,
            Assoc::Postfix => 4,
        }
    }

    fn is_binary(self) -> bool {
        matches!(self, Assoc::Left | Assoc::Right | Assoc::None)
    }
}

type InfixFn<O> = Arc<dyn Fn(O, O) -> O + Send + Sync>;
type UnaryFn<O> = Arc<dyn Fn(O) -> O + Send + Sync>;

// One (priority, associativity) group. Only one of the two vectors is
// populated, according to the associativity.
struct Level<T, O> {
    assoc: Assoc,
    infix: Vec<Boxed<T, InfixFn<O>>>,
    unary: Vec<Boxed<T, UnaryFn<O>>>,
}

impl<T, O> Level<T, O> {
    fn new(assoc: Assoc) -> Self {
        Self {
            assoc,
            infix: Vec::new(),
            unary: Vec::new(),
        }
    }
}

/// A builder compiling operator registrations into one parser.
///
/// Register operators with [`infix`](OperatorTable::infix) and
/// [`unary`](OperatorTable::unary), then call
/// [`build`](OperatorTable::build). Registration only populates the
/// table; the combinator graph is produced at `build`. An empty table
/// builds into the atom parser, unchanged.
///
/// # Examples
///
/// ```
/// # use weft::prelude::*;
/// let digit = filter(|c: &char| c.is_ascii_digit())
///     .labelled("digit")
///     .map(|c| i64::from(c.to_digit(10).unwrap()));
///
/// let expr = OperatorTable::new(digit)
///     .infix(just('*'), Assoc::Left, 8, |l, _, r| l * r)
///     .infix(just('+'), Assoc::Left, DEFAULT_PRIORITY, |l, _, r| l + r)
///     .unary(just('-'), Assoc::Prefix, 9, |x, _| -x)
///     .build();
///
/// assert_eq!(expr.parse("1+2*3").into_result(), Ok(7));
/// assert_eq!(expr.parse("-1+2").into_result(), Ok(1));
/// ```
pub struct OperatorTable<T, O> {
    base: Boxed<T, O>,
    levels: BTreeMap<(Reverse<i32>, u8), Level<T, O>>,
}

impl<T, O> OperatorTable<T, O>
where
    T: Send + Sync + 'static,
    O: Send + Sync + 'static,
{
    /// Start a table around the given atom parser.
    pub fn new(base: impl Parser<T, O> + Send + Sync + 'static) -> Self {
        Self {
            base: base.boxed(),
            levels: BTreeMap::new(),
        }
    }

    /// Register a binary operator.
    ///
    /// `op` parses the operator itself; its output is handed to `build`
    /// between the two operands, so one entry can serve several concrete
    /// operator tokens. `assoc` must be one of the binary associativities
    /// ([`Left`](Assoc::Left), [`Right`](Assoc::Right),
    /// [`None`](Assoc::None)).
    ///
    /// # Panics
    ///
    /// Panics when called with a unary associativity.
    pub fn infix<K, P, F>(mut self, op: P, assoc: Assoc, priority: i32, build: F) -> Self
    where
        P: Parser<T, K> + Send + Sync + 'static,
        K: Clone + Send + Sync + 'static,
        F: Fn(O, K, O) -> O + Send + Sync + 'static,
    {
        assert!(
            assoc.is_binary(),
            "binary operator registered with unary associativity {:?}",
            assoc
        );
        let build = Arc::new(build);
        let erased = op
            .map(move |token: K| {
                let build = Arc::clone(&build);
                let combined: InfixFn<O> = Arc::new(move |l, r| build(l, token.clone(), r));
                combined
            })
            .boxed();
        self.levels
            .entry((Reverse(priority), assoc.index()))
            .or_insert_with(|| Level::new(assoc))
            .infix
            .push(erased);
        self
    }

    /// Register a unary operator.
    ///
    /// `build` receives the operand and the operator token. `assoc` must
    /// be [`Prefix`](Assoc::Prefix) or [`Postfix`](Assoc::Postfix).
    ///
    /// # Panics
    ///
    /// Panics when called with a binary associativity.
    pub fn unary<K, P, F>(mut self, op: P, assoc: Assoc, priority: i32, build: F) -> Self
    where
        P: Parser<T, K> + Send + Sync + 'static,
        K: Clone + Send + Sync + 'static,
        F: Fn(O, K) -> O + Send + Sync + 'static,
    {
        assert!(
            !assoc.is_binary(),
            "unary operator registered with binary associativity {:?}",
            assoc
        );
        let build = Arc::new(build);
        let erased = op
            .map(move |token: K| {
                let build = Arc::clone(&build);
                let applied: UnaryFn<O> = Arc::new(move |x| build(x, token.clone()));
                applied
            })
            .boxed();
        self.levels
            .entry((Reverse(priority), assoc.index()))
            .or_insert_with(|| Level::new(assoc))
            .unary
            .push(erased);
        self
    }

    /// Compile the table into a single parser.
    pub fn build(self) -> Boxed<T, O> {
        let OperatorTable { base, levels } = self;
        let mut current = base;
        // Iteration order is priority descending, then associativity
        // index ascending: tighter-binding layers are built first and end
        // up innermost.
        for (_, level) in levels {
            let assoc = level.assoc;
            current = match assoc {
                Assoc::Left => {
                    let op = choice(level.infix);
                    current
                        .clone()
                        .then(op.then(current).many())
                        .map(|(first, rest)| {
                            rest.into_iter().fold(first, |l, (op, r)| op(l, r))
                        })
                        .boxed()
                }
                Assoc::Right => {
                    let op = choice(level.infix);
                    current
                        .clone()
                        .then(op)
                        .many()
                        .then(current)
                        .map(|(pairs, last)| {
                            pairs
                                .into_iter()
                                .rev()
                                .fold(last, |acc, (l, op)| op(l, acc))
                        })
                        .boxed()
                }
                Assoc::None => {
                    let op = choice(level.infix);
                    current
                        .clone()
                        .then(op.then(current).or_not())
                        .map(|(l, tail)| match tail {
                            Some((op, r)) => op(l, r),
                            None => l,
                        })
                        .boxed()
                }
                Assoc::Prefix => {
                    let op = choice(level.unary);
                    op.many()
                        .then(current)
                        .map(|(ops, inner)| ops.into_iter().rev().fold(inner, |x, op| op(x)))
                        .boxed()
                }
                Assoc::Postfix => {
                    let op = choice(level.unary);
                    current
                        .then(op.many())
                        .map(|(inner, ops)| ops.into_iter().fold(inner, |x, op| op(x)))
                        .boxed()
                }
            };
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    // Renders the grouping the table chose, so associativity and priority
    // are directly visible in assertions.
    fn atom() -> impl Parser<char, String> + Clone + Send + Sync {
        filter(|c: &char| c.is_ascii_digit())
            .labelled("digit")
            .map(String::from)
    }

    fn digit() -> impl Parser<char, i64> + Clone + Send + Sync {
        filter(|c: &char| c.is_ascii_digit())
            .labelled("digit")
            .map(|c| i64::from(c.to_digit(10).unwrap()))
    }

    fn joined(l: String, op: char, r: String) -> String {
        format!("({}{}{})", l, op, r)
    }

    #[test]
    fn empty_table_is_the_atom() {
        let expr = OperatorTable::new(digit()).build();
        assert_eq!(expr.parse("7").into_result(), Ok(7));
        assert!(expr.parse("x").is_failure());
    }

    #[test]
    fn left_associativity() {
        let expr = OperatorTable::new(atom())
            .infix(just('+'), Assoc::Left, 7, joined)
            .build();
        assert_eq!(
            expr.parse("1+2+3").into_result(),
            Ok("((1+2)+3)".to_string())
        );
    }

    #[test]
    fn right_associativity() {
        let expr = OperatorTable::new(atom())
            .infix(just('^'), Assoc::Right, 9, joined)
            .build();
        assert_eq!(
            expr.parse("1^2^3").into_result(),
            Ok("(1^(2^3))".to_string())
        );
    }

    #[test]
    fn non_associating_stops_after_one() {
        let expr = OperatorTable::new(atom())
            .infix(just('<'), Assoc::None, 5, joined)
            .build();
        assert_eq!(expr.parse("1<2").into_result(), Ok("(1<2)".to_string()));
        // The second '<' does not belong to the chain; it is simply left
        // unconsumed.
        match expr.parse("1<2<3") {
            ParseResult::Success { rest, value } => {
                assert_eq!(value, "(1<2)");
                assert_eq!(rest.location().offset(), 3);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn priority_binds_tighter() {
        let expr = OperatorTable::new(atom())
            .infix(just('*'), Assoc::Left, 8, joined)
            .infix(just('+'), Assoc::Left, 7, joined)
            .build();
        assert_eq!(
            expr.parse("1+2*3").into_result(),
            Ok("(1+(2*3))".to_string())
        );
        assert_eq!(
            expr.parse("1*2+3").into_result(),
            Ok("((1*2)+3)".to_string())
        );
    }

    #[test]
    fn arithmetic_evaluates() {
        let expr = OperatorTable::new(digit())
            .infix(just('*'), Assoc::Left, 8, |l, _, r| l * r)
            .infix(just('+'), Assoc::Left, DEFAULT_PRIORITY, |l, _, r| l + r)
            .build();
        match expr.parse("1+2*3") {
            ParseResult::Success { rest, value } => {
                assert_eq!(value, 7);
                assert_eq!(rest.location().offset(), 5);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn prefix_folds_innermost_last() {
        let expr = OperatorTable::new(atom())
            .unary(just('-'), Assoc::Prefix, 9, |x, op| format!("({}{})", op, x))
            .build();
        assert_eq!(expr.parse("--1").into_result(), Ok("(-(-1))".to_string()));
    }

    #[test]
    fn postfix_folds_innermost_first() {
        let expr = OperatorTable::new(atom())
            .unary(just('!'), Assoc::Postfix, 9, |x, op| format!("({}{})", x, op))
            .build();
        assert_eq!(expr.parse("1!!").into_result(), Ok("((1!)!)".to_string()));
    }

    #[test]
    fn unary_and_binary_layer_by_priority() {
        let expr = OperatorTable::new(digit())
            .unary(just('-'), Assoc::Prefix, 9, |x, _| -x)
            .infix(just('+'), Assoc::Left, 7, |l, _, r| l + r)
            .build();
        assert_eq!(expr.parse("-1+2").into_result(), Ok(1));
    }

    #[test]
    fn mixed_associativity_layers_lowest_index_innermost() {
        // '+' (Left) and '~' (Right) share a priority, so the Left group
        // forms the operands of the Right group.
        let expr = OperatorTable::new(atom())
            .infix(just('+'), Assoc::Left, 7, joined)
            .infix(just('~'), Assoc::Right, 7, joined)
            .build();
        assert_eq!(
            expr.parse("1+2~3+4").into_result(),
            Ok("((1+2)~(3+4))".to_string())
        );
    }

    #[test]
    fn several_operators_share_a_level() {
        let expr = OperatorTable::new(digit())
            .infix(just('+'), Assoc::Left, 7, |l, _, r| l + r)
            .infix(just('-'), Assoc::Left, 7, |l, _, r| l - r)
            .build();
        assert_eq!(expr.parse("9-4+2").into_result(), Ok(7));
    }

    #[test]
    fn committed_atom_reports_missing_operand() {
        let expr = OperatorTable::new(digit().must())
            .infix(just('*'), Assoc::Left, 8, |l, _, r| l * r)
            .infix(just('+'), Assoc::Left, 7, |l, _, r| l + r)
            .build();
        // A dangling operator is a hard error at the operand's position,
        // not a silent backtrack.
        match expr.parse("1+") {
            ParseResult::Error(m) => {
                assert_eq!(m.at.offset(), 2);
                assert_eq!(m.expected, "digit");
            }
            other => panic!("unexpected result: {:?}", other),
        }
        // The committed table still parses complete input.
        assert_eq!(expr.parse("1+2*3").into_result(), Ok(7));
    }

    #[test]
    #[should_panic(expected = "unary associativity")]
    fn infix_rejects_unary_assoc() {
        let _ = OperatorTable::new(digit()).infix(just('-'), Assoc::Prefix, 9, |l, _, r| l - r);
    }

    #[test]
    #[should_panic(expected = "binary associativity")]
    fn unary_rejects_binary_assoc() {
        let _ = OperatorTable::new(digit()).unary(just('-'), Assoc::Left, 9, |x, _| -x);
    }
}
