//! Positional input handling: the immutable [`Source`] cursor and the
//! [`Location`]s it hands out.

use super::*;
use std::sync::Arc;

/// A position within an input being parsed.
///
/// Locations are cheap to copy and order in O(1): equality and ordering
/// compare the element offset only. Two locations are only meaningfully
/// comparable when they were produced from the same [`Source`] during the
/// same parsing session.
///
/// For text inputs (see [`Source::text`]) a location additionally knows its
/// 1-based line and column, which [`fmt::Display`] renders as
/// `line:column`. Token-list inputs have no line structure and display as a
/// bare offset.
#[derive(Copy, Clone, Debug)]
pub struct Location {
    offset: usize,
    line_column: Option<(u32, u32)>,
}

impl Location {
    /// The element offset from the start of the input, starting at zero.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The 1-based line and column of this location, if the input has line
    /// structure.
    pub fn line_column(&self) -> Option<(u32, u32)> {
        self.line_column
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset
    }
}

impl Eq for Location {}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        self.offset.cmp(&other.offset)
    }
}

impl core::hash::Hash for Location {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.offset.hash(state);
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line_column {
            Some((line, column)) => write!(f, "{}:{}", line, column),
            None => write!(f, "{}", self.offset),
        }
    }
}

/// An immutable cursor into a sequence of tokens.
///
/// A `Source` pairs an origin label (used only for diagnostics) with a
/// shared token buffer and an offset into it. Parsers never mutate a
/// `Source`; advancing produces a new value and the old one remains valid,
/// which is what makes backtracking in [`choice`](crate::combinator::choice)
/// and friends free. Cloning and [`advance`](Source::advance) are O(1).
///
/// A `Source` is created at the entry of a parse, usually implicitly via
/// the [`From`] conversions accepted by [`Parser::parse`](crate::Parser::parse),
/// and discarded when parsing returns.
pub struct Source<T> {
    origin: Arc<str>,
    tokens: Arc<[T]>,
    // Token offsets at which each line starts; empty for list sources.
    lines: Arc<[usize]>,
    offset: usize,
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        Self {
            origin: self.origin.clone(),
            tokens: self.tokens.clone(),
            lines: self.lines.clone(),
            offset: self.offset,
        }
    }
}

impl<T> fmt::Debug for Source<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Source")
            .field("origin", &self.origin)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl Source<char> {
    /// Create a source over the characters of a string, remembering where
    /// each line starts so that locations can report line and column.
    pub fn text(origin: impl Into<Arc<str>>, text: &str) -> Self {
        let tokens: Vec<char> = text.chars().collect();
        let mut lines = vec![0];
        for (i, c) in tokens.iter().enumerate() {
            if *c == '\n' {
                lines.push(i + 1);
            }
        }
        Self {
            origin: origin.into(),
            tokens: tokens.into(),
            lines: lines.into(),
            offset: 0,
        }
    }
}

impl<T> Source<T> {
    /// Create a source over an arbitrary token sequence. Locations of list
    /// sources carry offsets only.
    pub fn list(origin: impl Into<Arc<str>>, tokens: impl Into<Arc<[T]>>) -> Self {
        Self {
            origin: origin.into(),
            tokens: tokens.into(),
            lines: Vec::new().into(),
            offset: 0,
        }
    }

    /// The diagnostic label this source was created with.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// The location of the cursor.
    pub fn location(&self) -> Location {
        let line_column = if self.lines.is_empty() {
            None
        } else {
            let line = self.lines.partition_point(|&start| start <= self.offset) - 1;
            Some(((line + 1) as u32, (self.offset - self.lines[line] + 1) as u32))
        };
        Location {
            offset: self.offset,
            line_column,
        }
    }

    /// The token under the cursor, or `None` at the end of input.
    pub fn head(&self) -> Option<&T> {
        self.tokens.get(self.offset)
    }

    /// A new source positioned one token later, saturating at the end of
    /// input.
    pub fn advance(&self) -> Self {
        Self {
            origin: self.origin.clone(),
            tokens: self.tokens.clone(),
            lines: self.lines.clone(),
            offset: (self.offset + 1).min(self.tokens.len()),
        }
    }
}

impl From<&str> for Source<char> {
    fn from(text: &str) -> Self {
        Source::text("<string>", text)
    }
}

impl From<&String> for Source<char> {
    fn from(text: &String) -> Self {
        Source::text("<string>", text)
    }
}

impl<T> From<Vec<T>> for Source<T> {
    fn from(tokens: Vec<T>) -> Self {
        Source::list("<tokens>", tokens)
    }
}

impl<T: Clone> From<&[T]> for Source<T> {
    fn from(tokens: &[T]) -> Self {
        Source::list("<tokens>", tokens)
    }
}

impl<T, const N: usize> From<[T; N]> for Source<T> {
    fn from(tokens: [T; N]) -> Self {
        Source::list("<tokens>", tokens)
    }
}
