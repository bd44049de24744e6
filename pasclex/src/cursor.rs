//! Source text and position arithmetic shared by every token parser.
//!
//! A [`Position`] is a `(line, column, offset)` triple, all 0-based. The
//! `offset` is the absolute character index into the [`Source`]; `line` and
//! `column` are always derived from it by [`advance`], so a position computed
//! along any call path agrees with one recomputed from scratch.
//!
//! # Examples
//!
//! ```rust
//! # use pasclex::{Source, advance, pos};
//! let src = Source::new("ab\ncd");
//! let start = pos!(0, 0, 0);
//! assert_eq!(advance(&src, start, 1), pos!(0, 1, 1));
//! assert_eq!(advance(&src, start, 3), pos!(1, 0, 3));
//! assert_eq!(advance(&src, start, 4), pos!(1, 1, 4));
//! ```

use smartstring::alias::String;

/// A 0-based line/column position in source text, together with the
/// absolute character offset it was derived from.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// 0-based line number.
    pub line: usize,
    /// 0-based column number (character position in the line).
    pub column: usize,
    /// 0-based absolute character offset into the source.
    pub offset: usize,
}

impl Position {
    /// Creates a new `Position`.
    #[inline]
    pub const fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// An inclusive source range: `[start, end]`.
///
/// Tokens cover the characters from `start` up to and including `end`, so a
/// single-character token has `start == end`.
#[derive(Debug, Clone, Default, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    /// Creates a new `Span`.
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Merge with another span by covering both.
    pub fn merge(&self, other: &Span) -> Span {
        let start = if self.start <= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end >= other.end {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }

    /// Number of characters covered by this span.
    #[inline]
    pub fn len(&self) -> usize {
        self.end.offset + 1 - self.start.offset
    }

    /// Pretty-print for diagnostics (human-readable).
    #[inline]
    pub fn display(&self) -> std::string::String {
        format!(
            "span {}:{} to {}:{}",
            self.start.line, self.start.column, self.end.line, self.end.column
        )
    }
}

/// Input text indexed by character.
///
/// Parsers address the text by absolute character offset; `Source` keeps a
/// decoded copy so that lookups are O(1) regardless of UTF-8 width.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Source {
    chars: Vec<char>,
}

impl Source {
    /// Decodes `text` into characters.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// Number of characters in the source.
    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Is the source free of characters?
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `offset`, or `None` past the end.
    #[inline]
    pub fn char_at(&self, offset: usize) -> Option<char> {
        self.chars.get(offset).copied()
    }

    /// Does the text at `offset` begin with `pattern`?
    pub fn starts_with_at(&self, offset: usize, pattern: &str) -> bool {
        let mut i = offset;
        for c in pattern.chars() {
            match self.chars.get(i) {
                Some(&x) if x == c => i += 1,
                _ => return false,
            }
        }
        true
    }

    /// Characters from `start` through `end`, both inclusive.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..=end].iter().collect::<std::string::String>().into()
    }

    /// Text covered by `span`.
    pub fn span_text(&self, span: &Span) -> String {
        self.slice(span.start.offset, span.end.offset)
    }

    /// Position of `offset` computed from the beginning of the text.
    pub fn position_of(&self, offset: usize) -> Position {
        advance(self, Position::default(), offset)
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

/// Moves `from` forward to absolute offset `to`, recomputing line and column.
///
/// Every offset stepped onto looks at the character immediately before it: a
/// `'\n'` there starts a new line, anything else advances the column. The
/// newline character itself therefore belongs to the line it terminates.
///
/// # Panics
///
/// Panics if `to` lies before `from.offset` or beyond the end of `src`.
pub fn advance(src: &Source, from: Position, to: usize) -> Position {
    assert!(
        to >= from.offset && to <= src.len(),
        "cannot advance from offset {} to {} (source length {})",
        from.offset,
        to,
        src.len()
    );
    let mut line = from.line;
    let mut column = from.column;
    for i in from.offset + 1..=to {
        if src.chars[i - 1] == '\n' {
            line += 1;
            column = 0;
        } else {
            column += 1;
        }
    }
    Position {
        line,
        column,
        offset: to,
    }
}

/// Build a [`Position`] inline from 0-based line, column and offset.
///
/// # Examples
///
/// ```rust
/// # use pasclex::pos;
/// let p = pos!(1, 4, 10);
/// assert_eq!(p.column, 4);
/// ```
#[macro_export]
macro_rules! pos {
    ($line:expr, $column:expr, $offset:expr) => {
        $crate::Position {
            line: $line,
            column: $column,
            offset: $offset,
        }
    };
}
