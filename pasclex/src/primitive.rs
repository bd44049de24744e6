//! Leaf parsers: single characters, fixed symbols, character-class runs and
//! table-driven DFAs.

use crate::combinator::TokenParser;
use crate::cursor::{Position, Source, advance};
use crate::token::{ElementaryKind, ElementaryToken, Spanned};
use smartstring::alias::String;

/// Token constructor for a run of characters: `(value, start, end)`.
pub fn elementary(
    kind: ElementaryKind,
) -> impl Fn(String, Position, Position) -> ElementaryToken + Copy + Send + Sync + 'static {
    move |value, start, end| ElementaryToken::new(kind, value, start, end)
}

/// Token constructor for a single character.
pub fn elementary_char(
    kind: ElementaryKind,
) -> impl Fn(char, Position) -> ElementaryToken + Copy + Send + Sync + 'static {
    move |c, at| ElementaryToken::single(kind, c, at)
}

fn special_symbol(c: char, at: Position) -> ElementaryToken {
    ElementaryToken::single(ElementaryKind::SpecialSymbol, c, at)
}

/// Matches exactly one expected character.
///
/// Fails without panicking when the position is at or past the end of the
/// text.
///
/// # Example
///
/// ```rust
/// # use pasclex::{CharParser, ElementaryKind, Source, TokenParser, pos};
/// let plus = CharParser::new('+');
/// let src = Source::new("a+");
/// assert!(plus.parse(&src, pos!(0, 0, 0)).is_none());
/// let tok = plus.parse(&src, pos!(0, 1, 1)).unwrap();
/// assert_eq!(tok.kind, ElementaryKind::SpecialSymbol);
/// assert!(plus.parse(&src, pos!(0, 2, 2)).is_none());
/// ```
pub struct CharParser<F = fn(char, Position) -> ElementaryToken> {
    expected: char,
    make: F,
}

impl CharParser {
    /// A parser producing a special-symbol token.
    pub fn new(expected: char) -> Self {
        Self {
            expected,
            make: special_symbol,
        }
    }
}

impl<F> CharParser<F> {
    /// A parser producing its token with `make`.
    pub fn with<T>(expected: char, make: F) -> Self
    where
        F: Fn(char, Position) -> T,
    {
        Self { expected, make }
    }
}

impl<F, T> TokenParser for CharParser<F>
where
    F: Fn(char, Position) -> T,
    T: Spanned,
{
    type Output = T;

    fn parse(&self, src: &Source, at: Position) -> Option<T> {
        match src.char_at(at.offset) {
            Some(c) if c == self.expected => Some((self.make)(c, at)),
            _ => None,
        }
    }
}

/// Matches a fixed, non-empty string of characters.
pub struct SymbolParser {
    symbol: &'static str,
    kind: ElementaryKind,
}

impl SymbolParser {
    /// # Panics
    ///
    /// Panics if `symbol` is empty.
    pub fn new(symbol: &'static str) -> Self {
        Self::with_kind(symbol, ElementaryKind::SpecialSymbol)
    }

    /// Matches `symbol` exactly, producing a token of `kind`.
    pub fn with_kind(symbol: &'static str, kind: ElementaryKind) -> Self {
        assert!(!symbol.is_empty(), "empty symbol");
        Self { symbol, kind }
    }
}

impl TokenParser for SymbolParser {
    type Output = ElementaryToken;

    fn parse(&self, src: &Source, at: Position) -> Option<ElementaryToken> {
        if !src.starts_with_at(at.offset, self.symbol) {
            return None;
        }
        let last = at.offset + self.symbol.chars().count() - 1;
        let end = advance(src, at, last);
        Some(ElementaryToken::new(self.kind, self.symbol, at, end))
    }
}

/// Matches the longest non-empty run of characters satisfying a predicate.
///
/// # Example
///
/// ```rust
/// # use pasclex::{ElementaryKind, PredicateParser, Source, TokenParser, elementary, pos};
/// let digits = PredicateParser::new(|c: char| c.is_ascii_digit(), elementary(ElementaryKind::DecimalDigits));
/// let tok = digits.parse(&Source::new("2024ad"), pos!(0, 0, 0)).unwrap();
/// assert_eq!(tok.value.as_str(), "2024");
/// assert_eq!(tok.end, pos!(0, 3, 3));
/// ```
pub struct PredicateParser<P, F> {
    predicate: P,
    make: F,
}

impl<P, F, T> PredicateParser<P, F>
where
    P: Fn(char) -> bool,
    F: Fn(String, Position, Position) -> T,
{
    /// Matches a run of characters satisfying `predicate`.
    pub fn new(predicate: P, make: F) -> Self {
        Self { predicate, make }
    }
}

impl<P, F, T> TokenParser for PredicateParser<P, F>
where
    P: Fn(char) -> bool,
    F: Fn(String, Position, Position) -> T,
    T: Spanned,
{
    type Output = T;

    fn parse(&self, src: &Source, at: Position) -> Option<T> {
        let mut i = at.offset;
        while src.char_at(i).is_some_and(|c| (self.predicate)(c)) {
            i += 1;
        }
        if i == at.offset {
            return None;
        }
        let end = advance(src, at, i - 1);
        Some((self.make)(src.slice(at.offset, i - 1), at, end))
    }
}

/// A DFA state. `NonTerminal` and `Terminal` carry the index of their row in
/// the transition table; a `Terminal` state accepts the text consumed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DfaState {
    NonTerminal(usize),
    Terminal(usize),
    Dead,
}

impl DfaState {
    #[inline]
    fn row(&self) -> Option<usize> {
        match *self {
            Self::NonTerminal(r) | Self::Terminal(r) => Some(r),
            Self::Dead => None,
        }
    }
}

/// Transition table indexed by `[row][symbol class]`.
pub type DfaTable = &'static [&'static [DfaState]];

/// Runs a DFA over the text and returns the longest prefix that ended in a
/// terminal state (maximal munch).
///
/// `classify` maps each character to a column of the table.
pub struct DfaParser<C, F> {
    initial: DfaState,
    table: DfaTable,
    classify: C,
    make: F,
}

impl<C, F, T> DfaParser<C, F>
where
    C: Fn(char) -> usize,
    F: Fn(String, Position, Position) -> T,
{
    /// A DFA starting in `initial`; `classify` maps a character to a table column.
    pub fn new(initial: DfaState, table: DfaTable, classify: C, make: F) -> Self {
        Self {
            initial,
            table,
            classify,
            make,
        }
    }
}

impl<C, F, T> TokenParser for DfaParser<C, F>
where
    C: Fn(char) -> usize,
    F: Fn(String, Position, Position) -> T,
    T: Spanned,
{
    type Output = T;

    fn parse(&self, src: &Source, at: Position) -> Option<T> {
        let mut state = self.initial;
        let mut last_match = None;
        let mut i = at.offset;
        while let Some(c) = src.char_at(i) {
            let Some(row) = state.row() else {
                break;
            };
            state = self.table[row][(self.classify)(c)];
            match state {
                DfaState::Dead => {
                    log::trace!("DEAD: i={}, c={:?}", i, c);
                    break;
                }
                DfaState::Terminal(r) => {
                    log::trace!("MATCH: i={}, c={:?}, s={}", i, c, r);
                    last_match = Some(i);
                }
                DfaState::NonTerminal(_) => {}
            }
            i += 1;
        }
        let last = last_match?;
        let end = advance(src, at, last);
        Some((self.make)(src.slice(at.offset, last), at, end))
    }
}
