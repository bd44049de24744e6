//! # Token parsers and combinators
//!
//! Every parser in this crate implements [`TokenParser`]: given a [`Source`]
//! and a starting [`Position`] it either returns a token or `None`. A `None`
//! is ordinary control flow (the input simply does not match here); nothing
//! is allocated for it.
//!
//! Combinators build larger parsers out of smaller ones:
//!
//! - [`Alternative`]: first success wins, children tried in declared order.
//! - [`Sequence`]: all children must succeed, each starting right after the
//!   previous token; the results are merged by a combiner.
//! - [`Optional`]: never fails; yields [`OrEmpty::Empty`] on a mismatch.
//! - [`Many`]: one or more repetitions merged by a combiner.
//! - [`Map`] / [`Decorate`]: post-process the result of a parser.
//!
//! # Example
//!
//! ```rust
//! # use pasclex::{CharParser, ElementaryToken, Sequence, Source, TokenParser, pos};
//! let ab = Sequence::new(
//!     (CharParser::new('a'), CharParser::new('b')),
//!     |a: ElementaryToken, b: ElementaryToken| {
//!         ElementaryToken::new(a.kind, format!("{}{}", a.value, b.value), a.start, b.end)
//!     },
//! );
//! let src = Source::new("abc");
//! let tok = ab.parse(&src, pos!(0, 0, 0)).unwrap();
//! assert_eq!(tok.value.as_str(), "ab");
//! assert_eq!(tok.end, pos!(0, 1, 1));
//! assert!(ab.parse(&src, pos!(0, 1, 1)).is_none());
//! ```

use crate::cursor::{Position, Source, advance};
use crate::token::Spanned;

/// A parser producing a token of type [`Self::Output`] from a position in
/// the source.
pub trait TokenParser {
    type Output: Spanned;

    /// Attempts to match at `at`. Returns `None` when the text there does not
    /// match; never panics for a mismatch.
    fn parse(&self, src: &Source, at: Position) -> Option<Self::Output>;

    /// Transforms a successful result.
    fn map<T, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        T: Spanned,
        F: Fn(Self::Output) -> T,
    {
        Map { parser: self, f }
    }

    /// Post-processes the raw result, success or failure.
    fn decorate<T, F>(self, f: F) -> Decorate<Self, F>
    where
        Self: Sized,
        T: Spanned,
        F: Fn(Option<Self::Output>, &Source) -> Option<T>,
    {
        Decorate { parser: self, f }
    }

    fn boxed(self) -> BoxedParser<Self::Output>
    where
        Self: Sized + Send + Sync + 'static,
    {
        Box::new(self)
    }
}

/// A type-erased parser, shareable across threads.
pub type BoxedParser<T> = Box<dyn TokenParser<Output = T> + Send + Sync>;

impl<P> TokenParser for Box<P>
where
    P: TokenParser + ?Sized,
{
    type Output = P::Output;

    #[inline]
    fn parse(&self, src: &Source, at: Position) -> Option<Self::Output> {
        (**self).parse(src, at)
    }
}

impl<P> TokenParser for &P
where
    P: TokenParser + ?Sized,
{
    type Output = P::Output;

    #[inline]
    fn parse(&self, src: &Source, at: Position) -> Option<Self::Output> {
        (**self).parse(src, at)
    }
}

/// Where scanning resumes after `token`, which was matched at `at`.
///
/// Empty placeholders do not consume input.
pub fn next_position<T: Spanned>(src: &Source, at: Position, token: &T) -> Position {
    if token.is_empty() {
        at
    } else {
        let end = token.end();
        advance(src, end, end.offset + 1)
    }
}

/// Result of an [`Optional`] parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrEmpty<T> {
    Token(T),
    /// Zero-width placeholder at the position the attempt started.
    Empty(Position),
}

impl<T> OrEmpty<T> {
    /// The token, or `None` for the placeholder.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Token(t) => Some(t),
            Self::Empty(_) => None,
        }
    }

    /// Borrows the token, if any.
    pub fn as_option(&self) -> Option<&T> {
        match self {
            Self::Token(t) => Some(t),
            Self::Empty(_) => None,
        }
    }
}

impl<T: Spanned> Spanned for OrEmpty<T> {
    fn start(&self) -> Position {
        match self {
            Self::Token(t) => t.start(),
            Self::Empty(at) => *at,
        }
    }
    fn end(&self) -> Position {
        match self {
            Self::Token(t) => t.end(),
            Self::Empty(at) => *at,
        }
    }
    fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

/// Tries each child at the same position and returns the first success.
///
/// Declaration order is precedence: put longer or more specific forms
/// first when prefixes overlap.
pub struct Alternative<T> {
    parsers: Vec<BoxedParser<T>>,
}

impl<T: Spanned> Alternative<T> {
    /// Alternatives tried in the order given.
    pub fn new(parsers: Vec<BoxedParser<T>>) -> Self {
        Self { parsers }
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.parsers.len()
    }

    /// Are there no alternatives?
    pub fn is_empty(&self) -> bool {
        self.parsers.is_empty()
    }
}

impl<T: Spanned> TokenParser for Alternative<T> {
    type Output = T;

    fn parse(&self, src: &Source, at: Position) -> Option<T> {
        self.parsers.iter().find_map(|p| p.parse(src, at))
    }
}

impl<T: Spanned> FromIterator<BoxedParser<T>> for Alternative<T> {
    fn from_iter<I: IntoIterator<Item = BoxedParser<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Runs a tuple of parsers one after another and merges their tokens.
///
/// Each child starts right after the end of the previous child's token (an
/// empty placeholder does not advance). The first failing child fails the
/// whole sequence.
pub struct Sequence<P, F> {
    parsers: P,
    combine: F,
}

impl<P, F> Sequence<P, F> {
    /// Runs the tuple `parsers` and merges their tokens with `combine`.
    pub fn new(parsers: P, combine: F) -> Self {
        Self { parsers, combine }
    }
}

macro_rules! impl_sequence {
    ($($parser:ident $var:ident $tok:ident),+) => {
        impl<$($parser,)+ F, T> TokenParser for Sequence<($($parser,)+), F>
        where
            $($parser: TokenParser,)+
            F: Fn($($parser::Output),+) -> T,
            T: Spanned,
        {
            type Output = T;

            #[allow(unused_assignments)]
            fn parse(&self, src: &Source, at: Position) -> Option<T> {
                let ($($var,)+) = &self.parsers;
                let mut position = at;
                $(
                    let $tok = $var.parse(src, position)?;
                    position = next_position(src, position, &$tok);
                )+
                Some((self.combine)($($tok),+))
            }
        }
    };
}

impl_sequence!(A a ta, B b tb);
impl_sequence!(A a ta, B b tb, C c tc);
impl_sequence!(A a ta, B b tb, C c tc, D d td);

/// Wraps a parser so that it always succeeds.
pub struct Optional<P> {
    parser: P,
}

impl<P: TokenParser> Optional<P> {
    /// Makes `parser` optional.
    pub fn new(parser: P) -> Self {
        Self { parser }
    }
}

impl<P: TokenParser> TokenParser for Optional<P> {
    type Output = OrEmpty<P::Output>;

    fn parse(&self, src: &Source, at: Position) -> Option<Self::Output> {
        Some(match self.parser.parse(src, at) {
            Some(token) => OrEmpty::Token(token),
            None => OrEmpty::Empty(at),
        })
    }
}

/// Applies a parser repeatedly, each attempt starting right after the
/// previous token, and merges the tokens collected.
///
/// Fails if the first attempt fails. Stops at the first failure, at the end
/// of input, or after an empty placeholder (which is not collected).
pub struct Many<P, F> {
    parser: P,
    combine: F,
}

impl<P, F, T> Many<P, F>
where
    P: TokenParser,
    F: Fn(Vec<P::Output>) -> T,
{
    /// Repeats `parser` and merges the collected tokens with `combine`.
    pub fn new(parser: P, combine: F) -> Self {
        Self { parser, combine }
    }
}

impl<P, F, T> TokenParser for Many<P, F>
where
    P: TokenParser,
    F: Fn(Vec<P::Output>) -> T,
    T: Spanned,
{
    type Output = T;

    fn parse(&self, src: &Source, at: Position) -> Option<T> {
        let mut tokens = Vec::new();
        let mut position = at;
        while let Some(token) = self.parser.parse(src, position) {
            if token.is_empty() {
                break;
            }
            position = next_position(src, position, &token);
            tokens.push(token);
            if position.offset >= src.len() {
                break;
            }
        }
        if tokens.is_empty() {
            None
        } else {
            Some((self.combine)(tokens))
        }
    }
}

/// See [`TokenParser::map`].
pub struct Map<P, F> {
    parser: P,
    f: F,
}

impl<P, F, T> TokenParser for Map<P, F>
where
    P: TokenParser,
    F: Fn(P::Output) -> T,
    T: Spanned,
{
    type Output = T;

    #[inline]
    fn parse(&self, src: &Source, at: Position) -> Option<T> {
        self.parser.parse(src, at).map(&self.f)
    }
}

/// See [`TokenParser::decorate`].
pub struct Decorate<P, F> {
    parser: P,
    f: F,
}

impl<P, F, T> TokenParser for Decorate<P, F>
where
    P: TokenParser,
    F: Fn(Option<P::Output>, &Source) -> Option<T>,
    T: Spanned,
{
    type Output = T;

    #[inline]
    fn parse(&self, src: &Source, at: Position) -> Option<T> {
        (self.f)(self.parser.parse(src, at), src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pos;
    use crate::primitive::{CharParser, PredicateParser, elementary};
    use crate::token::{ElementaryKind, ElementaryToken};

    fn joined(tokens: Vec<ElementaryToken>) -> ElementaryToken {
        let value: std::string::String = tokens.iter().map(|t| t.value.as_str()).collect();
        ElementaryToken::new(
            ElementaryKind::SpecialSymbol,
            value,
            tokens[0].start,
            tokens[tokens.len() - 1].end,
        )
    }

    fn concat3(
        a: ElementaryToken,
        b: OrEmpty<ElementaryToken>,
        c: ElementaryToken,
    ) -> ElementaryToken {
        let mut parts = vec![a];
        parts.extend(b.into_option());
        parts.push(c);
        joined(parts)
    }

    #[test]
    fn alternative_returns_first_success_in_order() {
        let alt = Alternative::new(vec![
            CharParser::with('a', |c, p| ElementaryToken::single(ElementaryKind::Identifier, c, p)).boxed(),
            CharParser::new('a').boxed(),
        ]);
        let src = Source::new("a");
        let tok = alt.parse(&src, Position::default()).unwrap();
        assert_eq!(tok.kind, ElementaryKind::Identifier);
        assert_eq!(alt.len(), 2);
    }

    #[test]
    fn alternative_fails_when_all_children_fail() {
        let alt: Alternative<ElementaryToken> =
            vec![CharParser::new('x').boxed(), CharParser::new('y').boxed()]
                .into_iter()
                .collect();
        assert!(alt.parse(&Source::new("z"), Position::default()).is_none());
    }

    #[test]
    fn sequence_threads_position_across_lines() {
        let seq = Sequence::new(
            (CharParser::new('a'), CharParser::new('\n'), CharParser::new('b')),
            |a: ElementaryToken, nl: ElementaryToken, b: ElementaryToken| joined(vec![a, nl, b]),
        );
        let src = Source::new("a\nb");
        let tok = seq.parse(&src, Position::default()).unwrap();
        assert_eq!(tok.value.as_str(), "a\nb");
        assert_eq!(tok.start, pos!(0, 0, 0));
        assert_eq!(tok.end, pos!(1, 0, 2));
    }

    #[test]
    fn sequence_does_not_advance_past_empty_token() {
        let seq = Sequence::new(
            (
                CharParser::new('<'),
                Optional::new(CharParser::new('=')),
                CharParser::new('>'),
            ),
            concat3,
        );
        let src = Source::new("<>");
        let tok = seq.parse(&src, Position::default()).unwrap();
        assert_eq!(tok.value.as_str(), "<>");
        assert_eq!(tok.end, pos!(0, 1, 1));

        let src = Source::new("<=>");
        let tok = seq.parse(&src, Position::default()).unwrap();
        assert_eq!(tok.value.as_str(), "<=>");
        assert_eq!(tok.end, pos!(0, 2, 2));
    }

    #[test]
    fn sequence_fails_on_first_failing_child() {
        let seq = Sequence::new(
            (CharParser::new('a'), CharParser::new('b')),
            |a: ElementaryToken, b: ElementaryToken| joined(vec![a, b]),
        );
        assert!(seq.parse(&Source::new("ac"), Position::default()).is_none());
        assert!(seq.parse(&Source::new("a"), Position::default()).is_none());
    }

    #[test]
    fn optional_yields_empty_at_attempt_start() {
        let opt = Optional::new(CharParser::new('+'));
        let src = Source::new("x+");
        let empty = opt.parse(&src, pos!(0, 0, 0)).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.start(), pos!(0, 0, 0));
        assert_eq!(empty.end(), pos!(0, 0, 0));
        assert!(empty.into_option().is_none());

        let present = opt.parse(&src, pos!(0, 1, 1)).unwrap();
        assert!(!present.is_empty());
        assert_eq!(present.as_option().unwrap().value.as_str(), "+");
    }

    #[test]
    fn optional_succeeds_at_end_of_input() {
        let opt = Optional::new(CharParser::new('+'));
        let src = Source::new("a");
        assert!(opt.parse(&src, pos!(0, 1, 1)).unwrap().is_empty());
    }

    #[test]
    fn many_collects_until_failure() {
        let many = Many::new(CharParser::new('a'), joined);
        let src = Source::new("aaab");
        let tok = many.parse(&src, Position::default()).unwrap();
        assert_eq!(tok.value.as_str(), "aaa");
        assert_eq!(tok.end, pos!(0, 2, 2));
    }

    #[test]
    fn many_stops_at_end_of_input_and_fails_on_zero() {
        let many = Many::new(CharParser::new('a'), joined);
        let tok = many.parse(&Source::new("aa"), Position::default()).unwrap();
        assert_eq!(tok.value.as_str(), "aa");
        assert!(many.parse(&Source::new("ba"), Position::default()).is_none());
    }

    #[test]
    fn many_stops_on_empty_placeholder() {
        let many = Many::new(Optional::new(CharParser::new('a')), |tokens: Vec<OrEmpty<ElementaryToken>>| {
            joined(tokens.into_iter().filter_map(OrEmpty::into_option).collect())
        });
        let tok = many.parse(&Source::new("ab"), Position::default()).unwrap();
        assert_eq!(tok.value.as_str(), "a");
        assert!(many.parse(&Source::new("b"), Position::default()).is_none());
    }

    #[test]
    fn map_and_decorate_post_process_results() {
        let digits = PredicateParser::new(|c: char| c.is_ascii_digit(), elementary(ElementaryKind::DecimalDigits));
        let upper = digits.map(|mut t| {
            t.kind = ElementaryKind::Identifier;
            t
        });
        let src = Source::new("12x");
        assert_eq!(
            upper.parse(&src, Position::default()).unwrap().kind,
            ElementaryKind::Identifier
        );

        let fallback = CharParser::new('x').decorate(|result, src: &Source| match result {
            Some(t) => Some(t),
            None => Some(ElementaryToken::single(
                ElementaryKind::SpecialSymbol,
                src.char_at(0).unwrap_or('?'),
                Position::default(),
            )),
        });
        let tok = fallback.parse(&src, Position::default()).unwrap();
        assert_eq!(tok.value.as_str(), "1");
    }

    #[test]
    fn boxed_and_borrowed_parsers_delegate() {
        let boxed = CharParser::new('q').boxed();
        let src = Source::new("q");
        assert!(boxed.parse(&src, Position::default()).is_some());
        let borrowed = &boxed;
        assert!(borrowed.parse(&src, Position::default()).is_some());
    }

    #[test]
    fn next_position_skips_past_token_end() {
        let src = Source::new("ab\ncd");
        let tok = ElementaryToken::single(ElementaryKind::SpecialSymbol, '\n', pos!(0, 2, 2));
        assert_eq!(next_position(&src, pos!(0, 2, 2), &tok), pos!(1, 0, 3));
        let empty: OrEmpty<ElementaryToken> = OrEmpty::Empty(pos!(0, 1, 1));
        assert_eq!(next_position(&src, pos!(0, 1, 1), &empty), pos!(0, 1, 1));
    }
}
