//! # Lexer driver
//!
//! [`Lexer`] walks a [`Source`] from a starting position. At each step it
//! tries a whitespace run first and otherwise the ordered alternative
//!
//! 1. number
//! 2. identifier
//! 3. comment
//! 4. character string
//! 5. special symbol
//!
//! and yields the token found. The first position where nothing matches
//! ends the stream; unrecognised trailing input is not an error, so callers
//! that care compare [`Lexer::position`] with the end of the text.
//!
//! # Example
//!
//! ```rust
//! # use pasclex::lex;
//! let tokens = lex("x := y+z;", 0);
//! assert_eq!(tokens.len(), 8);
//! assert!(tokens[1].is_whitespace());
//!
//! // Lexing stops at the first unrecognised character.
//! assert_eq!(lex("a ! b", 0).len(), 2);
//! ```

use crate::combinator::{Alternative, BoxedParser, TokenParser, next_position};
use crate::cursor::{Position, Source};
use crate::parsers::{CommentParser, character_string, identifier, number, special_symbol, whitespace};
use crate::token::{ElementaryToken, Spanned, Token};
use once_cell::sync::Lazy;
use std::iter::FusedIterator;

static WHITESPACE: Lazy<BoxedParser<ElementaryToken>> = Lazy::new(|| whitespace().boxed());

static STEP: Lazy<Alternative<Token>> = Lazy::new(|| {
    Alternative::new(vec![
        number().map(Token::Number).boxed(),
        identifier().map(Token::Elementary).boxed(),
        CommentParser.map(Token::Comment).boxed(),
        character_string().map(Token::CharacterString).boxed(),
        special_symbol().map(Token::Elementary).boxed(),
    ])
});

/// Counters collected while lexing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LexerStats {
    /// Tokens yielded, whitespace included.
    pub tokens: usize,
    /// Whitespace runs among them.
    pub whitespace: usize,
    /// Characters consumed.
    pub chars: usize,
}

/// Iterator over the tokens of a [`Source`].
pub struct Lexer<'a> {
    src: &'a Source,
    position: Position,
    stopped: bool,
    stats: LexerStats,
}

impl<'a> Lexer<'a> {
    /// Lexes `src` from its beginning.
    pub fn new(src: &'a Source) -> Self {
        Self::starting_at(src, Position::default())
    }

    /// Lexes `src` from `at`, which must be a position of `src` (for instance
    /// from [`Source::position_of`]).
    pub fn starting_at(src: &'a Source, at: Position) -> Self {
        Self {
            src,
            position: at,
            stopped: false,
            stats: LexerStats::default(),
        }
    }

    /// Where the next token would start; after the stream ends this is where
    /// lexing stopped.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Has the whole text been consumed?
    pub fn is_exhausted(&self) -> bool {
        self.position.offset >= self.src.len()
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> LexerStats {
        self.stats.clone()
    }

    fn emit(&mut self, token: Token) -> Token {
        let next = next_position(self.src, self.position, &token);
        let span = token.span();
        self.stats.tokens += 1;
        self.stats.chars += span.len();
        log::trace!(
            "{} {:?} at {}",
            token.kind_name(),
            self.src.span_text(&span),
            self.position
        );
        self.position = next;
        token
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.stopped || self.is_exhausted() {
            return None;
        }
        if let Some(ws) = WHITESPACE.parse(self.src, self.position) {
            self.stats.whitespace += 1;
            return Some(self.emit(Token::Elementary(ws)));
        }
        match STEP.parse(self.src, self.position) {
            Some(token) => Some(self.emit(token)),
            None => {
                log::trace!(
                    "stopped at {} before {:?}",
                    self.position,
                    self.src.char_at(self.position.offset)
                );
                self.stopped = true;
                None
            }
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Lexes `text` from the character offset `start_offset`.
///
/// Returns an empty list if `start_offset` is at or past the end of the text.
pub fn lex(text: &str, start_offset: usize) -> Vec<Token> {
    let src = Source::new(text);
    if start_offset >= src.len() {
        return Vec::new();
    }
    let at = src.position_of(start_offset);
    let mut lexer = Lexer::starting_at(&src, at);
    let tokens: Vec<Token> = lexer.by_ref().collect();
    log::debug!("lexed {} tokens: {:?}", tokens.len(), lexer.stats());
    tokens
}
