//! # pasclex
//!
//! A combinator-based lexer for a Pascal-like token set that tracks exact
//! source positions (line, column and absolute offset) through every
//! combination.
//!
//! ## Overview
//!
//! - [`cursor`]: [`Position`], [`Span`], [`Source`] and the [`advance`]
//!   function every parser uses to move through the text.
//! - [`token`]: the token model. Elementary tokens carry text; compound
//!   tokens (numbers, strings, comments) are built from other tokens.
//! - [`combinator`]: the [`TokenParser`] trait and the alternative,
//!   sequence, optional, repetition, map and decorate combinators.
//! - [`primitive`]: single-character, fixed-symbol, predicate and
//!   table-driven DFA parsers.
//! - [`parsers`]: identifiers, numbers, character strings, nested comments,
//!   special symbols and whitespace.
//! - [`lexer`]: the [`Lexer`] iterator and [`lex`].
//!
//! ## Example
//!
//! ```rust
//! use pasclex::{Spanned, Token, lex, pos};
//!
//! let tokens = lex("x := $FF; { hex }", 0);
//! assert_eq!(tokens.len(), 8);
//! match &tokens[4] {
//!     Token::Number(n) => assert_eq!(n.start(), pos!(0, 5, 5)),
//!     other => panic!("unexpected {other:?}"),
//! }
//! assert!(matches!(tokens.last(), Some(Token::Comment(_))));
//! ```
//!
//! Parsing is pure: every parser maps `(source, position)` to an optional
//! token and keeps no state between calls, so independent texts can be
//! lexed on separate threads.

pub mod combinator;
pub mod cursor;
pub mod lexer;
pub mod parsers;
pub mod primitive;
pub mod token;

pub use combinator::{
    Alternative, BoxedParser, Decorate, Many, Map, Optional, OrEmpty, Sequence, TokenParser,
    next_position,
};
pub use cursor::{Position, Source, Span, advance};
pub use lexer::{Lexer, LexerStats, lex};
pub use parsers::{
    CommentParser, character_string, identifier, number, sign, special_symbol, unsigned_integer,
    unsigned_real, whitespace,
};
pub use primitive::{
    CharParser, DfaParser, DfaState, DfaTable, PredicateParser, SymbolParser, elementary,
    elementary_char,
};
pub use token::{
    CharacterStringToken, CommentKind, CommentToken, ControlString, ElementaryKind, ElementaryToken,
    Fraction, NumberToken, QuotedString, Radix, ScaleFactor, Spanned, StringElement, Token,
    UnsignedInteger, UnsignedNumber, UnsignedReal,
};
