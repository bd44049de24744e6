//! # Expression Tokens
//!
//! The expression parser works on a reduced token stream: literals,
//! identifiers, operators and parentheses. [`tokenize`] derives it from the
//! full [`pasclex`] lexer:
//!
//! - whitespace and comments are dropped;
//! - numbers of any radix become literals, keeping their source text
//!   (`$FF`, `%101`, `2.5`);
//! - a signed number becomes an operator for its sign followed by a literal,
//!   since expressions have no unary operators;
//! - `(` and `)` become parentheses and every other special symbol becomes
//!   an operator, to be accepted or rejected by the parser.
use crate::error::ParsingError;
use pasclex::{ElementaryKind, Lexer, Position, Source, Spanned, Token};
use smartstring::alias::String;

/// Kind of an [`ExprToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprTokenKind {
    Literal,
    Identifier,
    Operator,
    OpeningParen,
    ClosingParen,
}

impl ExprTokenKind {
    /// May a token of kind `next` directly follow one of this kind?
    ///
    /// The start of input behaves like an [`OpeningParen`](Self::OpeningParen).
    ///
    /// ```rust
    /// # use pasclex_calc::ExprTokenKind::*;
    /// assert!(Operator.can_be_followed_by(OpeningParen));
    /// assert!(!Literal.can_be_followed_by(Identifier));
    /// assert!(!OpeningParen.can_be_followed_by(Operator));
    /// ```
    pub fn can_be_followed_by(self, next: ExprTokenKind) -> bool {
        use ExprTokenKind::*;
        match self {
            Operator => matches!(next, Literal | Identifier | OpeningParen),
            Identifier | Literal => matches!(next, Operator | ClosingParen),
            OpeningParen => next != Operator,
            ClosingParen => matches!(next, Operator | ClosingParen),
        }
    }
}

/// A token of the reduced expression stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprToken {
    pub kind: ExprTokenKind,
    pub value: String,
    pub start: Position,
    pub end: Position,
}

impl ExprToken {
    /// An expression token spanning `start..=end`.
    pub fn new(kind: ExprTokenKind, value: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            kind,
            value: value.into(),
            start,
            end,
        }
    }
}

impl Spanned for ExprToken {
    fn start(&self) -> Position {
        self.start
    }
    fn end(&self) -> Position {
        self.end
    }
}

fn push_token(src: &Source, token: Token, out: &mut Vec<ExprToken>) -> Result<(), ParsingError> {
    match token {
        t if t.is_whitespace() => {}
        Token::Comment(_) => {}
        Token::Elementary(e) => {
            let kind = match e.kind {
                ElementaryKind::Identifier => ExprTokenKind::Identifier,
                ElementaryKind::SpecialSymbol => match e.value.as_str() {
                    "(" => ExprTokenKind::OpeningParen,
                    ")" => ExprTokenKind::ClosingParen,
                    _ => ExprTokenKind::Operator,
                },
                other => {
                    return Err(ParsingError::UnknownTokenType {
                        kind: other.name(),
                        position: e.start,
                    });
                }
            };
            out.push(ExprToken::new(kind, e.value, e.start, e.end));
        }
        Token::Number(n) => {
            if let Some(sign) = &n.sign {
                out.push(ExprToken::new(
                    ExprTokenKind::Operator,
                    sign.value.clone(),
                    sign.start,
                    sign.end,
                ));
            }
            let span = n.number.span();
            out.push(ExprToken::new(
                ExprTokenKind::Literal,
                src.span_text(&span),
                span.start,
                span.end,
            ));
        }
        Token::CharacterString(s) => {
            return Err(ParsingError::UnknownTokenType {
                kind: "character string",
                position: s.start(),
            });
        }
    }
    Ok(())
}

/// Converts `src` into expression tokens.
///
/// Fails with [`ParsingError::UnexpectedCharacter`] if the lexer cannot
/// consume the whole text.
///
/// ```rust
/// # use pasclex::Source;
/// # use pasclex_calc::{ExprTokenKind, tokenize};
/// let tokens = tokenize(&Source::new("x-1 { minus one }")).unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     [ExprTokenKind::Identifier, ExprTokenKind::Operator, ExprTokenKind::Literal]
/// );
/// ```
pub fn tokenize(src: &Source) -> Result<Vec<ExprToken>, ParsingError> {
    let mut lexer = Lexer::new(src);
    let mut out = Vec::new();
    for token in lexer.by_ref() {
        push_token(src, token, &mut out)?;
    }
    if !lexer.is_exhausted() {
        let position = lexer.position();
        if let Some(character) = src.char_at(position.offset) {
            return Err(ParsingError::UnexpectedCharacter {
                character,
                position,
            });
        }
    }
    log::trace!("expression tokens: {:?}", out);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pasclex::pos;
    use ExprTokenKind::*;

    fn kinds_and_values(text: &str) -> Vec<(ExprTokenKind, std::string::String)> {
        tokenize(&Source::new(text))
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.value.to_string()))
            .collect()
    }

    fn kv(kind: ExprTokenKind, value: &str) -> (ExprTokenKind, std::string::String) {
        (kind, value.to_string())
    }

    #[test]
    fn follow_table() {
        let all = [Literal, Identifier, Operator, OpeningParen, ClosingParen];
        let allowed = |prev: ExprTokenKind| -> Vec<ExprTokenKind> {
            all.into_iter().filter(|n| prev.can_be_followed_by(*n)).collect()
        };
        assert_eq!(allowed(Operator), vec![Literal, Identifier, OpeningParen]);
        assert_eq!(allowed(Literal), vec![Operator, ClosingParen]);
        assert_eq!(allowed(Identifier), vec![Operator, ClosingParen]);
        assert_eq!(
            allowed(OpeningParen),
            vec![Literal, Identifier, OpeningParen, ClosingParen]
        );
        assert_eq!(allowed(ClosingParen), vec![Operator, ClosingParen]);
    }

    #[test]
    fn skips_whitespace_and_comments() {
        assert_eq!(
            kinds_and_values("a * (b + 1) // done"),
            vec![
                kv(Identifier, "a"),
                kv(Operator, "*"),
                kv(OpeningParen, "("),
                kv(Identifier, "b"),
                kv(Operator, "+"),
                kv(Literal, "1"),
                kv(ClosingParen, ")"),
            ]
        );
    }

    #[test]
    fn splits_signed_numbers() {
        let tokens = tokenize(&Source::new("x-$1F")).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[1].kind, Operator);
        assert_eq!(tokens[1].start, pos!(0, 1, 1));
        assert_eq!(tokens[2].kind, Literal);
        assert_eq!(tokens[2].value.as_str(), "$1F");
        assert_eq!(tokens[2].start, pos!(0, 2, 2));
        assert_eq!(tokens[2].end, pos!(0, 4, 4));
    }

    #[test]
    fn keeps_literal_source_text() {
        assert_eq!(
            kinds_and_values("%101 + &17 * 2.5e1"),
            vec![
                kv(Literal, "%101"),
                kv(Operator, "+"),
                kv(Literal, "&17"),
                kv(Operator, "*"),
                kv(Literal, "2.5e1"),
            ]
        );
    }

    #[test]
    fn other_symbols_become_operators() {
        assert_eq!(
            kinds_and_values("a := b"),
            vec![kv(Identifier, "a"), kv(Operator, ":="), kv(Identifier, "b")]
        );
    }

    #[test]
    fn character_strings_are_rejected() {
        let err = tokenize(&Source::new("1 + 'a'")).unwrap_err();
        assert_eq!(
            err,
            ParsingError::UnknownTokenType {
                kind: "character string",
                position: pos!(0, 4, 4),
            }
        );
    }

    #[test]
    fn unrecognised_character_is_reported() {
        let err = tokenize(&Source::new("1 +\n ? 2")).unwrap_err();
        assert_eq!(
            err,
            ParsingError::UnexpectedCharacter {
                character: '?',
                position: pos!(1, 1, 5),
            }
        );
    }

    #[test]
    fn empty_text_has_no_tokens() {
        assert!(tokenize(&Source::new("")).unwrap().is_empty());
        assert!(tokenize(&Source::new("  { nothing } ")).unwrap().is_empty());
    }
}
