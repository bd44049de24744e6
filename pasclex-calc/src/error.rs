//! # Calculator Error Types
//!
//! - [`ParsingError`]: the expression text could not be turned into an AST.
//!   Every variant names the offending token or character and where it was
//!   found.
//! - [`EvalError`]: a well-formed expression could not be evaluated.
//! - [`CalcError`]: either of the above, so the parse-then-evaluate pipeline
//!   can use `?` throughout.
use pasclex::Position;
use smartstring::alias::String;
use std::num::ParseIntError;
use thiserror::Error;

/// The expression text is not a well-formed expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParsingError {
    /// The lexer produced a token that has no place in an expression, such
    /// as a character string.
    #[error("unknown token type: {kind} at {position}")]
    UnknownTokenType {
        kind: &'static str,
        position: Position,
    },

    /// A symbol in operator position that is not `+`, `-`, `*` or `/`.
    #[error("unknown operator token {token} at {position}")]
    UnknownOperatorToken { token: String, position: Position },

    /// A token that cannot follow the one before it, or a `)` without a
    /// matching `(`.
    #[error("unexpected token: {token} at {position}")]
    UnexpectedToken { token: String, position: Position },

    /// The text ended where an operand was expected.
    #[error("unexpected end of input at {position}")]
    UnexpectedEof { position: Position },

    /// The text ended with unclosed parentheses.
    #[error(") expected at {position}")]
    ClosingBracketExpected { position: Position },

    /// The lexer stopped at a character it does not recognise.
    #[error("unexpected character {character:?} at {position}")]
    UnexpectedCharacter { character: char, position: Position },

    /// The operand and operator stacks disagree at `position`.
    #[error("malformed expression at {position}")]
    MalformedExpression { position: Position },
}

/// A well-formed expression failed to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unbound variable {name}")]
    UnboundVariable { name: String },

    #[error("division by zero")]
    DivisionByZero,

    #[error("integer overflow in {operator}")]
    Overflow { operator: char },

    /// A literal that is not an `i64` in its radix, e.g. a real number.
    #[error("invalid integer literal {literal}")]
    InvalidLiteral {
        literal: String,
        #[source]
        source: ParseIntError,
    },
}

/// Any failure of [`evaluate_str`](crate::evaluate_str).
///
/// ```rust
/// # use pasclex_calc::{CalcError, Environment, evaluate_str};
/// let err = evaluate_str("1 / (x - x)", &Environment::from_iter([("x", 4)])).unwrap_err();
/// assert!(matches!(err, CalcError::Eval(_)));
/// let err = evaluate_str("1 +", &Environment::new()).unwrap_err();
/// assert!(matches!(err, CalcError::Parsing(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("parsing error: {0}")]
    Parsing(#[from] ParsingError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}
