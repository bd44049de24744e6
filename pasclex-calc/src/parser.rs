//! # Expression Parser
//!
//! A two-stack shunting-yard parser. Operands (AST nodes) go on one stack,
//! operators and open-parenthesis markers on the other. Before a token is
//! consumed, [`ExprTokenKind::can_be_followed_by`] checks it against the
//! token before it, which is all the "expecting operand / expecting
//! operator" state the parser needs.
//!
//! An incoming operator first reduces every stacked operator of equal or
//! higher precedence down to the nearest open parenthesis. Equal precedence
//! reducing first makes all four operators left-associative.
use crate::ast::{Expr, Operator};
use crate::error::ParsingError;
use crate::token::{ExprToken, ExprTokenKind, tokenize};
use pasclex::{Position, Source, Spanned};

enum StackItem {
    Operator(Operator),
    OpenParen,
}

/// Parses an arithmetic expression.
///
/// ```rust
/// # use pasclex_calc::{dump, parse, ParsingError};
/// assert_eq!(dump(&parse("1 * x + 3").unwrap()), "Bin(Bin(Lit(1)*Var(x))+Lit(3))");
/// assert!(matches!(parse("(1"), Err(ParsingError::ClosingBracketExpected { .. })));
/// ```
pub fn parse(text: &str) -> Result<Expr, ParsingError> {
    parse_source(&Source::new(text))
}

/// Lexes and parses `src`; like [`parse`] for an already decoded text.
pub fn parse_source(src: &Source) -> Result<Expr, ParsingError> {
    let tokens = tokenize(src)?;
    let expr = parse_tokens(&tokens, src.position_of(src.len()))?;
    if let (Some(first), Some(last)) = (tokens.first(), tokens.last()) {
        log::debug!("parsed {} over {}", expr, first.span().merge(&last.span()).display());
    }
    Ok(expr)
}

/// Parses an already tokenized expression; `eof` is reported for errors
/// found at the end of input.
pub fn parse_tokens(tokens: &[ExprToken], eof: Position) -> Result<Expr, ParsingError> {
    let mut operands: Vec<Expr> = Vec::new();
    let mut operators: Vec<StackItem> = Vec::new();
    let mut unmatched = 0usize;
    let mut prev = ExprTokenKind::OpeningParen;

    for token in tokens {
        if !prev.can_be_followed_by(token.kind) {
            return Err(unexpected(token));
        }
        match token.kind {
            ExprTokenKind::Literal => {
                log::trace!("Shift {}", token.value);
                operands.push(Expr::literal(token.value.clone()));
            }
            ExprTokenKind::Identifier => {
                log::trace!("Shift {}", token.value);
                operands.push(Expr::variable(token.value.clone()));
            }
            ExprTokenKind::Operator => {
                let op = Operator::from_symbol(&token.value).ok_or_else(|| {
                    ParsingError::UnknownOperatorToken {
                        token: token.value.clone(),
                        position: token.start,
                    }
                })?;
                while let Some(StackItem::Operator(top)) = operators.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    let top = *top;
                    operators.pop();
                    reduce(&mut operands, top, token.start)?;
                }
                log::trace!("Push {}", op);
                operators.push(StackItem::Operator(op));
            }
            ExprTokenKind::OpeningParen => {
                unmatched += 1;
                operators.push(StackItem::OpenParen);
            }
            ExprTokenKind::ClosingParen => {
                if unmatched == 0 || prev == ExprTokenKind::OpeningParen {
                    return Err(unexpected(token));
                }
                unmatched -= 1;
                close_paren(&mut operands, &mut operators, token.start)?;
            }
        }
        prev = token.kind;
    }

    if prev == ExprTokenKind::Operator {
        return Err(ParsingError::UnexpectedEof { position: eof });
    }
    if unmatched != 0 {
        return Err(ParsingError::ClosingBracketExpected { position: eof });
    }
    while let Some(item) = operators.pop() {
        match item {
            StackItem::Operator(op) => reduce(&mut operands, op, eof)?,
            StackItem::OpenParen => {
                return Err(ParsingError::MalformedExpression { position: eof });
            }
        }
    }

    let result = operands.pop();
    match (result, operands.is_empty()) {
        (Some(expr), true) => {
            log::trace!("Accept");
            Ok(expr)
        }
        (None, _) => Err(ParsingError::UnexpectedEof { position: eof }),
        (Some(_), false) => Err(ParsingError::MalformedExpression { position: eof }),
    }
}

fn unexpected(token: &ExprToken) -> ParsingError {
    ParsingError::UnexpectedToken {
        token: token.value.clone(),
        position: token.start,
    }
}

fn reduce(operands: &mut Vec<Expr>, op: Operator, at: Position) -> Result<(), ParsingError> {
    let (Some(right), Some(left)) = (operands.pop(), operands.pop()) else {
        return Err(ParsingError::MalformedExpression { position: at });
    };
    log::trace!("Reduce {}", op);
    operands.push(Expr::binary(left, op, right));
    Ok(())
}

fn close_paren(
    operands: &mut Vec<Expr>,
    operators: &mut Vec<StackItem>,
    at: Position,
) -> Result<(), ParsingError> {
    while let Some(item) = operators.pop() {
        match item {
            StackItem::Operator(op) => reduce(operands, op, at)?,
            StackItem::OpenParen => {
                let inner = operands
                    .pop()
                    .ok_or(ParsingError::MalformedExpression { position: at })?;
                operands.push(Expr::paren(inner));
                return Ok(());
            }
        }
    }
    Err(ParsingError::MalformedExpression { position: at })
}
