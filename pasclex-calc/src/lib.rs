//! # pasclex-calc
//!
//! An integer calculator built on **pasclex**. Text is lexed with the
//! Pascal-like token set, reduced to an expression token stream, parsed into
//! an AST by a shunting-yard parser and evaluated over `i64`.
//!
//! ## Overview
//!
//! - [`token`]: [`ExprToken`] and [`tokenize`], the bridge from the
//!   [`pasclex`] lexer to the parser.
//! - [`parser`]: [`parse`], the two-stack operator-precedence parser.
//! - [`ast`]: the [`Expr`] tree and [`Operator`].
//! - [`visitor`]: [`ExprVisitor`], plus [`dump`] and [`free_variables`]
//!   built on it.
//! - [`environment`]: variable bindings for evaluation.
//! - [`interpreter`]: [`evaluate`].
//! - [`error`]: [`ParsingError`], [`EvalError`] and [`CalcError`].
//!
//! ## Example
//!
//! ```rust
//! use pasclex_calc::{Environment, dump, evaluate_str, parse};
//!
//! let expr = parse("1 * (x + 3) { comments are skipped }").unwrap();
//! assert_eq!(dump(&expr), "Bin(Lit(1)*Par(Bin(Var(x)+Lit(3))))");
//!
//! let env = Environment::from_iter([("x", 4)]);
//! assert_eq!(evaluate_str("1 * (x + 3) - %11", &env).unwrap(), 4);
//! ```
pub mod ast;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod token;
pub mod visitor;

pub use ast::{BinaryExpression, Expr, Literal, Operator, ParenExpression, Variable};
pub use environment::{Binding, BindingError, Environment};
pub use error::{CalcError, EvalError, ParsingError};
pub use interpreter::{Evaluator, evaluate};
pub use parser::{parse, parse_source, parse_tokens};
pub use token::{ExprToken, ExprTokenKind, tokenize};
pub use visitor::{DumpVisitor, ExprVisitor, dump, free_variables, walk_binary, walk_expr, walk_paren};

/// Parses `text` and evaluates it in `env`.
pub fn evaluate_str(text: &str, env: &Environment) -> Result<i64, CalcError> {
    let expr = parse(text)?;
    Ok(evaluate(&expr, env)?)
}
