//! # Interpreter
//!
//! Evaluates an [`Expr`] over `i64` with checked arithmetic: overflow and
//! division by zero are reported as [`EvalError`] values. Division
//! truncates toward zero.
use crate::ast::{BinaryExpression, Expr, Literal, Operator, Variable};
use crate::environment::Environment;
use crate::error::EvalError;
use crate::visitor::{ExprVisitor, walk_expr};

impl Operator {
    /// Applies the operator, reporting overflow and division by zero.
    pub fn apply(&self, left: i64, right: i64) -> Result<i64, EvalError> {
        let result = match self {
            Self::Plus => left.checked_add(right),
            Self::Minus => left.checked_sub(right),
            Self::Mult => left.checked_mul(right),
            Self::Div => {
                if right == 0 {
                    return Err(EvalError::DivisionByZero);
                }
                left.checked_div(right)
            }
        };
        result.ok_or(EvalError::Overflow {
            operator: self.symbol(),
        })
    }
}

impl Literal {
    /// The literal's value; `%`, `&` and `$` select binary, octal and
    /// hexadecimal digits.
    pub fn to_i64(&self) -> Result<i64, EvalError> {
        let text = self.value.as_str();
        let (digits, radix) = match text.chars().next() {
            Some('%') => (&text[1..], 2),
            Some('&') => (&text[1..], 8),
            Some('$') => (&text[1..], 16),
            _ => (text, 10),
        };
        i64::from_str_radix(digits, radix).map_err(|source| EvalError::InvalidLiteral {
            literal: self.value.clone(),
            source,
        })
    }
}

/// Evaluates expressions against the bindings of an [`Environment`].
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    env: &'a Environment,
}

impl<'a> Evaluator<'a> {
    /// An evaluator reading variables from `env`.
    pub fn new(env: &'a Environment) -> Self {
        Self { env }
    }
}

impl ExprVisitor for Evaluator<'_> {
    type Output = Result<i64, EvalError>;

    fn visit_literal(&mut self, literal: &Literal) -> Self::Output {
        literal.to_i64()
    }

    fn visit_variable(&mut self, variable: &Variable) -> Self::Output {
        self.env
            .get(&variable.name)
            .ok_or_else(|| EvalError::UnboundVariable {
                name: variable.name.clone(),
            })
    }

    fn visit_operator(&mut self, left: Self::Output, operator: Operator, right: Self::Output) -> Self::Output {
        operator.apply(left?, right?)
    }

    fn visit_binary(&mut self, binary: &BinaryExpression) -> Self::Output {
        let left = walk_expr(self, &binary.left)?;
        let right = walk_expr(self, &binary.right)?;
        binary.operator.apply(left, right)
    }
}

/// Evaluates `expr`, looking variables up in `env`.
///
/// ```rust
/// # use pasclex_calc::{Environment, evaluate, parse};
/// let expr = parse("(x + $10) * 2").unwrap();
/// let env = Environment::from_iter([("x", 1)]);
/// assert_eq!(evaluate(&expr, &env).unwrap(), 34);
/// ```
pub fn evaluate(expr: &Expr, env: &Environment) -> Result<i64, EvalError> {
    walk_expr(&mut Evaluator::new(env), expr)
}
