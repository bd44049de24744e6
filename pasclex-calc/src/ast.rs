//! # Expression AST
//!
//! A closed sum type: every consumer `match`es on [`Expr`] and is checked
//! for exhaustiveness.
use smartstring::alias::String;
use std::fmt;

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Plus,
    Minus,
    Mult,
    Div,
}

impl Operator {
    /// Maps `+`, `-`, `*` and `/` to their operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Plus),
            "-" => Some(Self::Minus),
            "*" => Some(Self::Mult),
            "/" => Some(Self::Div),
            _ => None,
        }
    }

    /// The operator as written in the source.
    pub const fn symbol(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Mult => '*',
            Self::Div => '/',
        }
    }

    /// Binding strength; higher binds tighter.
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 0,
            Self::Mult | Self::Div => 1,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A numeric literal as written in the source, e.g. `42` or `$2A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    pub value: String,
}

/// A reference to a bound name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    pub name: String,
}

/// `left operator right`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryExpression {
    pub left: Box<Expr>,
    pub operator: Operator,
    pub right: Box<Expr>,
}

/// An explicitly parenthesized expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenExpression {
    pub operand: Box<Expr>,
}

/// An expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(Literal),
    Variable(Variable),
    Binary(BinaryExpression),
    Paren(ParenExpression),
}

impl Expr {
    /// A literal leaf.
    pub fn literal(value: impl Into<String>) -> Self {
        Self::Literal(Literal {
            value: value.into(),
        })
    }

    /// A variable leaf.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(Variable { name: name.into() })
    }

    /// A binary node over boxed operands.
    pub fn binary(left: Expr, operator: Operator, right: Expr) -> Self {
        Self::Binary(BinaryExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        })
    }

    /// A parenthesized node.
    pub fn paren(operand: Expr) -> Self {
        Self::Paren(ParenExpression {
            operand: Box::new(operand),
        })
    }
}

/// Formats the expression in the compact dump notation of
/// [`dump`](crate::dump).
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::visitor::dump(self))
    }
}
