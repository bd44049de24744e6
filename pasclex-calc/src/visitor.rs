//! # Expression Visitors
//!
//! [`ExprVisitor`] has one handler per AST variant, each returning the
//! visitor's [`Output`](ExprVisitor::Output). The leaf handlers and
//! [`visit_operator`](ExprVisitor::visit_operator), which combines the
//! results of a binary expression's operands, are required. The handlers for
//! binary and parenthesized expressions default to the [`walk_binary`] and
//! [`walk_paren`] drivers, which visit the children in source order. An
//! override may call the driver itself.
use crate::ast::{BinaryExpression, Expr, Literal, Operator, ParenExpression, Variable};
use indexmap::IndexSet;
use smartstring::alias::String;

/// Visits an [`Expr`] bottom-up, producing one [`Output`](ExprVisitor::Output) per node.
pub trait ExprVisitor {
    type Output;

    fn visit_literal(&mut self, literal: &Literal) -> Self::Output;

    fn visit_variable(&mut self, variable: &Variable) -> Self::Output;

    /// Combines the results of the two operands of `operator`.
    fn visit_operator(
        &mut self,
        left: Self::Output,
        operator: Operator,
        right: Self::Output,
    ) -> Self::Output;

    fn visit_binary(&mut self, binary: &BinaryExpression) -> Self::Output {
        walk_binary(self, binary)
    }

    fn visit_paren(&mut self, paren: &ParenExpression) -> Self::Output {
        walk_paren(self, paren)
    }
}

/// Dispatches `expr` to the matching handler of `visitor`.
pub fn walk_expr<V: ExprVisitor + ?Sized>(visitor: &mut V, expr: &Expr) -> V::Output {
    match expr {
        Expr::Literal(l) => visitor.visit_literal(l),
        Expr::Variable(v) => visitor.visit_variable(v),
        Expr::Binary(b) => visitor.visit_binary(b),
        Expr::Paren(p) => visitor.visit_paren(p),
    }
}

/// Visits the left operand, then the right one, and combines the results
/// with [`ExprVisitor::visit_operator`].
pub fn walk_binary<V: ExprVisitor + ?Sized>(visitor: &mut V, binary: &BinaryExpression) -> V::Output {
    let left = walk_expr(visitor, &binary.left);
    let right = walk_expr(visitor, &binary.right);
    visitor.visit_operator(left, binary.operator, right)
}

/// Visits the operand and passes its result through.
pub fn walk_paren<V: ExprVisitor + ?Sized>(visitor: &mut V, paren: &ParenExpression) -> V::Output {
    walk_expr(visitor, &paren.operand)
}

/// Renders an expression as `Lit(..)`, `Var(..)`, `Bin(left op right)` and
/// `Par(..)`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DumpVisitor;

impl ExprVisitor for DumpVisitor {
    type Output = std::string::String;

    fn visit_literal(&mut self, literal: &Literal) -> Self::Output {
        format!("Lit({})", literal.value)
    }

    fn visit_variable(&mut self, variable: &Variable) -> Self::Output {
        format!("Var({})", variable.name)
    }

    fn visit_operator(&mut self, left: Self::Output, operator: Operator, right: Self::Output) -> Self::Output {
        format!("Bin({left}{operator}{right})")
    }

    fn visit_paren(&mut self, paren: &ParenExpression) -> Self::Output {
        format!("Par({})", walk_paren(self, paren))
    }
}

/// ```rust
/// # use pasclex_calc::{dump, parse};
/// assert_eq!(dump(&parse("1 * (x + 3)").unwrap()), "Bin(Lit(1)*Par(Bin(Var(x)+Lit(3))))");
/// ```
pub fn dump(expr: &Expr) -> std::string::String {
    walk_expr(&mut DumpVisitor, expr)
}

#[derive(Debug, Default)]
struct VariableCollector {
    names: IndexSet<String>,
}

impl ExprVisitor for VariableCollector {
    type Output = ();

    fn visit_literal(&mut self, _literal: &Literal) {}

    fn visit_variable(&mut self, variable: &Variable) {
        self.names.insert(variable.name.clone());
    }

    fn visit_operator(&mut self, _left: (), _operator: Operator, _right: ()) {}
}

/// Names of the variables in `expr`, each once, in order of first use.
pub fn free_variables(expr: &Expr) -> Vec<String> {
    let mut collector = VariableCollector::default();
    walk_expr(&mut collector, expr);
    collector.names.into_iter().collect()
}
