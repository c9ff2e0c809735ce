//! Depth-first AST walker.
//!
//! Every consumer that renders or inspects the tree goes through
//! [`walk_program`], so they all agree on one visiting order:
//!
//! 1. the node itself,
//! 2. its child slots in order 0, 1, 2 (a slot may hold a whole statement
//!    sequence, which is walked in full),
//! 3. the next statement of the enclosing sequence.
//!
//! The visitor receives each node together with its nesting depth. Statements
//! of one sequence share a depth; child slots are one level deeper.

use crate::parser::ast::{Expr, ExprKind, NodeKind, Program, SourceLocation, Stmt};

/// Borrowed view of any AST node.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Stmt(&'a Stmt),
    Expr(&'a Expr),
}

/// Contents of one child slot.
#[derive(Debug, Clone, Copy)]
pub enum Child<'a> {
    Expr(&'a Expr),
    Seq(&'a [Stmt]),
}

impl<'a> NodeRef<'a> {
    pub fn kind(self) -> NodeKind {
        match self {
            NodeRef::Stmt(stmt) => stmt.kind(),
            NodeRef::Expr(expr) => expr.node_kind(),
        }
    }

    pub fn location(self) -> SourceLocation {
        match self {
            NodeRef::Stmt(stmt) => *stmt.location(),
            NodeRef::Expr(expr) => expr.location,
        }
    }

    /// The three child slots of this node, unused slots as `None`.
    pub fn children(self) -> [Option<Child<'a>>; 3] {
        match self {
            NodeRef::Stmt(Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            }) => [
                Some(Child::Expr(condition)),
                Some(Child::Seq(then_branch)),
                else_branch.as_deref().map(Child::Seq),
            ],
            NodeRef::Stmt(Stmt::Repeat {
                body, condition, ..
            }) => [Some(Child::Seq(body)), Some(Child::Expr(condition)), None],
            NodeRef::Stmt(Stmt::Assign { value, .. }) | NodeRef::Stmt(Stmt::Write { value, .. }) => {
                [Some(Child::Expr(value)), None, None]
            }
            NodeRef::Stmt(Stmt::Read { .. }) => [None, None, None],
            NodeRef::Expr(expr) => match &expr.kind {
                ExprKind::Operator { left, right, .. } => {
                    [Some(Child::Expr(left)), Some(Child::Expr(right)), None]
                }
                ExprKind::Number(_) | ExprKind::Identifier(_) => [None, None, None],
            },
        }
    }
}

/// Visit every node of `program` depth-first, calling `f(node, depth)`.
pub fn walk_program<'a, F>(program: &'a Program, f: &mut F)
where
    F: FnMut(NodeRef<'a>, usize),
{
    walk_seq(&program.statements, 0, f);
}

/// Work left to visit, most recent last.
enum Pending<'a> {
    Node(NodeRef<'a>, usize),
    Seq(&'a [Stmt], usize),
}

/// Visit a statement sequence, each statement followed by its subtree.
///
/// Runs on an explicit stack, so operator chains of any length are walked
/// without deep recursion.
pub fn walk_seq<'a, F>(statements: &'a [Stmt], depth: usize, f: &mut F)
where
    F: FnMut(NodeRef<'a>, usize),
{
    let mut pending = vec![Pending::Seq(statements, depth)];

    while let Some(item) = pending.pop() {
        match item {
            Pending::Seq(statements, depth) => pending.extend(
                statements
                    .iter()
                    .rev()
                    .map(|stmt| Pending::Node(NodeRef::Stmt(stmt), depth)),
            ),
            Pending::Node(node, depth) => {
                f(node, depth);
                // Pushed in reverse so slot 0 is popped first
                for child in node.children().into_iter().rev().flatten() {
                    pending.push(match child {
                        Child::Expr(expr) => Pending::Node(NodeRef::Expr(expr), depth + 1),
                        Child::Seq(statements) => Pending::Seq(statements, depth + 1),
                    });
                }
            }
        }
    }
}
