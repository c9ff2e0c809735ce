// AST (Abstract Syntax Tree) definitions for TINY programs

use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Comparison
    Equal,
    LessThan,
    // Arithmetic
    Plus,
    Minus,
    Times,
    Divide,
    Power,
}

impl BinOp {
    /// Name used by the tree printer.
    pub fn name(self) -> &'static str {
        match self {
            BinOp::Equal => "Equal",
            BinOp::LessThan => "LessThan",
            BinOp::Plus => "Plus",
            BinOp::Minus => "Minus",
            BinOp::Times => "Times",
            BinOp::Divide => "Divide",
            BinOp::Power => "Power",
        }
    }
}

/// Expression type slot.
///
/// The parser always produces [`ExprType::Untyped`]; a checking pass may later
/// fill in `Integer` (arithmetic) or `Boolean` (comparisons).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExprType {
    #[default]
    Untyped,
    Integer,
    Boolean,
}

impl ExprType {
    pub fn name(self) -> &'static str {
        match self {
            ExprType::Untyped => "Void",
            ExprType::Integer => "Integer",
            ExprType::Boolean => "Boolean",
        }
    }
}

/// Uniform kind tag shared by statements and expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    If,
    Repeat,
    Assign,
    Read,
    Write,
    Operator,
    Number,
    Identifier,
}

impl NodeKind {
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::If => "If",
            NodeKind::Repeat => "Repeat",
            NodeKind::Assign => "Assign",
            NodeKind::Read => "Read",
            NodeKind::Write => "Write",
            NodeKind::Operator => "Oper",
            NodeKind::Number => "Num",
            NodeKind::Identifier => "ID",
        }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
        location: SourceLocation,
    },
    Repeat {
        body: Vec<Stmt>,
        condition: Expr,
        location: SourceLocation,
    },
    Assign {
        name: String,
        value: Expr,
        location: SourceLocation,
    },
    Read {
        name: String,
        location: SourceLocation,
    },
    Write {
        value: Expr,
        location: SourceLocation,
    },
}

impl Stmt {
    pub fn kind(&self) -> NodeKind {
        match self {
            Stmt::If { .. } => NodeKind::If,
            Stmt::Repeat { .. } => NodeKind::Repeat,
            Stmt::Assign { .. } => NodeKind::Assign,
            Stmt::Read { .. } => NodeKind::Read,
            Stmt::Write { .. } => NodeKind::Write,
        }
    }

    /// Get the source location of this statement
    pub fn location(&self) -> &SourceLocation {
        match self {
            Stmt::If { location, .. } => location,
            Stmt::Repeat { location, .. } => location,
            Stmt::Assign { location, .. } => location,
            Stmt::Read { location, .. } => location,
            Stmt::Write { location, .. } => location,
        }
    }
}

/// Expression node: the shape, its type slot, and where it starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub expr_type: ExprType,
    pub location: SourceLocation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Operator {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Number(i64),
    Identifier(String),
}

impl Expr {
    pub fn new(kind: ExprKind, location: SourceLocation) -> Self {
        Expr {
            kind,
            expr_type: ExprType::Untyped,
            location,
        }
    }

    /// Operator node spanning from its left operand.
    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        let location = left.location;
        Expr::new(
            ExprKind::Operator {
                op,
                left: Box::new(left),
                right: Box::new(right),
            },
            location,
        )
    }

    pub fn node_kind(&self) -> NodeKind {
        match self.kind {
            ExprKind::Operator { .. } => NodeKind::Operator,
            ExprKind::Number(_) => NodeKind::Number,
            ExprKind::Identifier(_) => NodeKind::Identifier,
        }
    }
}

// Left-associative chains grow as deep as their operator count, so children
// are released from a heap stack instead of by nested drop calls.
impl Drop for Expr {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        take_operands(&mut self.kind, &mut pending);
        while let Some(mut expr) = pending.pop() {
            take_operands(&mut expr.kind, &mut pending);
        }
    }
}

fn take_operands(kind: &mut ExprKind, pending: &mut Vec<Box<Expr>>) {
    if !matches!(kind, ExprKind::Operator { .. }) {
        return;
    }
    if let ExprKind::Operator { left, right, .. } = std::mem::replace(kind, ExprKind::Number(0)) {
        pending.push(left);
        pending.push(right);
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program { statements }
    }
}
