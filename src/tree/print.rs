//! Text rendering of the parse tree.
//!
//! One line per node in walk order, indented [`INDENT`] spaces per level:
//!
//! ```text
//! [Read][x]
//! [If]
//!    [Oper][LessThan]
//!       [Num][0]
//!       [ID][x]
//!    [Assign][fact]
//!       [Num][1]
//! ```

use super::walk::{walk_program, NodeRef};
use crate::parser::ast::{ExprKind, ExprType, NodeKind, Program, SourceLocation, Stmt};

pub const INDENT: usize = 3;

/// A single rendered node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    pub depth: usize,
    pub kind: NodeKind,
    pub label: String,
    pub location: SourceLocation,
}

impl TreeLine {
    pub fn render(&self) -> String {
        format!("{:width$}{}", "", self.label, width = self.depth * INDENT)
    }
}

/// Bracketed label for a node: kind, payload, and a known expression type.
pub fn node_label(node: NodeRef<'_>) -> String {
    let mut label = format!("[{}]", node.kind().name());

    match node {
        NodeRef::Stmt(Stmt::Assign { name, .. }) | NodeRef::Stmt(Stmt::Read { name, .. }) => {
            label.push_str(&format!("[{}]", name));
        }
        NodeRef::Stmt(_) => {}
        NodeRef::Expr(expr) => {
            match &expr.kind {
                ExprKind::Operator { op, .. } => label.push_str(&format!("[{}]", op.name())),
                ExprKind::Number(value) => label.push_str(&format!("[{}]", value)),
                ExprKind::Identifier(name) => label.push_str(&format!("[{}]", name)),
            }
            if expr.expr_type != ExprType::Untyped {
                label.push_str(&format!("[{}]", expr.expr_type.name()));
            }
        }
    }

    label
}

/// Flatten the program into rendered lines, in walk order.
pub fn tree_lines(program: &Program) -> Vec<TreeLine> {
    let mut lines = Vec::new();
    walk_program(program, &mut |node, depth| {
        lines.push(TreeLine {
            depth,
            kind: node.kind(),
            label: node_label(node),
            location: node.location(),
        });
    });
    lines
}

/// Render the whole tree, one node per line.
pub fn print_tree(program: &Program) -> String {
    let mut out = String::new();
    for line in tree_lines(program) {
        out.push_str(&line.render());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::{Expr, SourceLocation};
    use crate::parser::parse;

    #[test]
    fn test_print_assignment() {
        let program = parse("x := 2 ^ y").unwrap();
        assert_eq!(
            print_tree(&program),
            "[Assign][x]\n   [Oper][Power]\n      [Num][2]\n      [ID][y]\n"
        );
    }

    #[test]
    fn test_print_if_else() {
        let program = parse("if a = 1 then write a else read a end").unwrap();
        let expected = "\
[If]
   [Oper][Equal]
      [ID][a]
      [Num][1]
   [Write]
      [ID][a]
   [Read][a]
";
        assert_eq!(print_tree(&program), expected);
    }

    #[test]
    fn test_type_shown_only_when_known() {
        let mut expr = Expr::new(ExprKind::Number(7), SourceLocation::new(1, 1));
        assert_eq!(node_label(NodeRef::Expr(&expr)), "[Num][7]");

        expr.expr_type = ExprType::Integer;
        assert_eq!(node_label(NodeRef::Expr(&expr)), "[Num][7][Integer]");
    }

    #[test]
    fn test_tree_lines_keep_locations() {
        let program = parse("read x;\nwrite x").unwrap();
        let lines = tree_lines(&program);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].kind, NodeKind::Write);
        assert_eq!(lines[1].location, SourceLocation::new(2, 1));
        assert_eq!(lines[2].render(), "   [ID][x]");
    }
}
