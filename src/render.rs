use crate::ast::{Ast, CompoundKind};

/// Renders the tree in Reverse-Polish order: `1+1` becomes `1 1 +`.
/// Statement lists come out one statement per line.
pub fn rpn(node: &Ast) -> String {
    match node {
        Ast::Empty => String::new(),
        Ast::Num(val) => val.to_string(),
        Ast::Variable(id) => id.to_string(),
        Ast::TypeName(ty) => ty.to_string(),
        Ast::Unary(op, operand) => format!("{} {}", rpn(operand), op.symbol()),
        Ast::Binary(op, left, right) => {
            format!("{} {} {}", rpn(left), rpn(right), op.symbol())
        }
        Ast::Compound(_, stmts) => stmts.iter().map(rpn).collect::<Vec<_>>().join("\n"),
    }
}

/// Renders the tree as a prefix S-expression: `1+1` becomes `(+ 1 1)`.
pub fn sexpr(node: &Ast) -> String {
    match node {
        Ast::Empty => String::new(),
        Ast::Num(val) => val.to_string(),
        Ast::Variable(id) => id.to_string(),
        Ast::TypeName(ty) => ty.to_string(),
        Ast::Unary(op, operand) => format!("({} {})", op.symbol(), sexpr(operand)),
        Ast::Binary(op, left, right) => {
            format!("({} {} {})", op.symbol(), sexpr(left), sexpr(right))
        }
        Ast::Compound(kind, stmts) => {
            let tag = match kind {
                CompoundKind::Block => "begin",
                CompoundKind::Declarations => "var",
            };
            let mut parts = vec![tag.to_string()];
            parts.extend(stmts.iter().map(sexpr));
            format!("({})", parts.join(" "))
        }
    }
}
