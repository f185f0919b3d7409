//! Lowering: AST -> bound IR.
//!
//! Symbols become constants or function pointers, the formula variable
//! becomes `Node::Var`, and subtrees without the variable are folded.
//! Folding evaluates exactly what the VM would, so results are unchanged.

use crate::core::ast::Expr;
use crate::core::error::CoreError;
use crate::core::ir::Node;
use crate::core::symbols::{self, Symbol};
use crate::core::vm;

pub fn lower(ast: &Expr, variable: &str) -> Result<Node, CoreError> {
    let node = match ast {
        Expr::Number(v) => Node::Const(*v),
        Expr::Identifier { name, line, column } => {
            if name == variable {
                Node::Var
            } else {
                match symbols::lookup(name) {
                    Some(Symbol::Constant(v)) => Node::Const(v),
                    Some(_) => return Err(unresolved(name, *line, *column)),
                    None => return Err(CoreError::UndefinedName { name: name.clone(), line: *line, column: *column }),
                }
            }
        }
        Expr::Unary { op, expr } => Node::Unary(*op, Box::new(lower(expr, variable)?)),
        Expr::Binary { op, left, right } => {
            Node::Binary(*op, Box::new(lower(left, variable)?), Box::new(lower(right, variable)?))
        }
        Expr::Call { name, line, column, args } => {
            let entry = if name == variable { None } else { symbols::entry(name) };
            match (entry, args.as_slice()) {
                (Some((static_name, Symbol::Unary(f))), [a]) => {
                    Node::Call1(static_name, f, Box::new(lower(a, variable)?))
                }
                (Some((static_name, Symbol::Binary(f))), [a, b]) => {
                    Node::Call2(static_name, f, Box::new(lower(a, variable)?), Box::new(lower(b, variable)?))
                }
                (None, _) if name != variable => {
                    return Err(CoreError::UndefinedName { name: name.clone(), line: *line, column: *column })
                }
                _ => return Err(unresolved(name, *line, *column)),
            }
        }
    };
    Ok(fold(node))
}

fn fold(node: Node) -> Node {
    let foldable = match &node {
        Node::Const(_) | Node::Var => false,
        Node::Unary(_, a) | Node::Call1(_, _, a) => a.is_const(),
        Node::Binary(_, a, b) | Node::Call2(_, _, a, b) => a.is_const() && b.is_const(),
    };
    if foldable {
        // No Var below, so the input value is irrelevant.
        Node::Const(vm::eval(&node, f64::NAN))
    } else {
        node
    }
}

fn unresolved(name: &str, line: usize, column: usize) -> CoreError {
    CoreError::InvalidCall {
        name: name.to_string(),
        reason: "cannot be used here".to_string(),
        line,
        column,
    }
}
