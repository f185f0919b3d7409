//! Tree-walk evaluator over the bound IR.
//! Pure IEEE-754 arithmetic: domain errors surface as NaN or infinity.

use crate::core::ir::Node;

pub fn eval(node: &Node, x: f64) -> f64 {
    match node {
        Node::Const(v) => *v,
        Node::Var => x,
        Node::Unary(op, a) => op.apply(eval(a, x)),
        Node::Binary(op, a, b) => op.apply(eval(a, x), eval(b, x)),
        Node::Call1(_, f, a) => f(eval(a, x)),
        Node::Call2(_, f, a, b) => f(eval(a, x), eval(b, x)),
    }
}

/// Elementwise evaluation over a batch of inputs.
pub fn eval_many(node: &Node, xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| eval(node, x)).collect()
}
