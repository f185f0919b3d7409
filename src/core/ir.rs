//! Bound formula IR: names are resolved, only the variable remains free.

use crate::core::ast::{BinaryOp, UnaryOp};

#[derive(Debug, Clone)]
pub enum Node {
    Const(f64),
    Var,
    Unary(UnaryOp, Box<Node>),
    Binary(BinaryOp, Box<Node>, Box<Node>),
    Call1(&'static str, fn(f64) -> f64, Box<Node>),
    Call2(&'static str, fn(f64, f64) -> f64, Box<Node>, Box<Node>),
}

impl Node {
    pub fn is_const(&self) -> bool {
        matches!(self, Node::Const(_))
    }

    /// Number of nodes, for debug output.
    pub fn size(&self) -> usize {
        match self {
            Node::Const(_) | Node::Var => 1,
            Node::Unary(_, a) | Node::Call1(_, _, a) => 1 + a.size(),
            Node::Binary(_, a, b) | Node::Call2(_, _, a, b) => 1 + a.size() + b.size(),
        }
    }
}
