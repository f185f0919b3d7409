// src/core/semantic_analyzer.rs
//! Name resolution checks:
//! - every identifier is the formula variable or a known symbol
//! - constants and the variable are never called
//! - functions are always called, with their exact arity

use crate::core::ast::Expr;
use crate::core::error::CoreError;
use crate::core::symbols::{self, Symbol};

pub struct SemanticAnalyzer<'v> {
    variable: &'v str,
    diags: Vec<CoreError>,
}

impl<'v> SemanticAnalyzer<'v> {
    pub fn new(variable: &'v str) -> Self {
        Self { variable, diags: Vec::new() }
    }

    /// Fails with the first problem in source order.
    pub fn analyze(&mut self, ast: &Expr) -> Result<(), CoreError> {
        match self.analyze_all(ast).into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Every problem found, in source order.
    pub fn analyze_all(&mut self, ast: &Expr) -> Vec<CoreError> {
        self.diags.clear();
        let mut found = Vec::new();
        ast.walk(&mut |node| {
            if let Some(err) = self.check(node) {
                found.push(err);
            }
        });
        self.diags = found;
        self.diags.clone()
    }

    fn check(&self, node: &Expr) -> Option<CoreError> {
        match node {
            Expr::Identifier { name, line, column } => {
                if name == self.variable {
                    return None;
                }
                match symbols::lookup(name) {
                    Some(Symbol::Constant(_)) => None,
                    Some(sym) => Some(invalid_call(
                        name,
                        &format!("must be called with {} argument(s)", sym.arity().unwrap_or(0)),
                        *line,
                        *column,
                    )),
                    None => Some(CoreError::UndefinedName { name: name.clone(), line: *line, column: *column }),
                }
            }
            Expr::Call { name, line, column, args } => {
                if name == self.variable {
                    return Some(invalid_call(name, "is the variable and cannot be called", *line, *column));
                }
                match symbols::lookup(name) {
                    None => Some(CoreError::UndefinedName { name: name.clone(), line: *line, column: *column }),
                    Some(Symbol::Constant(_)) => {
                        Some(invalid_call(name, "is a constant and cannot be called", *line, *column))
                    }
                    Some(sym) => {
                        let expected = sym.arity().unwrap_or(0);
                        (args.len() != expected).then(|| {
                            invalid_call(
                                name,
                                &format!("expects {} argument(s), got {}", expected, args.len()),
                                *line,
                                *column,
                            )
                        })
                    }
                }
            }
            Expr::Number(_) | Expr::Unary { .. } | Expr::Binary { .. } => None,
        }
    }
}

fn invalid_call(name: &str, reason: &str, line: usize, column: usize) -> CoreError {
    CoreError::InvalidCall { name: name.to_string(), reason: reason.to_string(), line, column }
}
