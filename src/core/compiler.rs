// src/core/compiler.rs
//! Formula compiler pipeline.
//! Runs lexing, parsing, name analysis and lowering into an evaluable formula.

use crate::core::{
    ast::Expr,
    error::CoreError,
    ir::Node,
    lexer::Lexer,
    lowering,
    parser::Parser,
    semantic_analyzer::SemanticAnalyzer,
    token::Token,
    vm,
};

pub const DEFAULT_VARIABLE: &str = "x";

/// A compiled formula of one real variable.
#[derive(Debug, Clone)]
pub struct Formula {
    source: String,
    variable: String,
    root: Node,
}

impl Formula {
    pub fn eval(&self, x: f64) -> f64 {
        vm::eval(&self.root, x)
    }

    /// Elementwise evaluation; identical to calling `eval` per sample.
    pub fn eval_many(&self, xs: &[f64]) -> Vec<f64> {
        vm::eval_many(&self.root, xs)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    /// True when the formula does not depend on its variable.
    pub fn is_constant(&self) -> bool {
        self.root.is_const()
    }
}

/// Represents the formula compiler
pub struct Compiler {
    variable: String,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Compiler {
    pub fn new() -> Self {
        Self::with_variable(DEFAULT_VARIABLE)
    }

    pub fn with_variable(variable: &str) -> Self {
        Compiler { variable: variable.to_string() }
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn compile(&self, text: &str) -> Result<Formula, CoreError> {
        // 1) Lexing + parsing
        let ast = self.parse(text)?;

        // 2) Name analysis
        SemanticAnalyzer::new(&self.variable).analyze(&ast)?;
        debug_log!("[compile] names resolved against variable '{}'", self.variable);

        // 3) Lowering
        let root = lowering::lower(&ast, &self.variable)?;
        debug_log!("[compile] lowered to {} node(s)", root.size());

        Ok(Formula {
            source: text.to_string(),
            variable: self.variable.clone(),
            root,
        })
    }

    /// Lex + parse only, no name checks.
    pub fn parse(&self, text: &str) -> Result<Expr, CoreError> {
        let tokens = tokenize(text)?;
        debug_log!("[compile] lexer: {} token(s)", tokens.len());
        let ast = Parser::new(tokens).parse()?;
        debug_log!("[compile] parser: {}", ast);
        Ok(ast)
    }
}

pub fn tokenize(text: &str) -> Result<Vec<Token>, CoreError> {
    Ok(Lexer::new(text).tokenize()?)
}

/// Compiles with the default variable `x`.
pub fn compile(text: &str) -> Result<Formula, CoreError> {
    Compiler::new().compile(text)
}
