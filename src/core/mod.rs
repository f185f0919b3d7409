//! Core module tree: formula compiler and quadrature engine.

#[macro_use]
pub mod debug; // gated debug logging (QUADCALC_DEBUG=1) provides debug_log! macro

pub mod ast;
pub mod compiler;
pub mod diagnostics;
pub mod error;
pub mod ir;
pub mod lexer;
pub mod lowering;
pub mod parser;
pub mod quadrature;
pub mod semantic_analyzer;
pub mod symbols;
pub mod token;
pub mod vm;

pub use compiler::{compile, Compiler, Formula};
pub use error::CoreError;
pub use quadrature::{integrate, integrate_named, Interval, Rule};
pub use token::TokenKind; // Token itself stays behind the compiler API
