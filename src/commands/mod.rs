pub mod ast;
pub mod functions;
pub mod integrate;
pub mod tokens;
