use std::fmt;

use crate::core::lexer::LexerError;
use crate::core::parser::ParserError;

#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Formula text is not a single well-formed arithmetic expression.
    Parse { message: String, line: usize, column: usize, len: usize },
    /// Identifier that is neither the variable nor a known symbol.
    UndefinedName { name: String, line: usize, column: usize },
    /// Known symbol used with the wrong shape (constant called, function not called, bad arity).
    InvalidCall { name: String, reason: String, line: usize, column: usize },
    InputRange(String),
    UnsupportedRule(String),
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::Parse { message, line, column, .. } => write!(f, "Parse Error: {} at {}:{}", message, line, column),
            CoreError::UndefinedName { name, line, column } => write!(f, "Undefined Name: '{}' at {}:{}", name, line, column),
            CoreError::InvalidCall { name, reason, line, column } => write!(f, "Invalid Call: '{}' {} at {}:{}", name, reason, line, column),
            CoreError::InputRange(msg) => write!(f, "Input Range Error: {}", msg),
            CoreError::UnsupportedRule(rule) => write!(f, "Unsupported Rule: '{}' (expected 'trapezoidal' or 'midpoint')", rule),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<LexerError> for CoreError {
    fn from(e: LexerError) -> Self {
        let (line, column) = e.position();
        let len = e.width();
        let message = match e {
            LexerError::UnexpectedCharacter(ch, ..) => format!("Unexpected character '{}'", ch),
            LexerError::InvalidNumber(text, ..) => format!("Invalid number literal '{}'", text),
        };
        CoreError::Parse { message, line, column, len }
    }
}

impl From<ParserError> for CoreError {
    fn from(e: ParserError) -> Self {
        CoreError::Parse { message: e.message, line: e.line, column: e.column, len: e.len }
    }
}

impl CoreError {
    pub fn input_range(message: &str) -> Self { CoreError::InputRange(message.to_string()) }
    pub fn unsupported_rule(name: &str) -> Self { CoreError::UnsupportedRule(name.to_string()) }

    /// True for every failure caused by the formula text itself.
    pub fn is_formula_error(&self) -> bool {
        matches!(self, CoreError::Parse { .. } | CoreError::UndefinedName { .. } | CoreError::InvalidCall { .. })
    }

    /// Short title without position, for diagnostics that draw their own span.
    pub fn title(&self) -> String {
        match self {
            CoreError::Parse { message, .. } => message.clone(),
            CoreError::UndefinedName { name, .. } => format!("undefined name '{}'", name),
            CoreError::InvalidCall { name, reason, .. } => format!("'{}' {}", name, reason),
            other => other.to_string(),
        }
    }

    /// (line, column, underline length) inside the formula, when known.
    pub fn span(&self) -> Option<(usize, usize, usize)> {
        match self {
            CoreError::Parse { line, column, len, .. } => Some((*line, *column, *len)),
            CoreError::UndefinedName { name, line, column } | CoreError::InvalidCall { name, line, column, .. } => {
                Some((*line, *column, name.chars().count().max(1)))
            }
            CoreError::InputRange(_) | CoreError::UnsupportedRule(_) => None,
        }
    }
}
