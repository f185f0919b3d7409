// src/core/token.rs
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Identifiers and literals
    Identifier(String),
    NumberLiteral(f64),

    // Operators
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    DoubleStar, // **

    // Delimiters
    OpenParen,  // (
    CloseParen, // )
    Comma,      // ,

    // Special
    EOF,
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub line: usize,
    pub col: usize,
    pub end_col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, line: usize, col: usize, end_col: usize) -> Self {
        Self {
            kind,
            line,
            col,
            end_col,
        }
    }

    /// Width of the token in columns; at least 1 so carets stay visible.
    pub fn width(&self) -> usize {
        self.end_col.saturating_sub(self.col).max(1)
    }
}

// Implement Display for TokenKind for better error messages
impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::NumberLiteral(v) => write!(f, "number {}", v),
            TokenKind::Plus => f.write_str("'+'"),
            TokenKind::Minus => f.write_str("'-'"),
            TokenKind::Star => f.write_str("'*'"),
            TokenKind::Slash => f.write_str("'/'"),
            TokenKind::DoubleStar => f.write_str("'**'"),
            TokenKind::OpenParen => f.write_str("'('"),
            TokenKind::CloseParen => f.write_str("')'"),
            TokenKind::Comma => f.write_str("','"),
            TokenKind::EOF => f.write_str("end of input"),
        }
    }
}
