// lexer.rs

use std::fmt;
use unicode_ident::{is_xid_continue, is_xid_start};
use unicode_normalization::UnicodeNormalization;

use crate::core::token::{Token, TokenKind};

/// Lexer error types with detailed location.
#[derive(Debug, Clone, PartialEq)]
pub enum LexerError {
    UnexpectedCharacter(char, usize, usize),
    InvalidNumber(String, usize, usize),
}

impl LexerError {
    pub fn position(&self) -> (usize, usize) {
        match self {
            LexerError::UnexpectedCharacter(_, line, col) => (*line, *col),
            LexerError::InvalidNumber(_, line, col) => (*line, *col),
        }
    }

    /// Columns covered by the offending text.
    pub fn width(&self) -> usize {
        match self {
            LexerError::UnexpectedCharacter(..) => 1,
            LexerError::InvalidNumber(text, ..) => text.chars().count().max(1),
        }
    }
}

impl fmt::Display for LexerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LexerError::*;
        match self {
            UnexpectedCharacter(ch, line, col) => write!(f, "Unexpected character '{}' at {}:{}", ch, line, col),
            InvalidNumber(num, line, col) => write!(f, "Invalid number literal '{}' at {}:{}", num, line, col),
        }
    }
}
impl std::error::Error for LexerError {}

/// Formula lexer. Input is NFC-normalized up front so identifiers compare
/// by their canonical form.
pub struct Lexer {
    chars: Vec<char>,
    idx: usize,
    line: usize,
    col: usize,
    consumed_eof: bool, // Prevent repeated EOF tokens
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.nfc().collect(),
            idx: 0,
            line: 1,
            col: 1,
            consumed_eof: false,
        }
    }

    #[inline]
    fn current(&self) -> Option<char> {
        self.chars.get(self.idx).copied()
    }

    #[inline]
    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.idx + 1).copied()
    }

    #[inline]
    fn pos(&self) -> (usize, usize) {
        (self.line, self.col)
    }

    #[inline]
    fn advance_char(&mut self) {
        if let Some(ch) = self.current() {
            self.idx += 1;
            if ch == '\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
        }
    }

    fn token_from(&self, kind: TokenKind, line: usize, col: usize) -> Token {
        // Tokens never span lines, so the end column is on the start line.
        Token::new(kind, line, col, self.col)
    }

    pub fn next_token(&mut self) -> Result<Option<Token>, LexerError> {
        if self.consumed_eof {
            return Ok(None);
        }

        while matches!(self.current(), Some(ch) if is_safe_whitespace(ch)) {
            self.advance_char();
        }

        let ch = match self.current() {
            Some(ch) => ch,
            None => {
                self.consumed_eof = true;
                let (line, col) = self.pos();
                return Ok(Some(Token::new(TokenKind::EOF, line, col, col)));
            }
        };

        let (line, col) = self.pos();
        if ch == '*' && self.peek_char() == Some('*') {
            self.advance_char();
            self.advance_char();
            Ok(Some(self.token_from(TokenKind::DoubleStar, line, col)))
        } else if let Some(kind) = match_single_char_token(ch) {
            self.advance_char();
            Ok(Some(self.token_from(kind, line, col)))
        } else if ch.is_ascii_digit()
            || (ch == '.' && self.peek_char().is_some_and(|c| c.is_ascii_digit()))
        {
            self.lex_number().map(Some)
        } else if is_identifier_start(ch) {
            Ok(Some(self.lex_identifier()))
        } else {
            Err(LexerError::UnexpectedCharacter(ch, line, col))
        }
    }

    /// Tokenizes entire input; the last token is always EOF.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexerError> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            let is_eof = matches!(token.kind, TokenKind::EOF);
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    // digits ['.' digits] [('e'|'E') ['+'|'-'] digits]
    fn lex_number(&mut self) -> Result<Token, LexerError> {
        let (line, col) = self.pos();
        let mut num_str = String::new();
        let mut has_decimal = false;
        while let Some(ch) = self.current() {
            if ch.is_ascii_digit() {
                num_str.push(ch);
                self.advance_char();
            } else if ch == '.' && !has_decimal {
                has_decimal = true;
                num_str.push(ch);
                self.advance_char();
            } else {
                break;
            }
        }
        if let Some(e @ ('e' | 'E')) = self.current() {
            num_str.push(e);
            self.advance_char();
            if let Some(sign @ ('+' | '-')) = self.current() {
                num_str.push(sign);
                self.advance_char();
            }
            let mut exp_digits = 0usize;
            while let Some(ch) = self.current().filter(char::is_ascii_digit) {
                num_str.push(ch);
                self.advance_char();
                exp_digits += 1;
            }
            if exp_digits == 0 {
                return Err(LexerError::InvalidNumber(num_str, line, col));
            }
        }
        // `1.5.2` or `3e2x` would otherwise lex as two adjacent literals
        if let Some(ch) = self.current().filter(|c| *c == '.' || c.is_ascii_digit()) {
            num_str.push(ch);
            return Err(LexerError::InvalidNumber(num_str, line, col));
        }
        num_str
            .parse::<f64>()
            .map(|n| self.token_from(TokenKind::NumberLiteral(n), line, col))
            .map_err(|_| LexerError::InvalidNumber(num_str, line, col))
    }

    fn lex_identifier(&mut self) -> Token {
        let (line, col) = self.pos();
        let mut ident = String::new();
        while let Some(ch) = self.current().filter(|c| is_identifier_part(*c)) {
            ident.push(ch);
            self.advance_char();
        }
        self.token_from(TokenKind::Identifier(ident), line, col)
    }
}

fn match_single_char_token(ch: char) -> Option<TokenKind> {
    match ch {
        '+' => Some(TokenKind::Plus),
        '-' => Some(TokenKind::Minus),
        '*' => Some(TokenKind::Star),
        '/' => Some(TokenKind::Slash),
        '(' => Some(TokenKind::OpenParen),
        ')' => Some(TokenKind::CloseParen),
        ',' => Some(TokenKind::Comma),
        _ => None,
    }
}

// Utility functions for identifiers and whitespace

fn is_identifier_start(ch: char) -> bool {
    ch == '_' || is_xid_start(ch)
}
fn is_identifier_part(ch: char) -> bool {
    ch == '_' || is_xid_continue(ch)
}
fn is_safe_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\r' | '\n' | '\u{FEFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn lexes_operators_and_power() {
        assert_eq!(
            kinds("x**2 * -3"),
            vec![
                TokenKind::Identifier("x".into()),
                TokenKind::DoubleStar,
                TokenKind::NumberLiteral(2.0),
                TokenKind::Star,
                TokenKind::Minus,
                TokenKind::NumberLiteral(3.0),
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn lexes_number_forms() {
        assert_eq!(
            kinds(".5 2. 1e-3 2.5E+2"),
            vec![
                TokenKind::NumberLiteral(0.5),
                TokenKind::NumberLiteral(2.0),
                TokenKind::NumberLiteral(0.001),
                TokenKind::NumberLiteral(250.0),
                TokenKind::EOF,
            ]
        );
    }

    #[test]
    fn rejects_malformed_numbers() {
        assert!(matches!(Lexer::new("1e").tokenize(), Err(LexerError::InvalidNumber(..))));
        assert!(matches!(Lexer::new("1.2.3").tokenize(), Err(LexerError::InvalidNumber(..))));
    }

    #[test]
    fn rejects_non_arithmetic_characters() {
        let err = Lexer::new("x.real").tokenize().unwrap_err();
        assert_eq!(err, LexerError::UnexpectedCharacter('.', 1, 2));
        assert!(Lexer::new("x = 1").tokenize().is_err());
        assert!(Lexer::new("x; y").tokenize().is_err());
        assert!(Lexer::new("x ^ 2").tokenize().is_err());
    }

    #[test]
    fn columns_are_one_based_and_end_exclusive() {
        let toks = Lexer::new("  sin(x)").tokenize().unwrap();
        assert_eq!((toks[0].col, toks[0].end_col), (3, 6));
        assert_eq!(toks[1].col, 6);
        assert_eq!(toks.last().unwrap().col, 9);
    }

    #[test]
    fn unicode_identifiers_are_normalized() {
        // "é" as e + combining acute composes to a single code point.
        let toks = kinds("e\u{301}");
        assert_eq!(toks[0], TokenKind::Identifier("\u{e9}".into()));
    }

    #[test]
    fn emits_single_eof() {
        let mut lx = Lexer::new("");
        assert!(matches!(lx.next_token().unwrap().unwrap().kind, TokenKind::EOF));
        assert!(lx.next_token().unwrap().is_none());
    }
}
