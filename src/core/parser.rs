//! Recursive-descent formula parser with precedence parsing + spanned errors.

use crate::core::ast::{BinaryOp, Expr, UnaryOp};
use crate::core::token::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq)]
pub struct ParserError {
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub len: usize,
}

impl std::fmt::Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}:{}", self.message, self.line, self.column)
    }
}

impl std::error::Error for ParserError {}

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create new parser instance; ensure trailing EOF token present
    pub fn new(mut tokens: Vec<Token>) -> Self {
        let needs_eof = match tokens.last() {
            Some(t) => !matches!(t.kind, TokenKind::EOF),
            None => true,
        };
        if needs_eof {
            let (line, col) = tokens.last().map(|t| (t.line, t.end_col)).unwrap_or((1, 1));
            tokens.push(Token::new(TokenKind::EOF, line, col, col));
        }
        Parser { tokens, pos: 0 }
    }

    /// Main parse entrypoint: exactly one expression followed by end of input.
    pub fn parse(&mut self) -> Result<Expr, ParserError> {
        if self.is_at_end() {
            return Err(self.err_here("Expected an expression"));
        }
        let expr = self.parse_expression()?;
        if !self.is_at_end() {
            let tok = self.peek();
            return Err(self.err_at_token(&format!("Unexpected {} after expression", tok.kind), tok));
        }
        Ok(expr)
    }

    /* ── Precedence ───────────────────────────────────────── */
    pub fn parse_expression(&mut self) -> Result<Expr, ParserError> {
        self.parse_term()
    }

    fn parse_term(&mut self) -> Result<Expr, ParserError> {
        let mut expr = self.parse_factor()?;
        while let Some(op) = self.match_binary(&[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)]) {
            let right = self.parse_factor()?;
            expr = Expr::new_binary(op, expr, right);
        }
        Ok(expr)
    }

    fn parse_factor(&mut self) -> Result<Expr, ParserError> {
        let mut expr = self.parse_unary()?;
        while let Some(op) = self.match_binary(&[(TokenKind::Star, BinaryOp::Mul), (TokenKind::Slash, BinaryOp::Div)]) {
            let right = self.parse_unary()?;
            expr = Expr::new_binary(op, expr, right);
        }
        Ok(expr)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParserError> {
        if self.match_token(&[TokenKind::Minus]) {
            let right = self.parse_unary()?;
            return Ok(Expr::new_unary(UnaryOp::Neg, right));
        }
        if self.match_token(&[TokenKind::Plus]) {
            let right = self.parse_unary()?;
            return Ok(Expr::new_unary(UnaryOp::Plus, right));
        }
        self.parse_power()
    }

    // power: primary ('**' unary)?  -- right-associative, and the exponent may carry a sign
    fn parse_power(&mut self) -> Result<Expr, ParserError> {
        let base = self.parse_primary()?;
        if self.match_token(&[TokenKind::DoubleStar]) {
            let exponent = self.parse_unary()?;
            return Ok(Expr::new_binary(BinaryOp::Pow, base, exponent));
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParserError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::NumberLiteral(v) => {
                self.advance();
                Ok(Expr::Number(v))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                if self.match_token(&[TokenKind::OpenParen]) {
                    let args = self.parse_arguments()?;
                    Ok(Expr::new_call(&name, tok.line, tok.col, args))
                } else {
                    Ok(Expr::new_identifier(&name, tok.line, tok.col))
                }
            }
            TokenKind::OpenParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.consume(TokenKind::CloseParen, "Expected ')'")?;
                Ok(expr)
            }
            ref other => Err(self.err_at_token(&format!("Unexpected {}", other), &tok)),
        }
    }

    // args: (expression (',' expression)*)? ')'  -- the '(' is already consumed
    fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParserError> {
        let mut args = Vec::new();
        if !self.check(&TokenKind::CloseParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(&[TokenKind::Comma]) {
                    break;
                }
            }
        }
        self.consume(TokenKind::CloseParen, "Expected ')' after arguments")?;
        Ok(args)
    }

    /* ── Token utils ─────────────────────────────────────── */
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.previous()
    }

    fn previous(&self) -> &Token {
        if self.pos == 0 {
            &self.tokens[0]
        } else {
            &self.tokens[self.pos - 1]
        }
    }

    fn peek(&self) -> &Token {
        // Safe: we ensure there's always an EOF at the end
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn check(&self, kind: &TokenKind) -> bool {
        !self.is_at_end() && &self.peek().kind == kind
    }

    fn match_token(&mut self, kinds: &[TokenKind]) -> bool {
        for kind in kinds {
            if self.check(kind) {
                self.advance();
                return true;
            }
        }
        false
    }

    fn match_binary(&mut self, table: &[(TokenKind, BinaryOp)]) -> Option<BinaryOp> {
        let op = table.iter().find(|(kind, _)| self.check(kind)).map(|(_, op)| *op)?;
        self.advance();
        Some(op)
    }

    fn consume(&mut self, kind: TokenKind, msg: &str) -> Result<&Token, ParserError> {
        if self.check(&kind) {
            Ok(self.advance())
        } else {
            Err(self.err_here(msg))
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::EOF)
    }

    fn err_here(&self, msg: &str) -> ParserError {
        self.err_at_token(msg, self.peek())
    }

    fn err_at_token(&self, msg: &str, tok: &Token) -> ParserError {
        ParserError {
            message: msg.into(),
            line: tok.line,
            column: tok.col,
            len: tok.width(),
        }
    }
}
