use crate::lex::{Position, Token, TokenKind};

use super::error::ParseError;

/// Cursor over a token sequence.
///
/// Reading past the end behaves like sitting on [`TokenKind::Eof`], so a
/// sequence without a trailing EOF token still fails cleanly.
pub(crate) struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub(crate) fn current(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    pub(crate) fn kind(&self) -> TokenKind {
        self.current().map_or(TokenKind::Eof, |t| t.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.kind() == kind
    }

    /// Return the current token and move past it. Never moves past EOF.
    pub(crate) fn advance(&mut self) -> Option<&'t Token> {
        let token = self.current()?;
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        Some(token)
    }

    /// Consume the current token if it has the given kind.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a token of the given kind or fail with `expected`.
    pub(crate) fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<&'t Token, ParseError> {
        if self.check(kind) {
            if let Some(token) = self.advance() {
                return Ok(token);
            }
        }
        Err(self.error(expected))
    }

    /// Error at the current token.
    pub(crate) fn error(&self, expected: impl Into<String>) -> ParseError {
        match self.current() {
            Some(token) => ParseError::at(token, expected),
            None => {
                let at = self.tokens.last().map_or(Position::start(), Token::position);
                ParseError::new(at, expected, TokenKind::Eof.to_string())
            }
        }
    }
}
