use std::fmt;

use crate::lex::{Position, Token};

/// A grammar violation: where it happened, what the parser wanted and what
/// it got instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    line: usize,
    column: usize,
    expected: String,
    found: String,
}

impl ParseError {
    pub(crate) fn new(at: Position, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self {
            line: at.line,
            column: at.column,
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Error pointing at `token`, describing it as what was found.
    pub(crate) fn at(token: &Token, expected: impl Into<String>) -> Self {
        Self::new(token.position(), expected, token.to_string())
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }

    #[must_use]
    pub fn expected(&self) -> &str {
        &self.expected
    }

    #[must_use]
    pub fn found(&self) -> &str {
        &self.found
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at line {}, column {}: expected {}, found {}",
            self.line, self.column, self.expected, self.found
        )
    }
}

impl std::error::Error for ParseError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::TokenKind;

    #[test]
    fn error_display() {
        let err = ParseError::new(Position { line: 2, column: 4 }, "'then'", "'move'");
        assert_eq!(
            err.to_string(),
            "parse error at line 2, column 4: expected 'then', found 'move'"
        );
    }

    #[test]
    fn error_at_token() {
        let token = Token::new(TokenKind::Ident, "abc", Position { line: 1, column: 17 });
        let err = ParseError::at(&token, "integer priority value");
        assert_eq!((err.line(), err.column()), (1, 17));
        assert_eq!(err.expected(), "integer priority value");
        assert_eq!(err.found(), "'abc'");
    }
}
