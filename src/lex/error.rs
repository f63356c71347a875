use thiserror::Error;

/// Errors produced while tokenizing rule text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{ch}' at line {line}, column {column}")]
    UnexpectedChar { ch: char, line: usize, column: usize },

    #[error("unterminated string starting at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },
}

impl LexError {
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            LexError::UnexpectedChar { line, .. } | LexError::UnterminatedString { line, .. } => {
                *line
            }
        }
    }

    #[must_use]
    pub fn column(&self) -> usize {
        match self {
            LexError::UnexpectedChar { column, .. }
            | LexError::UnterminatedString { column, .. } => *column,
        }
    }

    /// The character the error points at. An unterminated string points
    /// at its opening quote.
    #[must_use]
    pub fn character(&self) -> char {
        match self {
            LexError::UnexpectedChar { ch, .. } => *ch,
            LexError::UnterminatedString { .. } => '"',
        }
    }
}
