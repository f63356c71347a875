mod error;
mod scanner;
mod token;

pub use error::LexError;
pub use token::{Position, Token, TokenKind};

/// Convert rule text into a flat token sequence terminated by a single
/// [`TokenKind::Eof`] token.
///
/// # Errors
///
/// Returns [`LexError`] on a character outside the language or a string
/// literal that never closes.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let tokens = scanner::scan(text)?;
    tracing::debug!(tokens = tokens.len(), "tokenized rule text");
    Ok(tokens)
}
