mod error;
mod grammar;
mod parser;

pub use error::ParseError;

use crate::lex::{tokenize, Token};
use crate::{CxrError, Program};

/// Build a [`Program`] from a token sequence produced by [`tokenize`].
///
/// # Errors
///
/// Returns [`ParseError`] at the first token that does not fit the grammar.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    let mut cursor = parser::Parser::new(tokens);
    let program = grammar::program(&mut cursor)?;
    tracing::debug!(
        folders = program.folders.len(),
        rules = program.rule_count(),
        "parsed rule program"
    );
    Ok(program)
}

/// Tokenize and parse rule text in one step.
///
/// # Errors
///
/// Returns [`CxrError::Lex`] or [`CxrError::Parse`].
pub fn parse_rules(text: &str) -> Result<Program, CxrError> {
    let tokens = tokenize(text)?;
    Ok(parse(&tokens)?)
}
