use std::path::PathBuf;

use thiserror::Error;

use crate::lex::LexError;
use crate::parse::ParseError;
use crate::BuildError;

/// Unified error type covering rule loading, lexing, parsing and building.
///
/// Returned by convenience methods like
/// [`Program::from_rules()`](crate::Program::from_rules) and
/// [`Session::run()`](crate::Session::run).
#[derive(Debug, Error)]
pub enum CxrError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error("rule file not found: {}", path.display())]
    RuleFileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
