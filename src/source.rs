use std::io;
use std::path::{Path, PathBuf};

use crate::CxrError;

/// Extension that marks a rule source string as a file path.
const RULE_FILE_EXTENSION: &str = ".cxr";

/// Where a fragment of rule text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleSource {
    Inline(String),
    File(PathBuf),
}

impl RuleSource {
    /// Classify a string: a path if its trimmed form ends in `.cxr`,
    /// otherwise inline rule text.
    #[must_use]
    pub fn detect(source: &str) -> Self {
        let trimmed = source.trim();
        if trimmed.ends_with(RULE_FILE_EXTENSION) {
            Self::File(PathBuf::from(trimmed))
        } else {
            Self::Inline(source.to_owned())
        }
    }

    #[must_use]
    pub fn inline(text: impl Into<String>) -> Self {
        Self::Inline(text.into())
    }

    #[must_use]
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }

    /// Resolve to rule text.
    ///
    /// # Errors
    ///
    /// Returns [`CxrError::RuleFileNotFound`] if a file source does not
    /// exist and [`CxrError::Io`] if it cannot be read.
    pub fn load(&self) -> Result<String, CxrError> {
        match self {
            Self::Inline(text) => Ok(text.clone()),
            Self::File(path) => match std::fs::read_to_string(path) {
                Ok(text) => {
                    tracing::debug!(path = %path.display(), bytes = text.len(), "loaded rule file");
                    Ok(text)
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    Err(CxrError::RuleFileNotFound { path: path.clone() })
                }
                Err(e) => Err(e.into()),
            },
        }
    }
}

impl From<&str> for RuleSource {
    fn from(source: &str) -> Self {
        Self::detect(source)
    }
}

/// Load every source and join the fragments with newlines, in order.
///
/// # Errors
///
/// Returns the first load failure.
pub fn load_sources(sources: &[RuleSource]) -> Result<String, CxrError> {
    let fragments = sources
        .iter()
        .map(RuleSource::load)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(fragments.join("\n"))
}
