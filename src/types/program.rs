use std::cmp::Reverse;
use std::fmt;
use std::path::Path;

use super::action::Action;
use super::error::BuildError;
use super::expr::Condition;
use super::rule::{Folder, Rule};
use crate::source::RuleSource;
use crate::CxrError;

/// A parsed rule program: folders in declaration order.
///
/// Built once per rule text, either by parsing ([`Program::from_rules`]) or
/// through [`ProgramBuilder`]. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub folders: Vec<Folder>,
}

impl Program {
    /// Tokenize and parse rule text.
    ///
    /// # Errors
    ///
    /// Returns [`CxrError::Lex`] or [`CxrError::Parse`] on malformed text.
    pub fn from_rules(text: &str) -> Result<Self, CxrError> {
        crate::parse::parse_rules(text)
    }

    /// Read a rule file and parse it.
    ///
    /// # Errors
    ///
    /// Returns [`CxrError`] on a missing file, I/O, lex or parse failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CxrError> {
        let text = RuleSource::file(path).load()?;
        Self::from_rules(&text)
    }

    /// Resolve several rule sources, join them with newlines and parse the
    /// combined text.
    ///
    /// # Errors
    ///
    /// Returns [`CxrError`] if any source fails to load or the combined text
    /// fails to parse.
    pub fn from_sources(sources: &[RuleSource]) -> Result<Self, CxrError> {
        let text = crate::source::load_sources(sources)?;
        Self::from_rules(&text)
    }

    /// Total number of rules across all folders.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.folders.iter().map(|f| f.rules.len()).sum()
    }

    /// Folder names in declaration order.
    #[must_use]
    pub fn folder_names(&self) -> Vec<&str> {
        self.folders.iter().map(|f| f.name.as_str()).collect()
    }

    /// Folders sorted by priority, highest first. The sort is stable, so
    /// equal priorities keep declaration order.
    #[must_use]
    pub fn priority_order(&self) -> Vec<&Folder> {
        let mut order: Vec<&Folder> = self.folders.iter().collect();
        order.sort_by_key(|f| Reverse(f.priority));
        order
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Program({} folders, {} rules)",
            self.folders.len(),
            self.rule_count(),
        )
    }
}

/// Builder for assembling a [`Program`] without rule text.
///
/// # Example
///
/// ```
/// use cxr::{field, Action, ProgramBuilder};
///
/// let program = ProgramBuilder::new()
///     .folder("Alerts", |f| {
///         f.priority(10).when(
///             field("sender").contains("github"),
///             [Action::move_to("Alerts"), Action::Notify],
///         )
///     })
///     .build()
///     .unwrap();
/// assert_eq!(program.rule_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ProgramBuilder {
    folders: Vec<Folder>,
}

/// Intermediate builder passed to the folder definition closure.
#[derive(Debug)]
pub struct FolderBuilder {
    priority: i64,
    rules: Vec<Rule>,
}

impl ProgramBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a folder. The closure adds rules with `.when(..)`.
    #[must_use]
    pub fn folder(mut self, name: &str, f: impl FnOnce(FolderBuilder) -> FolderBuilder) -> Self {
        let builder = f(FolderBuilder {
            priority: 0,
            rules: Vec::new(),
        });
        self.folders.push(Folder {
            name: name.to_owned(),
            priority: builder.priority,
            rules: builder.rules,
        });
        self
    }

    /// Check the folder and rule invariants and produce the program.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] for a folder without rules or a rule without
    /// actions.
    pub fn build(self) -> Result<Program, BuildError> {
        for folder in &self.folders {
            if folder.rules.is_empty() {
                return Err(BuildError::EmptyFolder {
                    folder: folder.name.clone(),
                });
            }
            if let Some(rule) = folder.rules.iter().position(|r| r.actions.is_empty()) {
                return Err(BuildError::NoActions {
                    folder: folder.name.clone(),
                    rule,
                });
            }
        }
        Ok(Program {
            folders: self.folders,
        })
    }
}

impl FolderBuilder {
    /// Set the folder priority (default 0).
    #[must_use]
    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    /// Append a rule.
    #[must_use]
    pub fn when(mut self, condition: Condition, actions: impl IntoIterator<Item = Action>) -> Self {
        self.rules.push(Rule {
            condition,
            actions: actions.into_iter().collect(),
        });
        self
    }
}
