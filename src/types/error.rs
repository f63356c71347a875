use thiserror::Error;

/// Structural violations caught when assembling a [`Program`](super::Program)
/// through [`ProgramBuilder`](super::ProgramBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("folder '{folder}' must have at least one rule")]
    EmptyFolder { folder: String },

    #[error("rule {rule} in folder '{folder}' has no actions")]
    NoActions { folder: String, rule: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_folder_message() {
        let err = BuildError::EmptyFolder {
            folder: "Alerts".into(),
        };
        assert_eq!(err.to_string(), "folder 'Alerts' must have at least one rule");
    }

    #[test]
    fn no_actions_message() {
        let err = BuildError::NoActions {
            folder: "Alerts".into(),
            rule: 2,
        };
        assert_eq!(err.to_string(), "rule 2 in folder 'Alerts' has no actions");
    }
}
