use std::fmt;

/// An effect fired by a matching rule.
///
/// Actions are advisory labels: the engine only honours `Move` (it picks the
/// destination bucket) and renders every action into the action log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move { target: String },
    Remove { target: String },
    Notify,
    Call,
    Remind,
    MarkRead,
    MarkUnread,
    Auto,
}

impl Action {
    #[must_use]
    pub fn move_to(target: &str) -> Action {
        Action::Move {
            target: target.to_owned(),
        }
    }

    #[must_use]
    pub fn remove_from(target: &str) -> Action {
        Action::Remove {
            target: target.to_owned(),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move { target } => write!(f, "move to {target}"),
            Action::Remove { target } => write!(f, "remove from {target}"),
            Action::Notify => f.write_str("notify"),
            Action::Call => f.write_str("call"),
            Action::Remind => f.write_str("remind"),
            Action::MarkRead => f.write_str("mark as read"),
            Action::MarkUnread => f.write_str("mark as unread"),
            Action::Auto => f.write_str("auto"),
        }
    }
}
