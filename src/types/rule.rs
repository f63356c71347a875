use super::action::Action;
use super::expr::Condition;

/// A condition plus the actions it fires. `actions` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub condition: Condition,
    pub actions: Vec<Action>,
}

/// A named classification bucket with a priority and its rules in
/// declaration order. `rules` is never empty.
///
/// Higher priorities are scanned first; folders with equal priority keep
/// their declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Folder {
    pub name: String,
    pub priority: i64,
    pub rules: Vec<Rule>,
}
