use std::fmt;
use std::ops::Not;

/// The literal side of a `contains` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `contains "x"`
    One(String),
    /// `contains ["x", "y"]`: matches if any element is contained.
    Any(Vec<String>),
}

impl Pattern {
    /// Every substring this pattern may match.
    #[must_use]
    pub fn needles(&self) -> &[String] {
        match self {
            Pattern::One(s) => std::slice::from_ref(s),
            Pattern::Any(list) => list,
        }
    }
}

/// Boolean condition tree of a rule.
///
/// Field names are rule-language names; they are resolved to record
/// properties through a [`Schema`](super::Schema) at evaluation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// Case-insensitive substring test of one field.
    ///
    /// Parsed keyword field names (`SENDER`, `Priority`) arrive lowercased;
    /// identifier field names keep their spelling.
    Contains { field: String, pattern: Pattern },
    /// Case-insensitive "field contains one of these substrings". Not set
    /// membership: `sender in ["github.com"]` matches `noreply@github.com`.
    In { field: String, values: Vec<String> },
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    #[must_use]
    pub fn and(self, other: Condition) -> Condition {
        Condition::And(Box::new(self), Box::new(other))
    }

    #[must_use]
    pub fn or(self, other: Condition) -> Condition {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// Number of predicate leaves in the tree.
    #[must_use]
    pub fn predicate_count(&self) -> usize {
        match self {
            Condition::Contains { .. } | Condition::In { .. } => 1,
            Condition::And(a, b) | Condition::Or(a, b) => a.predicate_count() + b.predicate_count(),
            Condition::Not(inner) => inner.predicate_count(),
        }
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::Not(Box::new(self))
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[String]) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "\"{v}\"")?;
    }
    f.write_str("]")
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::One(s) => write!(f, "\"{s}\""),
            Pattern::Any(list) => write_list(f, list),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Contains { field, pattern } => write!(f, "({field} contains {pattern})"),
            Condition::In { field, values } => {
                write!(f, "({field} in ")?;
                write_list(f, values)?;
                f.write_str(")")
            }
            Condition::And(a, b) => write!(f, "({a} AND {b})"),
            Condition::Or(a, b) => write!(f, "({a} OR {b})"),
            Condition::Not(inner) => write!(f, "(NOT {inner})"),
        }
    }
}

/// Intermediate builder for predicates on one field.
/// Created by [`field()`].
#[derive(Debug, Clone)]
pub struct FieldExpr {
    name: String,
}

impl FieldExpr {
    #[must_use]
    pub fn contains(self, value: &str) -> Condition {
        Condition::Contains {
            field: self.name,
            pattern: Pattern::One(value.to_owned()),
        }
    }

    #[must_use]
    pub fn contains_any<I, S>(self, values: I) -> Condition
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::Contains {
            field: self.name,
            pattern: Pattern::Any(values.into_iter().map(Into::into).collect()),
        }
    }

    #[must_use]
    pub fn is_in<I, S>(self, values: I) -> Condition
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Condition::In {
            field: self.name,
            values: values.into_iter().map(Into::into).collect(),
        }
    }
}

#[must_use]
pub fn field(name: &str) -> FieldExpr {
    FieldExpr {
        name: name.to_owned(),
    }
}
