use crate::{Condition, FieldAccess, Folder, Record, Rule, Schema};

/// Evaluate a condition against one record.
///
/// Pure and total: a missing or non-string property reads as the empty
/// string, never as an error.
#[must_use]
pub fn evaluate(condition: &Condition, record: &Record, schema: &Schema) -> bool {
    eval_condition(condition, &schema.access(record))
}

pub(crate) fn eval_condition(condition: &Condition, fields: &FieldAccess<'_>) -> bool {
    match condition {
        Condition::Contains { field, pattern } => contains_any(fields.get(field), pattern.needles()),
        // IN is substring containment against any entry, same as a contains list.
        Condition::In { field, values } => contains_any(fields.get(field), values),
        Condition::And(a, b) => eval_condition(a, fields) && eval_condition(b, fields),
        Condition::Or(a, b) => eval_condition(a, fields) || eval_condition(b, fields),
        Condition::Not(inner) => !eval_condition(inner, fields),
    }
}

fn contains_any(haystack: Option<&str>, needles: &[String]) -> bool {
    let haystack = haystack.unwrap_or_default().to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

/// Scan folders in the given order and return the first rule that matches.
///
/// Rules within a folder are tried in declaration order; the first hit ends
/// the whole scan.
pub(crate) fn first_match<'p>(
    folders: &[&'p Folder],
    fields: &FieldAccess<'_>,
) -> Option<(&'p Folder, &'p Rule)> {
    folders.iter().find_map(|folder| {
        folder
            .rules
            .iter()
            .find(|rule| eval_condition(&rule.condition, fields))
            .map(|rule| (*folder, rule))
    })
}
