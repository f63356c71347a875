use std::collections::BTreeMap;

use super::Record;

/// Maps rule-language field names to record property names.
///
/// The default schema maps `sender` to `from`, `subject` to `subject` and
/// `body` to `body`. Fields with no entry read the record property of the
/// same name.
///
/// With the `serde` feature a schema reads from a plain map of overrides,
/// merged over the defaults, and writes back as the full map.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        from = "BTreeMap<String, String>",
        into = "BTreeMap<String, String>"
    )
)]
pub struct Schema {
    properties: BTreeMap<String, String>,
}

impl Default for Schema {
    fn default() -> Self {
        let properties = [("sender", "from"), ("subject", "subject"), ("body", "body")]
            .into_iter()
            .map(|(field, property)| (field.to_owned(), property.to_owned()))
            .collect();
        Self { properties }
    }
}

impl Schema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The default schema with `overrides` applied entry by entry.
    ///
    /// An override for `sender`, `subject` or `body` replaces that default;
    /// any other entry adds a new mapping.
    #[must_use]
    pub fn with_overrides<I, F, P>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (F, P)>,
        F: Into<String>,
        P: Into<String>,
    {
        let mut schema = Self::default();
        for (field, property) in overrides {
            schema.insert(field, property);
        }
        schema
    }

    /// Map a rule field to a record property.
    #[must_use]
    pub fn map(mut self, field: &str, property: &str) -> Self {
        self.insert(field, property);
        self
    }

    /// Map a rule field to a record property (mutable reference version).
    pub fn insert(&mut self, field: impl Into<String>, property: impl Into<String>) {
        self.properties.insert(field.into(), property.into());
    }

    /// The record property a rule field reads.
    #[must_use]
    pub fn resolve<'a>(&'a self, field: &'a str) -> &'a str {
        self.properties.get(field).map_or(field, String::as_str)
    }

    /// Build a field accessor over one record.
    #[must_use]
    pub fn access<'a>(&'a self, record: &'a Record) -> FieldAccess<'a> {
        FieldAccess {
            schema: self,
            record,
        }
    }

    /// Iterate over all `(field, property)` mappings.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for Schema {
    fn from(overrides: BTreeMap<String, String>) -> Self {
        Self::with_overrides(overrides)
    }
}

impl From<Schema> for BTreeMap<String, String> {
    fn from(schema: Schema) -> Self {
        schema.properties
    }
}

/// Reads rule fields from a single record through a [`Schema`].
#[derive(Debug, Clone, Copy)]
pub struct FieldAccess<'a> {
    schema: &'a Schema,
    record: &'a Record,
}

impl<'a> FieldAccess<'a> {
    /// The text of a rule field, or `None` if the mapped property is missing
    /// or not a string.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'a str> {
        self.record.text(self.schema.resolve(field))
    }

    #[must_use]
    pub fn record(&self) -> &'a Record {
        self.record
    }
}
