use std::collections::BTreeMap;

use super::Value;

/// An email-like record: an identifier plus an open set of named properties.
///
/// The engine never mutates a record; it only moves it into a bucket.
/// The property name `id` always reads the identifier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    id: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create a record with no properties besides its identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Set a property, replacing any previous value.
    #[must_use]
    pub fn set(mut self, property: &str, value: impl Into<Value>) -> Self {
        self.insert(property, value);
        self
    }

    /// Set a property (mutable reference version).
    pub fn insert(&mut self, property: &str, value: impl Into<Value>) {
        self.fields.insert(property.to_owned(), value.into());
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Look up a property value.
    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.fields.get(property)
    }

    /// Look up a property as predicate text.
    ///
    /// Returns `None` when the property is missing or not a string.
    #[must_use]
    pub fn text(&self, property: &str) -> Option<&str> {
        if property == "id" {
            return Some(&self.id);
        }
        self.fields.get(property).and_then(Value::as_text)
    }

    /// Iterate over `(property, value)` pairs in property-name order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}
