use std::collections::HashSet;

/// Identifiers of records already routed by a matching rule.
///
/// Owned by the caller and threaded through engine runs; records whose
/// identifier is present are skipped entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct DedupState {
    processed: HashSet<String>,
}

impl DedupState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.processed.contains(id)
    }

    /// Mark an identifier as processed. Returns `false` if it already was.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.processed.insert(id.into())
    }

    pub fn clear(&mut self) {
        self.processed.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.processed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.processed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.processed.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for DedupState {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            processed: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for DedupState {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.processed.extend(iter.into_iter().map(Into::into));
    }
}
