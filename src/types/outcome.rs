use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use super::record::Record;

/// Name of the catch-all bucket for records no rule routed elsewhere.
pub const INBOX: &str = "Inbox";

/// What happened to one matched record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionLogEntry {
    pub record_id: String,
    /// The folder whose rule matched, which is not necessarily the bucket
    /// the record landed in.
    pub folder: String,
    /// Rendered actions in declaration order, e.g. `"move to Alerts"`.
    pub actions: Vec<String>,
}

/// Run metadata. Everything but `processed_at` is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunMeta {
    pub engine: String,
    pub version: String,
    pub processed_at: DateTime<Utc>,
    pub rule_count: usize,
    pub record_count: usize,
    /// Records dropped because their identifier was already processed.
    pub skipped_count: usize,
}

/// Result of one engine run: buckets, action log and metadata.
///
/// Buckets are ordered: `Inbox` first, then declared folders in priority
/// order, then any `move to` targets that were not declared folders.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub struct RunResult {
    buckets: IndexMap<String, Vec<Record>>,
    action_log: Vec<ActionLogEntry>,
    meta: RunMeta,
}

impl RunResult {
    pub(crate) fn new(
        buckets: IndexMap<String, Vec<Record>>,
        action_log: Vec<ActionLogEntry>,
        meta: RunMeta,
    ) -> Self {
        Self {
            buckets,
            action_log,
            meta,
        }
    }

    /// All buckets keyed by folder name.
    #[must_use]
    pub fn buckets(&self) -> &IndexMap<String, Vec<Record>> {
        &self.buckets
    }

    /// Records routed to `name`, or `None` if no such bucket exists.
    #[must_use]
    pub fn bucket(&self, name: &str) -> Option<&[Record]> {
        self.buckets.get(name).map(Vec::as_slice)
    }

    /// Identifiers routed to `name`, in input order. Empty if the bucket
    /// does not exist.
    #[must_use]
    pub fn bucket_ids(&self, name: &str) -> Vec<&str> {
        self.bucket(name)
            .map(|records| records.iter().map(Record::id).collect())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn inbox(&self) -> &[Record] {
        self.bucket(INBOX).unwrap_or_default()
    }

    /// One entry per matched record, in input order.
    #[must_use]
    pub fn action_log(&self) -> &[ActionLogEntry] {
        &self.action_log
    }

    /// The log entry for a record, if it matched.
    #[must_use]
    pub fn log_for(&self, record_id: &str) -> Option<&ActionLogEntry> {
        self.action_log.iter().find(|e| e.record_id == record_id)
    }

    #[must_use]
    pub fn meta(&self) -> &RunMeta {
        &self.meta
    }

    /// Take the buckets, dropping the log and metadata.
    #[must_use]
    pub fn into_buckets(self) -> IndexMap<String, Vec<Record>> {
        self.buckets
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} records:", self.meta.record_count)?;
        for (i, (name, records)) in self.buckets.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{name}={}", records.len())?;
        }
        write!(
            f,
            "; {} logged, {} skipped",
            self.action_log.len(),
            self.meta.skipped_count
        )
    }
}
