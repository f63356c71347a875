use chrono::Utc;
use indexmap::IndexMap;

use crate::evaluate::first_match;
use crate::{
    Action, ActionLogEntry, CxrError, DedupState, Folder, Program, Record, Rule, RunMeta,
    RunResult, Schema, INBOX,
};

/// Engine name reported in [`RunMeta::engine`].
pub const ENGINE_NAME: &str = "cxr";

/// Engine version reported in [`RunMeta::version`].
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Classify a batch of records.
///
/// Folders are tried highest priority first; within a folder, rules are
/// tried in declaration order and the first matching rule wins for the
/// whole program. Records whose identifier is already in `prior` are
/// dropped without entering any bucket or the log.
///
/// Returns the result together with the updated dedup state: `prior` plus
/// the identifier of every record that matched a rule.
pub fn run(
    program: &Program,
    records: impl IntoIterator<Item = Record>,
    schema: &Schema,
    prior: DedupState,
) -> (RunResult, DedupState) {
    let order = program.priority_order();
    let mut buckets = initial_buckets(&order);
    let mut processed = prior;
    let mut action_log = Vec::new();

    let mut record_count = 0;
    let mut skipped_count = 0;
    let mut unmatched = 0;

    for record in records {
        record_count += 1;

        if processed.contains(record.id()) {
            tracing::trace!(id = record.id(), "already processed, skipping");
            skipped_count += 1;
            continue;
        }

        let destination = match first_match(&order, &schema.access(&record)) {
            Some((folder, rule)) => {
                let destination = destination(rule).unwrap_or(INBOX).to_owned();
                tracing::trace!(
                    id = record.id(),
                    folder = %folder.name,
                    bucket = %destination,
                    "matched"
                );
                action_log.push(ActionLogEntry {
                    record_id: record.id().to_owned(),
                    folder: folder.name.clone(),
                    actions: rule.actions.iter().map(Action::to_string).collect(),
                });
                processed.insert(record.id());
                destination
            }
            None => {
                tracing::trace!(id = record.id(), "no rule matched");
                unmatched += 1;
                INBOX.to_owned()
            }
        };

        if !buckets.contains_key(&destination) {
            tracing::debug!(bucket = %destination, "creating bucket for undeclared move target");
        }
        buckets.entry(destination).or_default().push(record);
    }

    let rule_count = program.rule_count();
    tracing::info!(
        records = record_count,
        rules = rule_count,
        matched = action_log.len(),
        unmatched,
        skipped = skipped_count,
        "run complete"
    );

    let meta = RunMeta {
        engine: ENGINE_NAME.to_owned(),
        version: ENGINE_VERSION.to_owned(),
        processed_at: Utc::now(),
        rule_count,
        record_count,
        skipped_count,
    };
    (RunResult::new(buckets, action_log, meta), processed)
}

/// `Inbox` first, then declared folders in priority order.
fn initial_buckets(order: &[&Folder]) -> IndexMap<String, Vec<Record>> {
    let mut buckets = IndexMap::with_capacity(order.len() + 1);
    buckets.insert(INBOX.to_owned(), Vec::new());
    for folder in order {
        buckets.entry(folder.name.clone()).or_default();
    }
    buckets
}

/// The last `move to` target among a rule's actions.
fn destination(rule: &Rule) -> Option<&str> {
    rule.actions.iter().rev().find_map(|action| match action {
        Action::Move { target } => Some(target.as_str()),
        _ => None,
    })
}

/// A dedup state plus the operations that thread it through runs.
///
/// `Session` is the stateful front end over [`run`]: each run sees the
/// identifiers processed by earlier runs until [`Session::reset`] is
/// called. Share one across threads by wrapping it in a `Mutex`; runs are
/// then serialized.
///
/// # Example
///
/// ```
/// use cxr::{Record, Schema, Session};
///
/// let rules = r#"Folder Alerts WHEN subject contains "chk" THEN move to Alerts"#;
/// let mut session = Session::new();
///
/// let first = session
///     .run(rules, [Record::new("x").set("subject", "chk")], &Schema::default())
///     .unwrap();
/// assert_eq!(first.bucket_ids("Alerts"), vec!["x"]);
///
/// let again = session
///     .run(rules, [Record::new("x").set("subject", "chk")], &Schema::default())
///     .unwrap();
/// assert!(again.bucket_ids("Alerts").is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    processed: DedupState,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a previously saved dedup state.
    #[must_use]
    pub fn with_state(processed: DedupState) -> Self {
        Self { processed }
    }

    /// Parse `rule_text` and classify `records`.
    ///
    /// The rule text is parsed before any record is looked at, so a lex or
    /// parse error leaves the session untouched.
    ///
    /// Empty or whitespace-only rule text is an empty program: every record
    /// lands in [`INBOX`] and none is marked processed.
    ///
    /// # Errors
    ///
    /// Returns [`CxrError::Lex`] or [`CxrError::Parse`] for malformed rule
    /// text.
    pub fn run(
        &mut self,
        rule_text: &str,
        records: impl IntoIterator<Item = Record>,
        schema: &Schema,
    ) -> Result<RunResult, CxrError> {
        let program = Program::from_rules(rule_text)?;
        Ok(self.run_program(&program, records, schema))
    }

    /// Classify `records` with an already parsed program.
    pub fn run_program(
        &mut self,
        program: &Program,
        records: impl IntoIterator<Item = Record>,
        schema: &Schema,
    ) -> RunResult {
        let prior = std::mem::take(&mut self.processed);
        let (result, processed) = run(program, records, schema, prior);
        self.processed = processed;
        result
    }

    /// Forget every processed identifier.
    pub fn reset(&mut self) {
        tracing::debug!(cleared = self.processed.len(), "resetting dedup state");
        self.processed.clear();
    }

    #[must_use]
    pub fn processed(&self) -> &DedupState {
        &self.processed
    }

    #[must_use]
    pub fn into_state(self) -> DedupState {
        self.processed
    }
}
