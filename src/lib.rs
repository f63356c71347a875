//! A small email rule language and the engine that runs it.
//!
//! Rule text declares folders, each with a priority and `WHEN ... THEN ...`
//! rules. The engine routes every record to the folder of the first rule
//! that matches, highest priority first, and logs the actions that fired.
//!
//! ```
//! use cxr::{Record, Schema, Session};
//!
//! let rules = r#"
//!     Folder Alerts priority 10
//!         WHEN sender IN ["github.com"] AND subject contains ["failed", "error"]
//!         THEN move to Alerts AND notify
//! "#;
//!
//! let records = [
//!     Record::new("1").set("from", "ci@github.com").set("subject", "Build FAILED"),
//!     Record::new("2").set("from", "friend@home.org").set("subject", "lunch"),
//! ];
//!
//! let mut session = Session::new();
//! let result = session.run(rules, records, &Schema::default()).unwrap();
//! assert_eq!(result.bucket_ids("Alerts"), vec!["1"]);
//! assert_eq!(result.bucket_ids("Inbox"), vec!["2"]);
//! assert_eq!(result.log_for("1").unwrap().actions, vec!["move to Alerts", "notify"]);
//! ```

mod engine;
mod error;
mod evaluate;
pub mod lex;
pub mod parse;
mod source;
mod types;

pub use engine::{run, Session, ENGINE_NAME, ENGINE_VERSION};
pub use error::CxrError;
pub use evaluate::evaluate;
pub use lex::{tokenize, LexError, Position, Token, TokenKind};
pub use parse::{parse, parse_rules, ParseError};
pub use source::{load_sources, RuleSource};
pub use types::{
    field, Action, ActionLogEntry, BuildError, Condition, DedupState, FieldAccess, FieldExpr,
    Folder, FolderBuilder, Pattern, Program, ProgramBuilder, Record, Rule, RunMeta, RunResult,
    Schema, Value, INBOX,
};
