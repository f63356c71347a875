mod action;
mod dedup;
mod error;
mod expr;
mod outcome;
mod program;
mod record;
mod rule;
mod schema;
mod value;

pub use action::Action;
pub use dedup::DedupState;
pub use error::BuildError;
pub use expr::{field, Condition, FieldExpr, Pattern};
pub use outcome::{ActionLogEntry, RunMeta, RunResult, INBOX};
pub use program::{FolderBuilder, Program, ProgramBuilder};
pub use record::Record;
pub use rule::{Folder, Rule};
pub use schema::{FieldAccess, Schema};
pub use value::Value;
