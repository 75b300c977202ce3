//! Rule-application engine: turn a record batch + rule declaration into normalized and excluded
//! records.
//!
//! This crate owns *where* a rule applies inside a record and what happens when the path is
//! missing. What a rule does to a value is the `recordfix-rules` crate's business.

mod error;
mod fixer;
mod planner;
mod walker;

pub use error::{FixError, FixOutcome};
pub use fixer::RecordFixer;
pub use planner::{compile, invert, CompiledPlan, CompiledStep};

pub use recordfix_rules::{FixResult, Rule, RuleCatalog, RuleMeta};
pub use recordfix_types::{ExecutionPlan, FieldPath, FixSummary, Record, RuleDeclaration};
