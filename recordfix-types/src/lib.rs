//! Shared DTOs for the recordfix workspace.
//!
//! # Design constraints
//! - Records are untyped: [`Record`] is a `serde_json::Value` (map, sequence or scalar).
//! - Declarations and plans keep their insertion order; rule application order depends on it.
//! - Report types are serialized to disk. Prefer adding optional fields over changing semantics.

pub mod declaration;
pub mod path;
pub mod plan;
pub mod report;

pub use declaration::{DeclarationError, RuleDeclaration};
pub use path::{FieldPath, PathSegment};
pub use plan::{ExecutionPlan, PlanEntry};
pub use report::{FixReport, FixSummary, RunInfo, ToolInfo};

/// One element of an input batch.
pub type Record = serde_json::Value;

/// Schema identifiers.
pub mod schema {
    pub const RECORDFIX_REPORT_V1: &str = "recordfix.report.v1";
}

/// Rule names the engine resolves structurally instead of dispatching to a catalog.
pub mod reserved {
    /// Materializes a missing path with `null`.
    pub const EXISTS: &str = "exists";
    /// Excludes the record when the path cannot be resolved.
    pub const REQUIRED: &str = "required";
}
