//! Rule catalog: the named value normalizers a declaration can refer to.
//!
//! This crate owns *what* a rule does to one value. Where the value lives inside a record, and
//! what happens when it is missing, is the `recordfix-engine` crate's business.

mod builtin;
mod catalog;
mod rule;

pub use builtin::{
    is_falsy, scalar_text, DoubleRule, IntegerRule, RequiredRule, UrlRule,
};
pub use catalog::{CatalogError, RuleCatalog};
pub use rule::{FixResult, FnRule, Rule, RuleMeta};
