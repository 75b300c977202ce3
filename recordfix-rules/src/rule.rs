use recordfix_types::Record;
use serde::Serialize;

/// Outcome of applying a rule to one value.
#[derive(Debug, Clone, PartialEq)]
pub enum FixResult {
    /// Replace the value with this one.
    Fixed(Record),
    /// The value counts as absent; the record must be excluded.
    Missing,
    /// The rule is structural and has no value transform (`exists`).
    NotApplicable,
}

/// Catalog listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMeta {
    pub name: String,
    pub description: String,
    /// Resolved by the engine against the record shape, not only the value.
    pub structural: bool,
}

/// A named normalizer over a single raw value.
pub trait Rule: Send + Sync {
    fn meta(&self) -> RuleMeta;

    fn apply(&self, value: &Record) -> FixResult;
}

/// Closure-backed rule for host-supplied normalizers.
pub struct FnRule<F> {
    name: String,
    description: String,
    f: F,
}

impl<F> FnRule<F>
where
    F: Fn(&Record) -> FixResult + Send + Sync,
{
    pub fn new(name: impl Into<String>, description: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            f,
        }
    }
}

impl<F> Rule for FnRule<F>
where
    F: Fn(&Record) -> FixResult + Send + Sync,
{
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: self.name.clone(),
            description: self.description.clone(),
            structural: false,
        }
    }

    fn apply(&self, value: &Record) -> FixResult {
        (self.f)(value)
    }
}
