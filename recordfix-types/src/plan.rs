use crate::declaration::FIELD_SEPARATOR;
use serde::{Deserialize, Serialize};

/// Rule-centric view of a [`RuleDeclaration`](crate::RuleDeclaration).
///
/// Entries appear in the order their rule was first seen across the whole declaration, so two
/// distinct rules touching the same field run in that global order, not per-field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    #[serde(default)]
    pub entries: Vec<PlanEntry>,
}

/// One rule and the comma-joined field paths it governs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub rule: String,
    pub fields: String,
}

impl PlanEntry {
    /// Field paths in left-to-right order. Splits on literal commas, no trimming.
    pub fn field_paths(&self) -> impl Iterator<Item = &str> {
        self.fields.split(FIELD_SEPARATOR)
    }
}

impl ExecutionPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `fields` to `rule`'s entry, creating the entry at the end if the rule is new.
    pub fn push(&mut self, rule: &str, fields: &str) {
        match self.entries.iter_mut().find(|e| e.rule == rule) {
            Some(entry) => {
                entry.fields.push(FIELD_SEPARATOR);
                entry.fields.push_str(fields);
            }
            None => self.entries.push(PlanEntry {
                rule: rule.to_string(),
                fields: fields.to_string(),
            }),
        }
    }

    pub fn get(&self, rule: &str) -> Option<&PlanEntry> {
        self.entries.iter().find(|e| e.rule == rule)
    }

    pub fn rules(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.rule.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
