use crate::error::{FixError, FixOutcome};
use crate::planner::{self, CompiledPlan};
use crate::walker::{WalkError, Walker};
use recordfix_rules::RuleCatalog;
use recordfix_types::{ExecutionPlan, FixSummary, Record, RuleDeclaration};
use serde_json::{Map, Value};
use tracing::{debug, info};

/// Normalizes record batches against a rule declaration.
///
/// Each [`fix_data`](Self::fix_data) call resets the outputs, then partitions the batch: records
/// that satisfy every `required` path land (transformed) in [`get`](Self::get); the rest land
/// (untouched) in [`get_excluded`](Self::get_excluded). Both keep input order.
#[derive(Debug)]
pub struct RecordFixer {
    catalog: RuleCatalog,
    normalized: Vec<Record>,
    excluded: Vec<Record>,
    plan: ExecutionPlan,
}

impl Default for RecordFixer {
    fn default() -> Self {
        Self::new(RuleCatalog::builtin())
    }
}

impl RecordFixer {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self {
            catalog,
            normalized: Vec::new(),
            excluded: Vec::new(),
            plan: ExecutionPlan::new(),
        }
    }

    /// Compile `declaration` without touching any record.
    pub fn plan(&self, declaration: &RuleDeclaration) -> FixOutcome<ExecutionPlan> {
        planner::compile(declaration, &self.catalog).map(|compiled| compiled.plan)
    }

    /// Fix every record in `records`.
    ///
    /// Fails only for malformed declarations; the outputs are left empty in that case.
    pub fn fix_data<I>(&mut self, records: I, declaration: &RuleDeclaration) -> FixOutcome<&mut Self>
    where
        I: IntoIterator<Item = Record>,
    {
        self.normalized.clear();
        self.excluded.clear();
        self.plan = ExecutionPlan::new();

        let compiled = planner::compile(declaration, &self.catalog)?;

        for (index, record) in records.into_iter().enumerate() {
            match fix_record(&self.catalog, &compiled, &record) {
                Ok(fixed) => self.normalized.push(fixed),
                Err(WalkError::RequiredMissing) => {
                    debug!(index, "record excluded: required field missing");
                    self.excluded.push(record);
                }
                Err(WalkError::Catalog(err)) => {
                    self.normalized.clear();
                    self.excluded.clear();
                    return Err(FixError::Catalog(err));
                }
            }
        }

        self.plan = compiled.plan;
        let summary = self.summary();
        info!(
            records = summary.records_total,
            normalized = summary.normalized,
            excluded = summary.excluded,
            "fixed record batch"
        );
        Ok(self)
    }

    /// Records that passed, transformed.
    pub fn get(&self) -> &[Record] {
        &self.normalized
    }

    /// Records that missed a required field, exactly as supplied.
    pub fn get_excluded(&self) -> &[Record] {
        &self.excluded
    }

    /// The plan compiled by the last successful [`fix_data`](Self::fix_data).
    pub fn last_plan(&self) -> &ExecutionPlan {
        &self.plan
    }

    pub fn summary(&self) -> FixSummary {
        let normalized = self.normalized.len() as u64;
        let excluded = self.excluded.len() as u64;
        FixSummary {
            records_total: normalized + excluded,
            normalized,
            excluded,
        }
    }

    /// Hand over `(normalized, excluded)`.
    pub fn into_outputs(self) -> (Vec<Record>, Vec<Record>) {
        (self.normalized, self.excluded)
    }
}

fn fix_record(
    catalog: &RuleCatalog,
    compiled: &CompiledPlan,
    record: &Record,
) -> Result<Record, WalkError> {
    let mut value = coerce(record);
    for step in &compiled.steps {
        let walker = Walker::new(catalog, &step.rule);
        for path in &step.paths {
            value = walker.walk(value, path.segments())?;
        }
    }
    Ok(value)
}

/// Containers pass through; `null` becomes an empty map, other scalars a one-element sequence.
fn coerce(record: &Record) -> Record {
    match record {
        Value::Object(_) | Value::Array(_) => record.clone(),
        Value::Null => Value::Object(Map::new()),
        scalar => Value::Array(vec![scalar.clone()]),
    }
}
