use crate::error::{FixError, FixOutcome};
use recordfix_rules::RuleCatalog;
use recordfix_types::declaration::split_chain;
use recordfix_types::{ExecutionPlan, FieldPath, RuleDeclaration};
use tracing::debug;

/// An [`ExecutionPlan`] with every field path parsed, ready to walk records.
#[derive(Debug, Clone)]
pub struct CompiledPlan {
    pub plan: ExecutionPlan,
    pub steps: Vec<CompiledStep>,
}

#[derive(Debug, Clone)]
pub struct CompiledStep {
    pub rule: String,
    pub paths: Vec<FieldPath>,
}

/// Invert a field-centric declaration into a rule-centric plan.
///
/// Rules keep the order they were first seen across the whole declaration:
/// `{"a": "integer|required", "b": "required"}` compiles to `integer: a`, `required: a,b`.
pub fn invert(declaration: &RuleDeclaration) -> ExecutionPlan {
    let mut plan = ExecutionPlan::new();
    for (field, chain) in declaration.iter() {
        for rule in split_chain(chain) {
            plan.push(rule, field);
        }
    }
    plan
}

/// Invert `declaration`, checking every rule name against `catalog` and parsing every path.
pub fn compile(declaration: &RuleDeclaration, catalog: &RuleCatalog) -> FixOutcome<CompiledPlan> {
    for (field, chain) in declaration.iter() {
        for rule in split_chain(chain) {
            catalog
                .ensure_known(rule)
                .map_err(|_| FixError::UnknownRule {
                    rule: rule.to_string(),
                    field: field.to_string(),
                })?;
        }
    }

    let plan = invert(declaration);

    let mut steps = Vec::with_capacity(plan.len());
    for entry in &plan.entries {
        let paths = entry
            .field_paths()
            .map(|field| {
                FieldPath::parse(field).map_err(|source| FixError::InvalidPath {
                    field: field.to_string(),
                    source,
                })
            })
            .collect::<FixOutcome<Vec<_>>>()?;

        debug!(rule = %entry.rule, fields = %entry.fields, "compiled plan entry");
        steps.push(CompiledStep {
            rule: entry.rule.clone(),
            paths,
        });
    }

    Ok(CompiledPlan { plan, steps })
}
