#![no_main]

//! Fuzz target for the declaration -> fix_data pipeline.
//!
//! Builds declarations from a fixed path and rule vocabulary so most inputs
//! compile, then checks the partition invariants on arbitrary JSON records.

use libfuzzer_sys::fuzz_target;
use recordfix_engine::{RecordFixer, RuleDeclaration};
use serde_json::Value;

const PATHS: &[&str] = &[
    "id", "name", "items.*.id", "items.*", "meta.count", "tags.2", "*", "a.b.c", "items.0.url",
];
const RULES: &[&str] = &["integer", "double", "url", "required", "exists"];

#[derive(Debug, arbitrary::Arbitrary)]
struct PipelineInput {
    /// (path index, rule indices) pairs.
    declaration: Vec<(u8, Vec<u8>)>,
    /// Record batch as raw JSON.
    records_json: Vec<u8>,
}

fn build_declaration(raw: &[(u8, Vec<u8>)]) -> RuleDeclaration {
    raw.iter()
        .map(|(path, rules)| {
            let path = PATHS[*path as usize % PATHS.len()];
            let chain = rules
                .iter()
                .map(|r| RULES[*r as usize % RULES.len()])
                .collect::<Vec<_>>()
                .join("|");
            (path, chain)
        })
        .filter(|(_, chain)| !chain.is_empty())
        .collect()
}

fuzz_target!(|input: PipelineInput| {
    let Ok(Value::Array(records)) = serde_json::from_slice::<Value>(&input.records_json) else {
        return;
    };

    let declaration = build_declaration(&input.declaration);
    let has_required = declaration
        .iter()
        .any(|(_, chain)| chain.split('|').any(|rule| rule == "required"));

    let mut fixer = RecordFixer::default();
    fixer
        .fix_data(records.clone(), &declaration)
        .expect("vocabulary rules always compile");

    let summary = fixer.summary();
    assert_eq!(summary.records_total as usize, records.len());
    if !has_required {
        assert!(fixer.get_excluded().is_empty());
    }

    // Excluded records are verbatim inputs, in input order.
    let mut remaining = records.iter();
    for excluded in fixer.get_excluded() {
        assert!(remaining.any(|r| r == excluded));
    }
});
