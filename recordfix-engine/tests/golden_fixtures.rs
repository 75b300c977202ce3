//! Golden fixture tests for recordfix.
//!
//! Each directory under `tests/fixtures/` holds:
//!
//! - `records.json` - the input batch
//! - `rules.json` - the rule declaration
//! - `normalized.json` / `excluded.json` - the expected outputs

use fs_err as fs;
use pretty_assertions::assert_eq;
use recordfix_engine::{RecordFixer, RuleDeclaration};
use serde_json::Value;
use std::path::{Path, PathBuf};

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
    let contents = fs::read_to_string(path).expect("read fixture");
    serde_json::from_str(&contents).unwrap_or_else(|e| panic!("parse {}: {e}", path.display()))
}

fn run_fixture(name: &str) {
    let dir = fixtures_root().join(name);
    let records: Vec<Value> = read_json(&dir.join("records.json"));
    let rules: RuleDeclaration = read_json(&dir.join("rules.json"));
    let expected_normalized: Vec<Value> = read_json(&dir.join("normalized.json"));
    let expected_excluded: Vec<Value> = read_json(&dir.join("excluded.json"));

    let mut fixer = RecordFixer::default();
    fixer.fix_data(records, &rules).expect("fix_data");

    assert_eq!(fixer.get(), expected_normalized.as_slice(), "normalized: {name}");
    assert_eq!(
        fixer.get_excluded(),
        expected_excluded.as_slice(),
        "excluded: {name}"
    );
}

#[test]
fn golden_order_items() {
    run_fixture("order_items");
}

#[test]
fn golden_contacts() {
    run_fixture("contacts");
}

#[test]
fn golden_catalog_links() {
    run_fixture("catalog_links");
}

#[test]
fn every_fixture_directory_is_covered() {
    let mut names: Vec<String> = fs::read_dir(fixtures_root())
        .expect("read fixtures")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_dir())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["catalog_links", "contacts", "order_items"]);
}
