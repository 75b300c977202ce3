//! Behaviour of the built-in rules through the catalog surface.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use recordfix_rules::{FixResult, RuleCatalog};
use serde_json::{json, Value};

fn fixed(catalog: &RuleCatalog, rule: &str, value: Value) -> Value {
    match catalog.apply(rule, &value).expect("known rule") {
        FixResult::Fixed(v) => v,
        other => panic!("expected a fixed value from {rule}, got {other:?}"),
    }
}

#[test]
fn url_prefixes_scheme_and_encodes_spaces() {
    let catalog = RuleCatalog::builtin();
    assert_eq!(
        fixed(&catalog, "url", json!("example.com/a b")),
        json!("http://example.com/a%20b")
    );
    assert_eq!(
        fixed(&catalog, "url", json!("HTTPS://Example.com/x y")),
        json!("HTTPS://Example.com/x%20y")
    );
    assert_eq!(
        fixed(&catalog, "url", json!("ftp://files.example.com")),
        json!("ftp://files.example.com")
    );
}

#[test]
fn url_maps_falsy_values_to_null() {
    let catalog = RuleCatalog::builtin();
    for v in [json!(""), json!(null), json!(0), json!("0"), json!(false)] {
        assert_eq!(fixed(&catalog, "url", v), Value::Null);
    }
}

#[test]
fn url_does_not_prefix_twice() {
    let catalog = RuleCatalog::builtin();
    let once = fixed(&catalog, "url", json!("example.com/a b"));
    let twice = fixed(&catalog, "url", once.clone());
    assert_eq!(once, twice);
}

#[test]
fn url_leaves_non_empty_containers_alone() {
    let catalog = RuleCatalog::builtin();
    assert_eq!(
        fixed(&catalog, "url", json!(["a.com"])),
        json!(["a.com"])
    );
}

#[test]
fn integer_and_double_outputs_are_numbers() {
    let catalog = RuleCatalog::builtin();
    assert_eq!(fixed(&catalog, "integer", json!("7a")), json!(7));
    assert_eq!(fixed(&catalog, "integer", json!("")), json!(0));
    assert_eq!(fixed(&catalog, "double", json!("3,25 kg")), json!(3.25));
    assert_eq!(fixed(&catalog, "double", json!("none")), json!(0.0));
}

#[test]
fn required_signals_missing_for_falsy_values() {
    let catalog = RuleCatalog::builtin();
    assert_eq!(
        catalog.apply("required", &json!(null)).unwrap(),
        FixResult::Missing
    );
    assert_eq!(
        catalog.apply("required", &json!("0")).unwrap(),
        FixResult::Missing
    );
    assert_eq!(
        catalog.apply("required", &json!(0)).unwrap(),
        FixResult::Fixed(json!(0))
    );
    assert_eq!(
        catalog.apply("required", &json!("")).unwrap(),
        FixResult::Fixed(json!(""))
    );
}

proptest! {
    #[test]
    fn integer_is_idempotent(raw in "\\PC{0,24}") {
        let catalog = RuleCatalog::builtin();
        let once = fixed(&catalog, "integer", json!(raw));
        let twice = fixed(&catalog, "integer", once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn integer_accepts_already_numeric_strings(n in 0i64..i64::MAX) {
        let catalog = RuleCatalog::builtin();
        prop_assert_eq!(fixed(&catalog, "integer", json!(n.to_string())), json!(n));
    }

    #[test]
    fn double_is_idempotent(raw in "[0-9.,a-z ]{0,16}") {
        let catalog = RuleCatalog::builtin();
        let once = fixed(&catalog, "double", json!(raw));
        let twice = fixed(&catalog, "double", once.clone());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn double_keeps_numeric_strings(whole in 0u32..1_000_000, frac in 0u32..1000) {
        let catalog = RuleCatalog::builtin();
        let text = format!("{whole}.{frac}");
        let expected: f64 = text.parse().unwrap();
        prop_assert_eq!(fixed(&catalog, "double", json!(text)), json!(expected));
    }

    #[test]
    fn url_is_idempotent(host in "[a-z]{1,10}\\.[a-z]{2,3}", path in "[a-z ]{0,10}") {
        let catalog = RuleCatalog::builtin();
        let once = fixed(&catalog, "url", json!(format!("{host}/{path}")));
        let twice = fixed(&catalog, "url", once.clone());
        prop_assert_eq!(once, twice);
    }
}
