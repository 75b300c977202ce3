#![no_main]

//! Fuzz target for rule declaration parsing and plan inversion.
//!
//! Arbitrary JSON either fails to deserialize or yields a declaration whose
//! inverted plan lists each rule once.

use libfuzzer_sys::fuzz_target;
use recordfix_engine::{invert, RuleDeclaration};

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(declaration) = serde_json::from_str::<RuleDeclaration>(s) else {
        return;
    };

    let _ = serde_json::to_string(&declaration);

    let plan = invert(&declaration);
    let mut rules: Vec<&str> = plan.rules().collect();
    let before = rules.len();
    rules.sort_unstable();
    rules.dedup();
    assert_eq!(before, rules.len(), "plan lists a rule twice");
});
