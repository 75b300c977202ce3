#![no_main]

//! Fuzz target for field path parsing.
//!
//! Any string either fails with a declaration error or parses into a path
//! whose display form parses back to the same segments.

use libfuzzer_sys::fuzz_target;
use recordfix_types::FieldPath;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(path) = FieldPath::parse(s) else {
        return;
    };

    assert!(!path.is_empty());
    let shown = path.to_string();
    let reparsed = FieldPath::parse(&shown).expect("display form must parse");
    assert_eq!(path.segments(), reparsed.segments());

    for segment in path.segments() {
        if let Some(index) = segment.as_index() {
            assert_eq!(segment.as_key(), Some(index.to_string().as_str()));
        }
    }
});
