//! Rule explanations for the `recordfix explain` command.
//!
//! Each built-in rule gets a description, what happens when its field is
//! missing, and a few worked examples.

/// Information about a built-in rule.
#[derive(Debug, Clone)]
pub struct RuleExplanation {
    /// Rule name as written in a declaration.
    pub key: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// What the rule does to a present value.
    pub description: &'static str,
    /// What happens when the declared path does not resolve.
    pub when_missing: &'static str,
    /// Raw value -> normalized value pairs, as JSON.
    pub examples: &'static [(&'static str, &'static str)],
}

/// Registry of all built-in rule explanations.
pub static RULE_REGISTRY: &[RuleExplanation] = &[
    RuleExplanation {
        key: "double",
        title: "Decimal Number",
        description: r#"Keeps digits, dots and commas, reads every comma as a dot, then parses
the longest leading `digits[.digits]` run as a float. Text without digits
becomes 0.0. Containers read as empty text."#,
        when_missing: "Nothing happens; the record keeps its shape.",
        examples: &[
            (r#""3,25 kg""#, "3.25"),
            (r#""1.2.3""#, "1.2"),
            (r#""n/a""#, "0.0"),
        ],
    },
    RuleExplanation {
        key: "exists",
        title: "Field Exists",
        description: r#"Guarantees the path is present. Present values are never altered.
Missing map keys are inserted as null, sequences are padded with null up to
an index segment (up to index 4096), and null parents become maps. A
wildcard over a missing sequence creates a one-element sequence. A trailing
`*` is the literal key "*"."#,
        when_missing: "The path is materialized with null.",
        examples: &[(r#"{}  (path meta.count)"#, r#"{"meta": {"count": null}}"#)],
    },
    RuleExplanation {
        key: "integer",
        title: "Integer",
        description: r#"Drops every character that is not an ASCII digit and parses the rest
as an integer. Text without digits becomes 0. Overlong digit runs saturate
at the largest 64-bit integer."#,
        when_missing: "Nothing happens; the record keeps its shape.",
        examples: &[
            (r#""7a""#, "7"),
            (r#""+7 (900) 123""#, "7900123"),
            (r#""""#, "0"),
        ],
    },
    RuleExplanation {
        key: "required",
        title: "Required Field",
        description: r#"Leaves the value untouched but excludes the whole record when the
path does not resolve, or resolves to a falsy value. The empty string and
integer 0 count as present; null, false, "0", 0.0 and empty containers
do not. Under a wildcard, every element must satisfy the check."#,
        when_missing: "The record goes, unmodified, to excluded.json.",
        examples: &[(r#""0""#, "excluded"), (r#"0"#, "0")],
    },
    RuleExplanation {
        key: "url",
        title: "URL",
        description: r#"Falsy values become null. Otherwise prefixes `http://` unless the text
already starts with http://, https://, ftp:// or ftps:// (any case), and
encodes spaces as %20. Non-empty containers are left alone."#,
        when_missing: "Nothing happens; the record keeps its shape.",
        examples: &[
            (r#""example.com/a b""#, r#""http://example.com/a%20b""#),
            (r#""HTTPS://x.io""#, r#""HTTPS://x.io""#),
            (r#""""#, "null"),
        ],
    },
];

/// Look up a rule explanation by name, ignoring case.
pub fn lookup_rule(key: &str) -> Option<&'static RuleExplanation> {
    let key = key.trim();
    RULE_REGISTRY
        .iter()
        .find(|rule| rule.key.eq_ignore_ascii_case(key))
}

/// Rule names with an explanation.
pub fn list_rule_keys() -> Vec<&'static str> {
    RULE_REGISTRY.iter().map(|rule| rule.key).collect()
}
