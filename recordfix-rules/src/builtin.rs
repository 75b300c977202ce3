use crate::rule::{FixResult, Rule, RuleMeta};
use recordfix_types::{reserved, Record};
use serde_json::{Number, Value};
use std::borrow::Cow;

/// Loose truthiness: `null`, `false`, numeric zero, `""`, `"0"` and empty containers are falsy.
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty() || s == "0",
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Text form of a scalar, or `None` for containers.
///
/// Floats render positionally (`1e20` → `"100000000000000000000"`) so digit filters never see an
/// exponent marker.
pub fn scalar_text(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::Null => Some(Cow::Borrowed("")),
        Value::Bool(true) => Some(Cow::Borrowed("1")),
        Value::Bool(false) => Some(Cow::Borrowed("")),
        Value::String(s) => Some(Cow::Borrowed(s)),
        Value::Number(n) => Some(Cow::Owned(number_text(n))),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        i.to_string()
    } else if let Some(u) = n.as_u64() {
        u.to_string()
    } else {
        n.as_f64().map(|f| f.to_string()).unwrap_or_default()
    }
}

fn is_integer_zero(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_i64() == Some(0) || n.as_u64() == Some(0),
        _ => false,
    }
}

/// Strips every non-digit and reads what is left as an integer.
pub struct IntegerRule;

impl IntegerRule {
    const NAME: &'static str = "integer";
    const DESCRIPTION: &'static str =
        "Keeps only the digits of the value and parses them as an integer (no digits -> 0)";

    pub fn normalize(value: &Value) -> i64 {
        let text = scalar_text(value).unwrap_or_default();
        let digits: String = text.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return 0;
        }
        // Only overflow can fail here.
        digits.parse().unwrap_or(i64::MAX)
    }
}

impl Rule for IntegerRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            structural: false,
        }
    }

    fn apply(&self, value: &Record) -> FixResult {
        FixResult::Fixed(Value::from(Self::normalize(value)))
    }
}

/// Keeps digits and decimal separators, treats `,` as `.`, parses the leading number.
pub struct DoubleRule;

impl DoubleRule {
    const NAME: &'static str = "double";
    const DESCRIPTION: &'static str =
        "Keeps digits, commas and dots, reads commas as dots and parses a float (invalid -> 0.0)";

    pub fn normalize(value: &Value) -> f64 {
        let text = scalar_text(value).unwrap_or_default();
        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();
        leading_float(&cleaned)
    }
}

/// Parses the longest `digits[.digits]` prefix; `"1.2.3"` reads as `1.2`.
fn leading_float(s: &str) -> f64 {
    let int_len = s.bytes().take_while(u8::is_ascii_digit).count();
    let frac_len = if s.as_bytes().get(int_len) == Some(&b'.') {
        s[int_len + 1..]
            .bytes()
            .take_while(u8::is_ascii_digit)
            .count()
    } else {
        0
    };

    if int_len == 0 && frac_len == 0 {
        return 0.0;
    }

    let int_part = if int_len == 0 { "0" } else { &s[..int_len] };
    let frac_part = if frac_len == 0 {
        "0"
    } else {
        &s[int_len + 1..int_len + 1 + frac_len]
    };
    format!("{int_part}.{frac_part}").parse().unwrap_or(0.0)
}

impl Rule for DoubleRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            structural: false,
        }
    }

    fn apply(&self, value: &Record) -> FixResult {
        let fixed = Number::from_f64(Self::normalize(value))
            .map(Value::Number)
            .unwrap_or(Value::Null);
        FixResult::Fixed(fixed)
    }
}

/// Adds a missing `http://` scheme and percent-encodes spaces.
pub struct UrlRule;

impl UrlRule {
    const NAME: &'static str = "url";
    const DESCRIPTION: &'static str =
        "Falsy -> null; otherwise prefixes http:// when no http(s)/ftp(s) scheme is present and encodes spaces as %20";
    const SCHEMES: &'static [&'static str] = &["http://", "https://", "ftp://", "ftps://"];

    pub fn has_scheme(text: &str) -> bool {
        Self::SCHEMES.iter().any(|scheme| {
            text.get(..scheme.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(scheme))
        })
    }

    pub fn normalize(text: &str) -> String {
        let with_scheme = if Self::has_scheme(text) {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(format!("http://{text}"))
        };
        with_scheme.replace(' ', "%20")
    }
}

impl Rule for UrlRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: Self::NAME.to_string(),
            description: Self::DESCRIPTION.to_string(),
            structural: false,
        }
    }

    fn apply(&self, value: &Record) -> FixResult {
        if is_falsy(value) {
            return FixResult::Fixed(Value::Null);
        }
        match scalar_text(value) {
            Some(text) => FixResult::Fixed(Value::String(Self::normalize(&text))),
            None => FixResult::Fixed(value.clone()),
        }
    }
}

/// Passes values through; falsy values other than `""` and integer `0` count as missing.
pub struct RequiredRule;

impl RequiredRule {
    const DESCRIPTION: &'static str =
        "Excludes the record when the field is absent, or present but falsy (except \"\" and integer 0)";

    pub fn is_present(value: &Value) -> bool {
        !is_falsy(value) || value.as_str() == Some("") || is_integer_zero(value)
    }
}

impl Rule for RequiredRule {
    fn meta(&self) -> RuleMeta {
        RuleMeta {
            name: reserved::REQUIRED.to_string(),
            description: Self::DESCRIPTION.to_string(),
            structural: true,
        }
    }

    fn apply(&self, value: &Record) -> FixResult {
        if Self::is_present(value) {
            FixResult::Fixed(value.clone())
        } else {
            FixResult::Missing
        }
    }
}
