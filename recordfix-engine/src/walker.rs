//! Path traversal for a single rule over a single record.
//!
//! Values move in and a new value comes back; nothing is mutated through shared references.
//! The first segment of the remaining path decides the step:
//! - last segment: *terminal*, apply the rule to the value at that key (a trailing `*` is a
//!   literal key)
//! - otherwise: *dive*, recurse into the container at that key (or every element for `*`)
//!
//! A key that is absent, or a value that is not a container where one is needed, triggers the
//! missing-field policy: `required` aborts the record, `exists` materializes the path with `null`,
//! every other rule leaves the value untouched.

use recordfix_rules::{CatalogError, FixResult, RuleCatalog};
use recordfix_types::path::WILDCARD;
use recordfix_types::{reserved, PathSegment, Record};
use serde_json::{Map, Value};
use tracing::trace;

/// Why a walk stopped early.
#[derive(Debug)]
pub(crate) enum WalkError {
    /// The record must be excluded.
    RequiredMissing,
    /// The catalog could not apply the rule.
    Catalog(CatalogError),
}

impl From<CatalogError> for WalkError {
    fn from(err: CatalogError) -> Self {
        WalkError::Catalog(err)
    }
}

type WalkResult = Result<Record, WalkError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Policy {
    Exists,
    Required,
    Transform,
}

pub(crate) struct Walker<'a> {
    catalog: &'a RuleCatalog,
    rule: &'a str,
    policy: Policy,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(catalog: &'a RuleCatalog, rule: &'a str) -> Self {
        let policy = match rule {
            reserved::EXISTS => Policy::Exists,
            reserved::REQUIRED => Policy::Required,
            _ => Policy::Transform,
        };
        Self {
            catalog,
            rule,
            policy,
        }
    }

    /// Apply the rule at `path` inside `value`.
    pub(crate) fn walk(&self, value: Record, path: &[PathSegment]) -> WalkResult {
        match path.split_first() {
            None => Ok(value),
            Some((first, [])) => self.terminal(value, first),
            Some((first, rest)) => self.dive(value, first, rest),
        }
    }

    /// The last segment is always a literal key, `*` included.
    fn terminal(&self, mut value: Record, seg: &PathSegment) -> WalkResult {
        let literal;
        let seg = match seg {
            PathSegment::Wildcard => {
                literal = PathSegment::Key(WILDCARD.to_string());
                &literal
            }
            key => key,
        };

        if let Some(slot) = slot_mut(&mut value, seg) {
            let current = std::mem::take(slot);
            *slot = self.fix_value(current)?;
            return Ok(value);
        }

        self.on_missing(seg)?;
        if self.policy == Policy::Exists {
            seed(&mut value, seg);
        }
        Ok(value)
    }

    fn dive(&self, value: Record, seg: &PathSegment, rest: &[PathSegment]) -> WalkResult {
        match (seg, value) {
            (PathSegment::Wildcard, Value::Array(items)) => items
                .into_iter()
                .map(|item| self.walk(item, rest))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            (PathSegment::Wildcard, Value::Object(map)) => map
                .into_iter()
                .map(|(k, v)| Ok((k, self.walk(v, rest)?)))
                .collect::<Result<Map<_, _>, WalkError>>()
                .map(Value::Object),
            (PathSegment::Wildcard, other) => {
                self.on_missing(seg)?;
                if self.policy == Policy::Exists {
                    return Ok(Value::Array(vec![self.walk(Value::Null, rest)?]));
                }
                Ok(other)
            }
            (PathSegment::Key(_), mut value) => {
                if let Some(slot) = slot_mut(&mut value, seg).filter(|slot| is_container(slot)) {
                    let current = std::mem::take(slot);
                    *slot = self.walk(current, rest)?;
                    return Ok(value);
                }

                self.on_missing(seg)?;
                if self.policy == Policy::Exists
                    && let Some(slot) = seed(&mut value, seg)
                {
                    *slot = self.walk(Value::Null, rest)?;
                }
                Ok(value)
            }
        }
    }

    /// Run the rule on a present value.
    fn fix_value(&self, value: Record) -> WalkResult {
        if self.policy == Policy::Exists {
            return Ok(value);
        }
        match self.catalog.apply(self.rule, &value)? {
            FixResult::Fixed(fixed) => Ok(fixed),
            FixResult::Missing => Err(WalkError::RequiredMissing),
            FixResult::NotApplicable => Ok(value),
        }
    }

    fn on_missing(&self, seg: &PathSegment) -> Result<(), WalkError> {
        trace!(rule = self.rule, segment = %seg, "path segment missing");
        if self.policy == Policy::Required {
            return Err(WalkError::RequiredMissing);
        }
        Ok(())
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

/// The existing value addressed by a literal segment.
fn slot_mut<'v>(value: &'v mut Value, seg: &PathSegment) -> Option<&'v mut Value> {
    match value {
        Value::Object(map) => map.get_mut(seg.as_key()?),
        Value::Array(items) => items.get_mut(seg.as_index()?),
        _ => None,
    }
}

/// Highest sequence index `exists` pads up to.
pub(crate) const MAX_PADDED_INDEX: usize = 4096;

/// Make the slot for `seg` exist and hold `null`, creating the container itself from `null`.
///
/// Non-null scalars, non-index keys on sequences and indexes past [`MAX_PADDED_INDEX`] cannot
/// hold the slot; they are left as-is.
fn seed<'v>(value: &'v mut Value, seg: &PathSegment) -> Option<&'v mut Value> {
    if value.is_null() {
        *value = match seg.as_index() {
            Some(index) if index <= MAX_PADDED_INDEX => Value::Array(Vec::new()),
            _ => Value::Object(Map::new()),
        };
    }

    match value {
        Value::Object(map) => {
            let slot = map.entry(seg.as_key()?).or_insert(Value::Null);
            *slot = Value::Null;
            Some(slot)
        }
        Value::Array(items) => {
            let index = seg.as_index()?;
            if index >= items.len() {
                if index > MAX_PADDED_INDEX {
                    trace!(segment = %seg, "index too far past the end to pad");
                    return None;
                }
                items.resize(index + 1, Value::Null);
            }
            let slot = items.get_mut(index)?;
            *slot = Value::Null;
            Some(slot)
        }
        _ => {
            trace!(segment = %seg, "cannot materialize a key inside a scalar");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use recordfix_types::FieldPath;
    use serde_json::json;

    fn walk(rule: &str, path: &str, value: Value) -> Result<Value, WalkError> {
        let catalog = RuleCatalog::builtin();
        let path = FieldPath::parse(path).unwrap();
        Walker::new(&catalog, rule).walk(value, path.segments())
    }

    #[test]
    fn terminal_transform_replaces_present_value() {
        let out = walk("integer", "id", json!({"id": "7a", "name": "x"})).unwrap();
        assert_eq!(out, json!({"id": 7, "name": "x"}));
    }

    #[test]
    fn terminal_transform_on_missing_key_is_noop() {
        let out = walk("integer", "id", json!({"name": "x"})).unwrap();
        assert_eq!(out, json!({"name": "x"}));
    }

    #[test]
    fn exists_keeps_present_values() {
        let out = walk("exists", "id", json!({"id": "7a"})).unwrap();
        assert_eq!(out, json!({"id": "7a"}));
    }

    #[test]
    fn exists_creates_intermediate_containers() {
        let out = walk("exists", "meta.count", json!({})).unwrap();
        assert_eq!(out, json!({"meta": {"count": null}}));
    }

    #[test]
    fn exists_overwrites_scalar_where_container_needed() {
        let out = walk("exists", "meta.count", json!({"meta": "oops"})).unwrap();
        assert_eq!(out, json!({"meta": {"count": null}}));
    }

    #[test]
    fn exists_seeds_wildcard_on_missing_sequence() {
        let out = walk("exists", "items.*.id", json!({})).unwrap();
        assert_eq!(out, json!({"items": [{"id": null}]}));
    }

    #[test]
    fn exists_pads_sequences_for_index_segments() {
        let out = walk("exists", "tags.2", json!({"tags": ["a"]})).unwrap();
        assert_eq!(out, json!({"tags": ["a", null, null]}));
    }

    #[test]
    fn required_missing_anywhere_aborts() {
        assert!(matches!(
            walk("required", "meta.count", json!({})),
            Err(WalkError::RequiredMissing)
        ));
        assert!(matches!(
            walk("required", "items.*.id", json!({"items": "scalar"})),
            Err(WalkError::RequiredMissing)
        ));
        assert!(matches!(
            walk("required", "items.*.id", json!({"items": [{"id": 1}, {}]})),
            Err(WalkError::RequiredMissing)
        ));
    }

    #[test]
    fn required_present_falsy_value_aborts() {
        assert!(matches!(
            walk("required", "id", json!({"id": null})),
            Err(WalkError::RequiredMissing)
        ));
        assert!(walk("required", "id", json!({"id": 0})).is_ok());
    }

    #[test]
    fn wildcard_dive_applies_to_every_element() {
        let out = walk(
            "integer",
            "items.*.id",
            json!({"items": [{"id": "7a"}, {"id": "9"}]}),
        )
        .unwrap();
        assert_eq!(out, json!({"items": [{"id": 7}, {"id": 9}]}));
    }

    #[test]
    fn wildcard_over_non_sequence_is_noop_for_transforms() {
        let out = walk("integer", "items.*.id", json!({"items": "n/a"})).unwrap();
        assert_eq!(out, json!({"items": "n/a"}));
    }

    #[test]
    fn wildcard_skips_elements_without_the_key() {
        let out = walk(
            "integer",
            "items.*.id",
            json!({"items": [{"id": "1"}, "bare", {"other": 2}]}),
        )
        .unwrap();
        assert_eq!(out, json!({"items": [{"id": 1}, "bare", {"other": 2}]}));
    }

    #[test]
    fn nested_wildcards_dive_then_read_literal_star() {
        let out = walk(
            "integer",
            "rows.*.*",
            json!({"rows": [{"*": "1a", "b": "2b"}, ["3c"]]}),
        )
        .unwrap();
        assert_eq!(out, json!({"rows": [{"*": 1, "b": "2b"}, ["3c"]]}));
    }

    #[test]
    fn trailing_star_is_a_literal_key() {
        let out = walk("integer", "m.*", json!({"m": {"*": "7x", "b": "1y"}})).unwrap();
        assert_eq!(out, json!({"m": {"*": 7, "b": "1y"}}));

        let out = walk("integer", "tags.*", json!({"tags": ["1a", "2b"]})).unwrap();
        assert_eq!(out, json!({"tags": ["1a", "2b"]}));
    }

    #[test]
    fn required_trailing_star_misses_on_sequences() {
        assert!(matches!(
            walk("required", "tags.*", json!({"tags": ["a", "b"]})),
            Err(WalkError::RequiredMissing)
        ));
        assert!(walk("required", "tags.*", json!({"tags": {"*": "a"}})).is_ok());
    }

    #[test]
    fn exists_trailing_star_seeds_a_literal_key() {
        let out = walk("exists", "meta.*", json!({})).unwrap();
        assert_eq!(out, json!({"meta": {"*": null}}));
    }

    #[test]
    fn exists_leaves_sequences_alone_for_far_indexes() {
        let out = walk("exists", "tags.18446744073709551615", json!({"tags": ["a"]})).unwrap();
        assert_eq!(out, json!({"tags": ["a"]}));

        let out = walk("exists", "tags.10000000000", json!({"tags": []})).unwrap();
        assert_eq!(out, json!({"tags": []}));

        let out = walk("exists", "tags.4097.id", json!({"tags": ["a"]})).unwrap();
        assert_eq!(out, json!({"tags": ["a"]}));
    }

    #[test]
    fn exists_pads_up_to_the_limit() {
        let path = format!("tags.{MAX_PADDED_INDEX}");
        let out = walk("exists", &path, json!({"tags": []})).unwrap();
        assert_eq!(out["tags"].as_array().unwrap().len(), MAX_PADDED_INDEX + 1);
    }

    #[test]
    fn index_segments_address_sequence_elements() {
        let out = walk("integer", "items.1.id", json!({"items": [{"id": "1"}, {"id": "2"}]}))
            .unwrap();
        assert_eq!(out, json!({"items": [{"id": "1"}, {"id": 2}]}));
    }

    #[test]
    fn dive_through_scalar_leaves_value() {
        let out = walk("integer", "a.b", json!({"a": 5})).unwrap();
        assert_eq!(out, json!({"a": 5}));
    }
}
