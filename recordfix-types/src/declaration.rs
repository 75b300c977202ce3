use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Separator between rule names in a rule chain (`"required|integer"`).
pub const RULE_SEPARATOR: char = '|';

/// Separator between field paths sharing one rule (`"id,tel.no"`).
pub const FIELD_SEPARATOR: char = ',';

/// Malformed field addresses in a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    #[error("empty field path")]
    EmptyPath,

    #[error("empty segment in field path '{path}'")]
    EmptySegment { path: String },
}

/// Field-centric rule declaration: field path → pipe-delimited rule chain.
///
/// Entries keep insertion order. Deserializes from any map-shaped input (JSON object,
/// YAML mapping, TOML table) in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleDeclaration {
    entries: Vec<(String, String)>,
}

impl RuleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rule chain for `field`. An existing field keeps its position.
    pub fn insert(&mut self, field: impl Into<String>, chain: impl Into<String>) {
        let field = field.into();
        let chain = chain.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some(entry) => entry.1 = chain,
            None => self.entries.push((field, chain)),
        }
    }

    pub fn with(mut self, field: impl Into<String>, chain: impl Into<String>) -> Self {
        self.insert(field, chain);
        self
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, c)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, c)| (f.as_str(), c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Every entry of `other` inserted over this declaration.
    pub fn extend_from(&mut self, other: &RuleDeclaration) {
        for (field, chain) in other.iter() {
            self.insert(field, chain);
        }
    }
}

/// Split a rule chain into its rule names. Empty names are kept so they surface as unknown rules.
pub fn split_chain(chain: &str) -> impl Iterator<Item = &str> {
    chain.split(RULE_SEPARATOR)
}

impl<F, C> FromIterator<(F, C)> for RuleDeclaration
where
    F: Into<String>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (F, C)>>(iter: I) -> Self {
        let mut decl = RuleDeclaration::new();
        for (field, chain) in iter {
            decl.insert(field, chain);
        }
        decl
    }
}

impl Serialize for RuleDeclaration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, chain) in &self.entries {
            map.serialize_entry(field, chain)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RuleDeclaration {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DeclarationVisitor;

        impl<'de> Visitor<'de> for DeclarationVisitor {
            type Value = RuleDeclaration;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field paths to rule chains")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut decl = RuleDeclaration::new();
                while let Some((field, chain)) = access.next_entry::<String, String>()? {
                    decl.insert(field, chain);
                }
                Ok(decl)
            }
        }

        deserializer.deserialize_map(DeclarationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut decl = RuleDeclaration::new()
            .with("id", "integer")
            .with("name", "required");
        decl.insert("id", "required|integer");

        let entries: Vec<_> = decl.iter().collect();
        assert_eq!(
            entries,
            vec![("id", "required|integer"), ("name", "required")]
        );
    }

    #[test]
    fn split_chain_keeps_empty_names() {
        let names: Vec<_> = split_chain("integer|").collect();
        assert_eq!(names, vec!["integer", ""]);
    }

    #[test]
    fn deserializes_in_document_order() {
        let decl: RuleDeclaration =
            serde_json::from_str(r#"{"z": "url", "a": "integer", "m": "exists"}"#).unwrap();
        let fields: Vec<_> = decl.iter().map(|(f, _)| f).collect();
        assert_eq!(fields, vec!["z", "a", "m"]);
    }
}
