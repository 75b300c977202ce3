use crate::declaration::DeclarationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Segment text that fans out across every element of a container.
pub const WILDCARD: &str = "*";

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A literal map key. On a sequence, a canonical decimal key is an index.
    Key(String),
    /// `*`: every element of the sequence (or every value of the map) at this position.
    Wildcard,
}

impl PathSegment {
    pub fn is_wildcard(&self) -> bool {
        matches!(self, PathSegment::Wildcard)
    }

    /// The key text, or `None` for the wildcard.
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(k) => Some(k),
            PathSegment::Wildcard => None,
        }
    }

    /// Sequence index for keys written in canonical decimal form (`"0"`, `"12"`, not `"012"`).
    pub fn as_index(&self) -> Option<usize> {
        let key = self.as_key()?;
        let canonical = key == "0" || (!key.starts_with('0') && !key.is_empty());
        if !canonical || !key.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        key.parse().ok()
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(k) => f.write_str(k),
            PathSegment::Wildcard => f.write_str(WILDCARD),
        }
    }
}

/// Dot-delimited address into a record, e.g. `items.*.id`.
///
/// Always holds at least one segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    pub fn parse(address: &str) -> Result<Self, DeclarationError> {
        if address.is_empty() {
            return Err(DeclarationError::EmptyPath);
        }

        let mut segments = Vec::new();
        for part in address.split('.') {
            if part.is_empty() {
                return Err(DeclarationError::EmptySegment {
                    path: address.to_string(),
                });
            }
            segments.push(if part == WILDCARD {
                PathSegment::Wildcard
            } else {
                PathSegment::Key(part.to_string())
            });
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn has_wildcard(&self) -> bool {
        self.segments.iter().any(PathSegment::is_wildcard)
    }
}

impl FromStr for FieldPath {
    type Err = DeclarationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for FieldPath {
    type Error = DeclarationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{seg}")?;
        }
        Ok(())
    }
}
