//! Error types for recordfix-engine.
//!
//! Only malformed declarations surface here. Records that miss a required field are excluded and
//! never produce an error.

use recordfix_rules::CatalogError;
use recordfix_types::DeclarationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixError {
    /// A rule chain names a rule the catalog does not know.
    #[error("unknown rule '{rule}' declared for field '{field}'")]
    UnknownRule { rule: String, field: String },

    /// A declared field path cannot be parsed.
    #[error("invalid field path '{field}': {source}")]
    InvalidPath {
        field: String,
        #[source]
        source: DeclarationError,
    },

    /// The catalog failed while a record was being walked.
    #[error("rule catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

impl FixError {
    /// Returns true if the declaration itself is at fault.
    pub fn is_declaration_error(&self) -> bool {
        matches!(
            self,
            FixError::UnknownRule { .. } | FixError::InvalidPath { .. }
        )
    }

    /// Returns the recommended exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_declaration_error() { 2 } else { 1 }
    }
}

/// Result type alias using FixError.
pub type FixOutcome<T> = Result<T, FixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_rule_reports_exit_code_2() {
        let err = FixError::UnknownRule {
            rule: "uppercase".to_string(),
            field: "name".to_string(),
        };
        assert!(err.is_declaration_error());
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("uppercase"));
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn invalid_path_keeps_source() {
        let err = FixError::InvalidPath {
            field: "a..b".to_string(),
            source: DeclarationError::EmptySegment {
                path: "a..b".to_string(),
            },
        };
        assert_eq!(err.exit_code(), 2);
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn catalog_error_reports_exit_code_1() {
        let err = FixError::from(CatalogError::UnknownRule {
            rule: "x".to_string(),
        });
        assert!(!err.is_declaration_error());
        assert_eq!(err.exit_code(), 1);
    }
}
