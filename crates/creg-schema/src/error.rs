//! # Contract-Level Errors
//!
//! Structural failures of a schema document. Each variant renders as the
//! single fixed sentence surfaced to the user when a contract cannot be
//! used; message checks never run once one of these is raised.

use thiserror::Error;

/// A schema document could not be turned into a usable dictionary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The schema text is not JSON.
    #[error("Contract contains invalid JSON.")]
    InvalidJson,

    /// The JSON does not have the shape of a schema document.
    #[error("Contract is not a valid schema definition.")]
    InvalidSchema {
        /// What was wrong with the document, for logs.
        reason: String,
    },

    /// No top-level `Contract` definition.
    #[error("Contract is missing the required \"Contract\" definition.")]
    MissingContractKey,

    /// The `Contract` definition is not an object with properties.
    #[error("The \"Contract\" definition must be an object with at least one property.")]
    InvalidContract,

    /// A `$ref` does not start with `#/`.
    #[error("Contract reference \"{reference}\" is malformed; references must begin with \"#/\".")]
    MalformedReference {
        /// The reference as written.
        reference: String,
    },

    /// A `$ref` names a definition that does not exist.
    #[error("Contract reference \"#/{name}\" could not be resolved.")]
    UnresolvedReference {
        /// The referenced definition name.
        name: String,
    },

    /// A `$ref` names a definition that is itself only a reference.
    #[error("Contract reference \"#/{name}\" points to another reference, which is not supported.")]
    ChainedReference {
        /// The referenced definition name.
        name: String,
    },

    /// A definition reaches itself through its own properties or items.
    #[error("Contract reference \"#/{name}\" is circular.")]
    CyclicReference {
        /// The definition found on its own expansion path.
        name: String,
    },
}

impl SchemaError {
    /// Whether this failure concerns a `$ref` rather than the document shape.
    pub fn is_reference_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedReference { .. }
                | Self::UnresolvedReference { .. }
                | Self::ChainedReference { .. }
                | Self::CyclicReference { .. }
        )
    }
}

/// Why a string pattern produced no sample text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern is not a valid regular expression.
    #[error("pattern is not a valid regular expression: {0}")]
    Malformed(String),

    /// Valid, but uses constructs the generator cannot produce text for.
    #[error("pattern is valid but cannot be synthesized: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_reference_names_target() {
        let err = SchemaError::UnresolvedReference {
            name: "Address".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Contract reference \"#/Address\" could not be resolved."
        );
        assert!(err.is_reference_error());
    }

    #[test]
    fn invalid_schema_hides_reason() {
        let err = SchemaError::InvalidSchema {
            reason: "unknown variant `text`".to_string(),
        };
        assert_eq!(err.to_string(), "Contract is not a valid schema definition.");
        assert!(!err.is_reference_error());
    }
}
