//! # Guid Identifiers
//!
//! Contracts reference a shared `Guid` definition for identifier fields.
//! Message values bound to that definition must read as a UUID in any of
//! the common textual encodings (hyphenated, simple, braced, URN).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CregError;

/// Name of the shared definition that marks a string as a Guid.
pub const GUID_DEFINITION: &str = "Guid";

/// A parsed Guid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Guid(pub Uuid);

impl Guid {
    /// Generate a new random (v4) Guid.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Guid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

/// Parse a Guid from text, tolerating surrounding whitespace.
pub fn parse_guid(s: &str) -> Result<Guid, CregError> {
    Uuid::parse_str(s.trim())
        .map(Guid)
        .map_err(|_| CregError::InvalidGuid(s.to_string()))
}

/// Whether a reference name designates the shared Guid definition.
pub fn is_guid_reference(name: &str) -> bool {
    name.eq_ignore_ascii_case(GUID_DEFINITION)
}
