//! # Case-Insensitive Keys
//!
//! Property names in contracts and messages match regardless of case.
//! `CiKey` is a key wrapper that keeps the original spelling for display
//! and error messages while hashing and comparing on a lower-cased form.
//! Any standard map keyed by `CiKey` is therefore case-insensitive.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A map key compared without regard to case.
#[derive(Debug, Clone)]
pub struct CiKey {
    original: String,
    folded: String,
}

impl CiKey {
    /// Wrap a name, preserving its spelling.
    pub fn new(name: impl Into<String>) -> Self {
        let original = name.into();
        let folded = original.to_lowercase();
        Self { original, folded }
    }

    /// The name as originally written.
    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// The lower-cased form used for comparison.
    pub fn folded(&self) -> &str {
        &self.folded
    }
}

impl PartialEq for CiKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded == other.folded
    }
}

impl Eq for CiKey {}

impl Hash for CiKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded.hash(state);
    }
}

impl PartialOrd for CiKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CiKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.folded.cmp(&other.folded)
    }
}

impl From<&str> for CiKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for CiKey {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for CiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.original)
    }
}

impl Serialize for CiKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.original)
    }
}

impl<'de> Deserialize<'de> for CiKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn equal_regardless_of_case() {
        assert_eq!(CiKey::new("Timestamp"), CiKey::new("timestamp"));
        assert_eq!(CiKey::new("ID"), CiKey::new("id"));
        assert_ne!(CiKey::new("Id"), CiKey::new("Ids"));
    }

    #[test]
    fn keeps_original_spelling() {
        let key = CiKey::new("FirstName");
        assert_eq!(key.as_str(), "FirstName");
        assert_eq!(key.folded(), "firstname");
        assert_eq!(key.to_string(), "FirstName");
    }

    #[test]
    fn map_lookup_ignores_case() {
        let mut map = HashMap::new();
        map.insert(CiKey::new("Contract"), 1);
        assert_eq!(map.get(&CiKey::new("CONTRACT")), Some(&1));
        assert_eq!(map.get(&CiKey::from("contract")), Some(&1));
    }

    #[test]
    fn serde_preserves_original() {
        let key: CiKey = serde_json::from_str(r#""UserName""#).unwrap();
        assert_eq!(key.as_str(), "UserName");
        assert_eq!(serde_json::to_string(&key).unwrap(), r#""UserName""#);
    }
}
