//! # Reference Resolution
//!
//! Turns a raw schema document into a [`SchemaDictionary`] in which every
//! node has a concrete type.
//!
//! A schema document is a JSON object whose top-level keys are named
//! definitions. One of them, spelled exactly `Contract`, is the root object
//! schema for messages. The others are reusable definitions (`Guid`,
//! `DateTime`, custom objects) that nodes point at with `{"$ref": "#/Name"}`.
//!
//! ## Resolution Rules
//!
//! - A node with a `type` keeps it. A node with only a `$ref` takes type,
//!   format and pattern from the target, the example when it has none of
//!   its own, and structure where it declares none.
//! - Targets are looked up in the raw document. A target that is itself
//!   only a reference is rejected rather than followed.
//! - Substitution is deep, not leaf-only. A reference to an object or array
//!   definition copies its `properties` and `items` into the node, so
//!   nested keys are validated and sampled like inline ones.
//! - Copied structure is resolved in turn. A definition that reaches itself
//!   along that path is rejected as circular.
//! - Top-level names that differ only by case are rejected.
//!
//! Failures are returned as [`SchemaError`] values so callers can surface a
//! single contract-level message instead of partial output.

use creg_core::CiKey;
use indexmap::IndexMap;
use serde_json::Value;

use crate::error::SchemaError;
use crate::node::{parse_reference_name, SchemaNode, SchemaType};

/// Name of the root definition.
pub const CONTRACT_KEY: &str = "Contract";

/// Named definitions as written, before resolution.
pub type Definitions = IndexMap<CiKey, SchemaNode>;

/// A fully resolved schema document.
///
/// Immutable once built; validators and generators only read from it, so a
/// single dictionary can be shared across threads.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaDictionary {
    contract: SchemaNode,
    definitions: Definitions,
}

impl SchemaDictionary {
    /// The root `Contract` node.
    pub fn contract(&self) -> &SchemaNode {
        &self.contract
    }

    /// Look up a definition by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        if name.eq_ignore_ascii_case(CONTRACT_KEY) {
            Some(&self.contract)
        } else {
            self.definitions.get(&CiKey::new(name))
        }
    }

    /// Number of definitions, including `Contract`.
    pub fn len(&self) -> usize {
        self.definitions.len() + 1
    }

    /// Always false: a dictionary holds at least `Contract`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// All definitions, `Contract` first, then the rest in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        std::iter::once((CONTRACT_KEY, &self.contract))
            .chain(self.definitions.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

/// Parse and resolve a raw schema document.
///
/// # Errors
///
/// - [`SchemaError::InvalidJson`] if the text is not JSON.
/// - [`SchemaError::InvalidSchema`] if the JSON is not an object of
///   schema nodes.
/// - [`SchemaError::MissingContractKey`] if there is no `Contract` key.
/// - Any error from [`populate_references`].
pub fn build_schema_dictionary(raw_json: &str) -> Result<SchemaDictionary, SchemaError> {
    let document: Value = serde_json::from_str(raw_json).map_err(|e| {
        tracing::debug!(error = %e, "schema text is not JSON");
        SchemaError::InvalidJson
    })?;

    let Value::Object(map) = document else {
        return Err(SchemaError::InvalidSchema {
            reason: "schema document must be a JSON object".to_string(),
        });
    };

    if !map.contains_key(CONTRACT_KEY) {
        return Err(SchemaError::MissingContractKey);
    }

    {
        let mut seen: IndexMap<CiKey, &str> = IndexMap::with_capacity(map.len());
        for name in map.keys() {
            if let Some(first) = seen.insert(CiKey::new(name.as_str()), name.as_str()) {
                return Err(SchemaError::InvalidSchema {
                    reason: format!("definitions \"{first}\" and \"{name}\" differ only by case"),
                });
            }
        }
    }

    let definitions: Definitions =
        serde_json::from_value(Value::Object(map)).map_err(|e| {
            tracing::warn!(error = %e, "schema document has an invalid shape");
            SchemaError::InvalidSchema {
                reason: e.to_string(),
            }
        })?;

    let dictionary = populate_references(definitions)?;
    tracing::debug!(definitions = dictionary.len(), "built schema dictionary");
    Ok(dictionary)
}

/// Resolve every `$ref` in a set of raw definitions.
///
/// Pure: the input is not modified, the resolved copy is returned.
///
/// # Errors
///
/// Returns the first reference failure met while walking definitions in
/// document order, or [`SchemaError::InvalidContract`] if the resolved
/// `Contract` is not an object with at least one property.
pub fn populate_references(raw: Definitions) -> Result<SchemaDictionary, SchemaError> {
    let mut resolved = Definitions::with_capacity(raw.len());

    for (name, node) in &raw {
        let mut node = node.clone();
        let mut path = vec![name.clone()];
        resolve_node(&mut node, &raw, &mut path)?;
        resolved.insert(name.clone(), node);
    }

    let contract = resolved
        .shift_remove(&CiKey::new(CONTRACT_KEY))
        .ok_or(SchemaError::MissingContractKey)?;

    if contract.kind() != SchemaType::Object || contract.properties.is_empty() {
        return Err(SchemaError::InvalidContract);
    }

    Ok(SchemaDictionary {
        contract,
        definitions: resolved,
    })
}

/// Resolve one node and everything below it.
///
/// `path` holds the definitions currently being expanded, outermost first.
fn resolve_node(
    node: &mut SchemaNode,
    raw: &Definitions,
    path: &mut Vec<CiKey>,
) -> Result<(), SchemaError> {
    if node.schema_type.is_some() {
        return resolve_children(node, raw, path);
    }

    let Some(reference) = node.reference.as_deref() else {
        return Err(SchemaError::InvalidSchema {
            reason: "node declares neither a type nor a $ref".to_string(),
        });
    };

    let name = parse_reference_name(reference).ok_or_else(|| SchemaError::MalformedReference {
        reference: reference.to_string(),
    })?;
    let key = CiKey::new(name);

    let target = raw
        .get(&key)
        .ok_or_else(|| SchemaError::UnresolvedReference {
            name: name.to_string(),
        })?;

    if target.schema_type.is_none() {
        return Err(SchemaError::ChainedReference {
            name: name.to_string(),
        });
    }

    if path.contains(&key) {
        return Err(SchemaError::CyclicReference {
            name: name.to_string(),
        });
    }

    node.inherit_from(target);

    path.push(key);
    let result = resolve_children(node, raw, path);
    path.pop();
    result
}

fn resolve_children(
    node: &mut SchemaNode,
    raw: &Definitions,
    path: &mut Vec<CiKey>,
) -> Result<(), SchemaError> {
    for child in node.properties.values_mut() {
        resolve_node(child, raw, path)?;
    }
    if let Some(items) = node.items.as_deref_mut() {
        resolve_node(items, raw, path)?;
    }
    Ok(())
}
