//! # Message Validation
//!
//! Checks a candidate JSON message against a resolved contract and reports
//! every finding as a fixed, human-readable sentence.
//!
//! ## Checks
//!
//! Each object level (the message root and every nested object) runs three
//! independent passes:
//!
//! 1. **Unknown properties**: every message key must exist in the contract.
//! 2. **Missing properties**: every contract key must exist in the message.
//!    Skipped entirely in allow-subset mode.
//! 3. **Types and formats**: every message key found in the contract is
//!    checked against its node, recursing into nested objects.
//!
//! All passes always run and all findings are collected; nothing
//! short-circuits except the pre-checks on the message text itself.
//! Names match case-insensitively throughout. Nested findings are qualified
//! with `outer-->inner` paths.
//!
//! ## Request Scope
//!
//! A [`MessageValidator`] borrows an immutable [`SchemaDictionary`] and
//! carries its [`TestOptions`] by value. Findings accumulate in a buffer
//! owned by each call, so one validator may be used from many threads.

use std::collections::HashSet;

use creg_core::{parse_date_time, parse_guid, CiKey};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::node::{Properties, SchemaFormat, SchemaNode, SchemaType};
use crate::resolve::{build_schema_dictionary, SchemaDictionary};

pub const INVALID_JSON: &str = "Message contains invalid JSON.";
pub const EMPTY_JSON: &str = "Message contains empty JSON.";

/// Per-request switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOptions {
    /// Accept messages that carry only some of the contract's properties.
    #[serde(default)]
    pub allow_subset: bool,
}

/// Outcome of validating one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result with no findings.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result carrying a single finding.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            errors: vec![error.into()],
        }
    }

    /// Valid exactly when no check reported anything.
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validates messages against one resolved contract.
#[derive(Debug, Clone, Copy)]
pub struct MessageValidator<'a> {
    dictionary: &'a SchemaDictionary,
    options: TestOptions,
}

impl<'a> MessageValidator<'a> {
    pub fn new(dictionary: &'a SchemaDictionary, options: TestOptions) -> Self {
        Self {
            dictionary,
            options,
        }
    }

    /// Validate raw message text.
    ///
    /// The text must be a JSON object with at least one property; otherwise
    /// the result carries only the corresponding pre-check finding.
    pub fn validate(&self, message: &str) -> ValidationResult {
        let map = match serde_json::from_str::<Value>(message) {
            Ok(Value::Object(map)) => map,
            _ => return ValidationResult::invalid(INVALID_JSON),
        };
        if map.is_empty() {
            return ValidationResult::invalid(EMPTY_JSON);
        }
        self.validate_object(&map)
    }

    /// Validate an already-parsed message object.
    pub fn validate_object(&self, message: &Map<String, Value>) -> ValidationResult {
        let mut errors = Vec::new();
        self.check_object(None, &self.dictionary.contract().properties, message, &mut errors);

        tracing::debug!(
            properties = message.len(),
            findings = errors.len(),
            "validated message"
        );
        ValidationResult::from_errors(errors)
    }

    /// Only the unknown-property pass, at every level.
    pub fn unknown_property_errors(&self, message: &Map<String, Value>) -> Vec<String> {
        let mut errors = Vec::new();
        let pass = Pass {
            unknown: true,
            missing: false,
            types: false,
        };
        self.run(None, &self.dictionary.contract().properties, message, pass, &mut errors);
        errors
    }

    /// Only the missing-property pass, at every level. Honors allow-subset.
    pub fn missing_property_errors(&self, message: &Map<String, Value>) -> Vec<String> {
        let mut errors = Vec::new();
        let pass = Pass {
            unknown: false,
            missing: !self.options.allow_subset,
            types: false,
        };
        self.run(None, &self.dictionary.contract().properties, message, pass, &mut errors);
        errors
    }

    /// Only the type/format pass. Message keys with no contract entry are
    /// reported here, since no unknown-property pass runs alongside.
    pub fn type_errors(&self, message: &Map<String, Value>) -> Vec<String> {
        let mut errors = Vec::new();
        let pass = Pass {
            unknown: false,
            missing: false,
            types: true,
        };
        self.run(None, &self.dictionary.contract().properties, message, pass, &mut errors);
        errors
    }

    fn check_object(
        &self,
        path: Option<&str>,
        properties: &Properties,
        message: &Map<String, Value>,
        errors: &mut Vec<String>,
    ) {
        let pass = Pass {
            unknown: true,
            missing: !self.options.allow_subset,
            types: true,
        };
        self.run(path, properties, message, pass, errors);
    }

    fn run(
        &self,
        path: Option<&str>,
        properties: &Properties,
        message: &Map<String, Value>,
        pass: Pass,
        errors: &mut Vec<String>,
    ) {
        if pass.unknown {
            for key in message.keys() {
                if !properties.contains_key(&CiKey::new(key.as_str())) {
                    errors.push(format!(
                        "Message property \"{}\" is not part of the contract.",
                        qualify(path, key)
                    ));
                }
            }
        }

        if pass.missing {
            let present: HashSet<CiKey> =
                message.keys().map(|k| CiKey::new(k.as_str())).collect();
            for key in properties.keys() {
                if present.contains(key) {
                    continue;
                }
                errors.push(match path {
                    None => format!("Message is missing expected property \"{key}\"."),
                    Some(_) => format!(
                        "The value for \"{}\" was not found in the message.",
                        qualify(path, key.as_str())
                    ),
                });
            }
        }

        for (key, value) in message {
            let qualified = qualify(path, key);
            match properties.get(&CiKey::new(key.as_str())) {
                Some(node) => self.check_value(&qualified, node, value, pass, errors),
                None if pass.types && !pass.unknown => errors.push(format!(
                    "The schema for \"{qualified}\" was not found in the contract definition."
                )),
                None => {}
            }
        }
    }

    /// Check one message value against its contract node.
    ///
    /// Objects recurse with the same passes; only the type pass inspects
    /// scalar and array values.
    fn check_value(
        &self,
        path: &str,
        node: &SchemaNode,
        value: &Value,
        pass: Pass,
        errors: &mut Vec<String>,
    ) {
        match node.kind() {
            SchemaType::Object => match value {
                Value::Object(inner) => self.run(Some(path), &node.properties, inner, pass, errors),
                _ if pass.types => {
                    errors.push(format!("The value for \"{path}\" is not a valid object."))
                }
                _ => {}
            },
            SchemaType::Array if pass.types => self.check_array(path, node, value, pass, errors),
            SchemaType::Array => {
                // Object elements still need their unknown/missing passes.
                if let (Some(items), Value::Array(elements)) = (node.items.as_deref(), value) {
                    if items.kind() == SchemaType::Object {
                        for (index, element) in elements.iter().enumerate() {
                            if let Value::Object(inner) = element {
                                let element_path = format!("{path}[{index}]");
                                self.run(Some(&element_path), &items.properties, inner, pass, errors);
                            }
                        }
                    }
                }
            }
            _ if pass.types => {
                if let Some(expected) = scalar_mismatch(node, value) {
                    errors.push(format!("The value for \"{path}\" is not a valid {expected}."));
                }
            }
            _ => {}
        }
    }

    fn check_array(
        &self,
        path: &str,
        node: &SchemaNode,
        value: &Value,
        pass: Pass,
        errors: &mut Vec<String>,
    ) {
        let Some(items) = node.items.as_deref() else {
            errors.push(format!(
                "The array \"{path}\" is missing required property (Items)."
            ));
            return;
        };

        let Value::Array(elements) = value else {
            errors.push(format!("The value for \"{path}\" is not a valid array."));
            return;
        };

        if let Some(min) = node.min_bound() {
            if elements.len() < min {
                errors.push(format!(
                    "The Items array for {path} does not have the minimum number ({min}) of items required."
                ));
            }
        }
        if let Some(max) = node.max_bound() {
            if elements.len() > max {
                errors.push(format!(
                    "The Items array for {path} exceeds the maximum number ({max}) of items allowed."
                ));
            }
        }

        if items.kind() == SchemaType::Object {
            for (index, element) in elements.iter().enumerate() {
                let Value::Object(inner) = element else {
                    errors.push(item_error(path, "object"));
                    return;
                };
                let element_path = format!("{path}[{index}]");
                self.run(Some(&element_path), &items.properties, inner, pass, errors);
            }
            return;
        }

        // First failing element wins; the rest of the array is not examined.
        if let Some(expected) = elements.iter().find_map(|e| scalar_mismatch(items, e)) {
            errors.push(item_error(path, &expected));
        }
    }
}

/// Which passes a walk performs.
#[derive(Debug, Clone, Copy)]
struct Pass {
    unknown: bool,
    missing: bool,
    types: bool,
}

/// Parse a schema and validate a message against it in one step.
///
/// A broken schema yields a single contract-level finding and the message
/// is not examined.
pub fn test_message(schema_json: &str, message: &str, options: TestOptions) -> ValidationResult {
    match build_schema_dictionary(schema_json) {
        Ok(dictionary) => MessageValidator::new(&dictionary, options).validate(message),
        Err(e) => {
            tracing::debug!(error = %e, "contract rejected before message checks");
            ValidationResult::invalid(e.to_string())
        }
    }
}

fn qualify(path: Option<&str>, key: &str) -> String {
    match path {
        Some(outer) => format!("{outer}-->{key}"),
        None => key.to_string(),
    }
}

fn item_error(path: &str, expected: &str) -> String {
    format!("The Items array for {path} contains an item that is not a valid {expected}.")
}

/// Textual form of a scalar message value, as the type checks read it.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Describe what `value` should have been if it does not satisfy `node`'s
/// type and format, or `None` if it does.
fn scalar_mismatch(node: &SchemaNode, value: &Value) -> Option<String> {
    let text = scalar_text(value);
    let text = text.as_deref().map(str::trim);

    match node.kind() {
        SchemaType::Integer => {
            let wide = text.and_then(|t| t.parse::<i64>().ok());
            match (wide, &node.format) {
                (None, Some(SchemaFormat::Int64)) => Some("int64 integer".to_string()),
                (None, _) => Some("integer".to_string()),
                (Some(n), Some(SchemaFormat::Int32)) if i32::try_from(n).is_err() => {
                    Some("int32 integer".to_string())
                }
                _ => None,
            }
        }
        SchemaType::Number => {
            let wide = text
                .and_then(|t| t.parse::<f64>().ok())
                .filter(|n| n.is_finite());
            match (wide, &node.format) {
                (None, Some(SchemaFormat::Double)) => Some("double number".to_string()),
                (None, _) => Some("number".to_string()),
                (Some(_), Some(SchemaFormat::Float)) => text
                    .and_then(|t| t.parse::<f32>().ok())
                    .filter(|n| n.is_finite())
                    .is_none()
                    .then(|| "float number".to_string()),
                _ => None,
            }
        }
        SchemaType::String => {
            if node.is_date_time() {
                text.and_then(|t| parse_date_time(t).ok())
                    .is_none()
                    .then(|| "date-time".to_string())
            } else if node.is_guid() {
                text.and_then(|t| parse_guid(t).ok())
                    .is_none()
                    .then(|| "Guid".to_string())
            } else {
                None
            }
        }
        SchemaType::Boolean => {
            let ok = match value {
                Value::Bool(_) => true,
                Value::String(s) => {
                    let s = s.trim();
                    s.eq_ignore_ascii_case("true") || s.eq_ignore_ascii_case("false")
                }
                _ => false,
            };
            (!ok).then(|| "boolean".to_string())
        }
        SchemaType::Array => (!value.is_array()).then(|| "array".to_string()),
        SchemaType::Object => (!value.is_object()).then(|| "object".to_string()),
    }
}
