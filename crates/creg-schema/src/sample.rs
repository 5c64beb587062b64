//! # Sample Data Generation
//!
//! Synthesizes a representative message from a resolved contract.
//!
//! Per node, in priority order:
//!
//! 1. An author-supplied `example` (own, or inherited from the referenced
//!    definition during resolution), normalized to the node's type.
//! 2. Objects: one generated value per property, in declared order.
//! 3. Synthesized values by type and format. Strings bound to `Guid` get a
//!    fresh UUID; strings with a `pattern` get a random match of it.
//!
//! Generation never fails. A pattern that cannot be compiled yields the
//! placeholder string [`INVALID_PATTERN`] so a partially broken contract
//! still produces something to look at. A valid pattern the generator
//! cannot synthesize from yields the plain default string instead.

use creg_core::{Guid, Timestamp};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{PatternError, SchemaError};
use crate::node::{SchemaFormat, SchemaNode, SchemaType};
use crate::resolve::{build_schema_dictionary, SchemaDictionary};

/// Value emitted in place of a string whose pattern is malformed.
pub const INVALID_PATTERN: &str = "Invalid pattern";

const DEFAULT_STRING: &str = "String text";

/// Tunables for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct SampleOptions {
    /// Element count for arrays without consistent bounds.
    pub array_length: usize,
    /// Cap on unbounded repetitions (`*`, `+`, `{n,}`) in patterns.
    pub max_repeat: u32,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            array_length: 3,
            max_repeat: 10,
        }
    }
}

/// Produces sample values from resolved schema nodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleGenerator {
    options: SampleOptions,
}

impl SampleGenerator {
    pub fn new(options: SampleOptions) -> Self {
        Self { options }
    }

    /// A sample message for the dictionary's `Contract`.
    pub fn generate_contract(&self, dictionary: &SchemaDictionary) -> Value {
        self.generate(dictionary.contract())
    }

    /// A sample value for one node.
    pub fn generate(&self, node: &SchemaNode) -> Value {
        if let Some(example) = &node.example {
            return self.format_example(node, example);
        }

        match node.kind() {
            SchemaType::Object => Value::Object(
                node.properties
                    .iter()
                    .map(|(name, child)| (name.as_str().to_string(), self.generate(child)))
                    .collect::<Map<String, Value>>(),
            ),
            SchemaType::Integer => match node.format {
                Some(SchemaFormat::Int32) => json!(5),
                Some(SchemaFormat::Int64) => json!(2_147_483_650_i64),
                _ => json!(30),
            },
            SchemaType::Number => match node.format {
                Some(SchemaFormat::Float) => json!(10.50),
                Some(SchemaFormat::Double) => json!(123_456_789_012.345_67),
                _ => json!(5.5),
            },
            SchemaType::Boolean => Value::Bool(true),
            SchemaType::String => self.generate_string(node),
            SchemaType::Array => match node.items.as_deref() {
                Some(items) => Value::Array(
                    (0..self.array_length(node))
                        .map(|_| self.generate(items))
                        .collect(),
                ),
                None => Value::Array(Vec::new()),
            },
        }
    }

    fn generate_string(&self, node: &SchemaNode) -> Value {
        if node.is_date_time() {
            return Value::String(Timestamp::now().to_sortable());
        }
        if node.is_guid() {
            return Value::String(Guid::new().to_string());
        }
        match node.pattern.as_deref() {
            Some(pattern) => match synthesize_from_pattern(pattern, self.options.max_repeat) {
                Ok(text) => Value::String(text),
                Err(e @ PatternError::Malformed(_)) => {
                    tracing::warn!(pattern, error = %e, "malformed pattern; emitting placeholder");
                    Value::String(INVALID_PATTERN.to_string())
                }
                Err(e @ PatternError::Unsupported(_)) => {
                    tracing::warn!(pattern, error = %e, "cannot synthesize from pattern; emitting default text");
                    Value::String(DEFAULT_STRING.to_string())
                }
            },
            None => Value::String(DEFAULT_STRING.to_string()),
        }
    }

    /// Normalize an author-supplied example to the node's type: strings
    /// are quoted, date-times re-rendered in UTC, scalars given for an
    /// array wrapped in one.
    fn format_example(&self, node: &SchemaNode, example: &Value) -> Value {
        match node.kind() {
            SchemaType::Array => match example {
                Value::Array(_) => example.clone(),
                Value::String(s) => match serde_json::from_str::<Value>(s) {
                    Ok(parsed @ Value::Array(_)) => parsed,
                    _ => Value::Array(vec![example.clone()]),
                },
                other => Value::Array(vec![other.clone()]),
            },
            SchemaType::String => {
                let text = match example {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                if node.is_date_time() {
                    if let Ok(ts) = Timestamp::parse(&text) {
                        return Value::String(ts.to_iso8601());
                    }
                }
                Value::String(text)
            }
            _ => example.clone(),
        }
    }

    /// How many elements to emit for an array node.
    ///
    /// With both bounds set and `min <= max` this is `max - min`, held
    /// inside the bounds so the sample still satisfies them. Otherwise the
    /// configured default, pulled inside whichever single bound exists.
    fn array_length(&self, node: &SchemaNode) -> usize {
        let default = self.options.array_length;
        match (node.min_bound(), node.max_bound()) {
            (Some(min), Some(max)) if min <= max => (max - min).clamp(min, max),
            (Some(min), None) => default.max(min),
            (None, Some(max)) => default.min(max),
            _ => default,
        }
    }
}

/// Generate a random string matching `pattern`.
///
/// Leading `^` and trailing `$` anchors and word boundaries (`\b`, `\B`)
/// are dropped before synthesis; they match no characters.
///
/// # Errors
///
/// - [`PatternError::Malformed`] if `regex` rejects the pattern.
/// - [`PatternError::Unsupported`] if the pattern is valid but still holds
///   constructs the generator cannot produce text for (for example an
///   anchor in the middle).
pub fn synthesize_from_pattern(pattern: &str, max_repeat: u32) -> Result<String, PatternError> {
    regex::Regex::new(pattern).map_err(|e| PatternError::Malformed(e.to_string()))?;
    let body = strip_word_boundaries(strip_anchors(pattern));
    let generator = rand_regex::Regex::compile(&body, max_repeat)
        .map_err(|e| PatternError::Unsupported(e.to_string()))?;
    Ok(rand::thread_rng().sample(&generator))
}

/// Remove `\b` and `\B` outside character classes.
fn strip_word_boundaries(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut class_depth = 0usize;
    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('b' | 'B') if class_depth == 0 => {}
                Some(next) => {
                    out.push(c);
                    out.push(next);
                }
                None => out.push(c),
            },
            '[' => {
                class_depth += 1;
                out.push(c);
            }
            ']' => {
                class_depth = class_depth.saturating_sub(1);
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

fn strip_anchors(pattern: &str) -> &str {
    let body = pattern.strip_prefix('^').unwrap_or(pattern);
    match body.strip_suffix('$') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => body,
    }
}

/// Parse a schema and render a pretty-printed sample message for it.
///
/// # Errors
///
/// Returns the [`SchemaError`] if the schema itself cannot be resolved;
/// node-level generation never fails.
pub fn generate_sample(schema_json: &str, options: SampleOptions) -> Result<String, SchemaError> {
    let dictionary = build_schema_dictionary(schema_json)?;
    let sample = SampleGenerator::new(options).generate_contract(&dictionary);
    Ok(format!("{sample:#}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use creg_core::parse_guid;
    use serde_json::json;

    fn node(value: Value) -> SchemaNode {
        serde_json::from_value(value).unwrap()
    }

    fn generate(value: Value) -> Value {
        SampleGenerator::default().generate(&node(value))
    }

    #[test]
    fn integer_defaults() {
        assert_eq!(generate(json!({"type": "integer"})), json!(30));
        assert_eq!(generate(json!({"type": "integer", "format": "int32"})), json!(5));
        assert_eq!(
            generate(json!({"type": "integer", "format": "int64"})),
            json!(2_147_483_650_i64)
        );
    }

    #[test]
    fn number_defaults() {
        assert_eq!(generate(json!({"type": "number"})), json!(5.5));
        assert_eq!(generate(json!({"type": "number", "format": "float"})), json!(10.5));
        assert_eq!(
            generate(json!({"type": "number", "format": "double"})),
            json!(123_456_789_012.345_67)
        );
    }

    #[test]
    fn string_defaults() {
        assert_eq!(generate(json!({"type": "string"})), json!("String text"));

        let stamp = generate(json!({"type": "string", "format": "date-time"}));
        assert!(Timestamp::parse(stamp.as_str().unwrap()).is_ok());

        let guid = generate(json!({"type": "string", "format": "uuid"}));
        assert!(parse_guid(guid.as_str().unwrap()).is_ok());
    }

    #[test]
    fn pattern_driven_string_matches() {
        let value = generate(json!({"type": "string", "pattern": "^[A-Z]{3}-[0-9]{4}$"}));
        let text = value.as_str().unwrap();
        let re = regex::Regex::new("^[A-Z]{3}-[0-9]{4}$").unwrap();
        assert!(re.is_match(text), "{text:?} does not match");
    }

    #[test]
    fn invalid_pattern_yields_placeholder() {
        assert_eq!(
            generate(json!({"type": "string", "pattern": "([a-z"})),
            json!("Invalid pattern")
        );
    }

    #[test]
    fn word_boundaries_are_not_invalid() {
        assert_eq!(
            generate(json!({"type": "string", "pattern": "^\\bab\\b$"})),
            json!("ab")
        );
        assert_eq!(strip_word_boundaries("\\bx\\B[\\b]\\\\b"), "x[\\b]\\\\b");
    }

    #[test]
    fn unsupported_pattern_falls_back_to_default_text() {
        assert!(matches!(
            synthesize_from_pattern("a^b", 10),
            Err(PatternError::Unsupported(_))
        ));
        assert!(matches!(
            synthesize_from_pattern("([a-z", 10),
            Err(PatternError::Malformed(_))
        ));
        assert_eq!(
            generate(json!({"type": "string", "pattern": "a^b"})),
            json!(DEFAULT_STRING)
        );
    }

    #[test]
    fn escaped_dollar_is_kept() {
        assert_eq!(strip_anchors("^price\\$"), "price\\$");
        assert_eq!(strip_anchors("^abc$"), "abc");
        assert_eq!(strip_anchors("abc"), "abc");
    }

    #[test]
    fn examples_take_priority() {
        assert_eq!(
            generate(json!({"type": "integer", "example": 42})),
            json!(42)
        );
        assert_eq!(
            generate(json!({"type": "string", "example": 42})),
            json!("42")
        );
        assert_eq!(
            generate(json!({"type": "string", "format": "date-time", "example": "2019-07-23T10:11:12+02:00"})),
            json!("2019-07-23T08:11:12Z")
        );
    }

    #[test]
    fn array_examples_are_bracketed() {
        assert_eq!(
            generate(json!({"type": "array", "items": {"type": "string"}, "example": "a"})),
            json!(["a"])
        );
        assert_eq!(
            generate(json!({"type": "array", "items": {"type": "integer"}, "example": "[1, 2]"})),
            json!([1, 2])
        );
        assert_eq!(
            generate(json!({"type": "array", "items": {"type": "integer"}, "example": [7]})),
            json!([7])
        );
    }

    #[test]
    fn array_lengths() {
        let len = |v: Value| generate(v).as_array().map(Vec::len).unwrap();
        assert_eq!(len(json!({"type": "array", "items": {"type": "integer"}})), 3);
        assert_eq!(
            len(json!({"type": "array", "minItems": 1, "maxItems": 6, "items": {"type": "integer"}})),
            5
        );
        assert_eq!(
            len(json!({"type": "array", "minItems": 4, "maxItems": 5, "items": {"type": "integer"}})),
            4
        );
        assert_eq!(
            len(json!({"type": "array", "minItems": 5, "items": {"type": "integer"}})),
            5
        );
        assert_eq!(
            len(json!({"type": "array", "maxItems": 2, "items": {"type": "integer"}})),
            2
        );
        assert_eq!(len(json!({"type": "array"})), 0);
    }

    #[test]
    fn objects_keep_declared_order() {
        let value = generate(json!({
            "type": "object",
            "properties": {
                "Zeta": {"type": "boolean"},
                "Alpha": {"type": "object", "properties": {"Inner": {"type": "integer"}}}
            }
        }));
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["Zeta", "Alpha"]);
        assert_eq!(value["Alpha"]["Inner"], json!(30));
        assert_eq!(value["Zeta"], json!(true));
    }

    #[test]
    fn referenced_example_is_used() {
        let rendered = generate_sample(
            &json!({
                "Contract": {
                    "type": "object",
                    "properties": {"Code": {"$ref": "#/Code"}}
                },
                "Code": {"type": "string", "pattern": "^[0-9]+$", "example": "0042"}
            })
            .to_string(),
            SampleOptions::default(),
        )
        .unwrap();
        let value: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value, json!({"Code": "0042"}));
    }

    #[test]
    fn broken_schema_is_reported() {
        assert_eq!(
            generate_sample("nope", SampleOptions::default()).unwrap_err(),
            SchemaError::InvalidJson
        );
    }
}
