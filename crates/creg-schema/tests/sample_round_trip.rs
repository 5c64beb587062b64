//! Property test: a sample generated from a well-formed contract always
//! validates against that same contract.

use std::collections::BTreeMap;

use creg_schema::{
    build_schema_dictionary, MessageValidator, SampleGenerator, SampleOptions, TestOptions,
};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Property names whose lower-cased forms are all distinct.
fn property_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,6}"
}

fn leaf_node() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(json!({"type": "string"})),
        Just(json!({"type": "string", "format": "date-time"})),
        Just(json!({"$ref": "#/Guid"})),
        Just(json!({"$ref": "#/Code"})),
        Just(json!({"type": "string", "pattern": "^[a-z]{2,5}-[0-9]{1,3}$"})),
        Just(json!({"type": "integer"})),
        Just(json!({"type": "integer", "format": "int32"})),
        Just(json!({"type": "integer", "format": "int64"})),
        Just(json!({"type": "number"})),
        Just(json!({"type": "number", "format": "float"})),
        Just(json!({"type": "number", "format": "double"})),
        Just(json!({"type": "boolean"})),
    ]
}

fn bounds() -> impl Strategy<Value = (Option<usize>, Option<usize>)> {
    prop_oneof![
        Just((None::<usize>, None::<usize>)),
        (1..5usize).prop_map(|min| (Some(min), None)),
        (1..5usize).prop_map(|max| (None, Some(max))),
        (1..4usize, 0..4usize).prop_map(|(min, extra)| (Some(min), Some(min + extra))),
    ]
}

fn schema_node() -> impl Strategy<Value = Value> {
    leaf_node().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            (inner.clone(), bounds()).prop_map(|(items, (min, max))| {
                let mut node = json!({"type": "array", "items": items});
                if let Some(min) = min {
                    node["minItems"] = json!(min);
                }
                if let Some(max) = max {
                    node["maxItems"] = json!(max);
                }
                node
            }),
            prop::collection::btree_map(property_name(), inner, 1..4)
                .prop_map(|properties| json!({"type": "object", "properties": to_map(properties)})),
        ]
    })
}

fn to_map(properties: BTreeMap<String, Value>) -> Map<String, Value> {
    properties.into_iter().collect()
}

fn contract() -> impl Strategy<Value = String> {
    prop::collection::btree_map(property_name(), schema_node(), 1..6).prop_map(|properties| {
        json!({
            "Contract": {"type": "object", "properties": to_map(properties)},
            "Guid": {"type": "string", "pattern": "^[0-9a-f-]{36}$"},
            "Code": {"type": "string", "example": "X-1"}
        })
        .to_string()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn generated_samples_validate(schema in contract()) {
        let dict = build_schema_dictionary(&schema).unwrap();
        let sample = SampleGenerator::new(SampleOptions::default()).generate_contract(&dict);
        let result = MessageValidator::new(&dict, TestOptions::default())
            .validate(&sample.to_string());
        prop_assert!(result.is_valid, "sample {} failed: {:?}", sample, result.errors);
    }
}
