//! # Contract Requirements
//!
//! Every registered contract must let messages be identified and ordered:
//! the `Contract` node defines an `Id` bound to the shared `Guid`
//! definition (or a `uuid`-formatted string) and a `Timestamp` string with
//! format `date-time`.

use creg_core::CiKey;

use crate::resolve::SchemaDictionary;

pub const MISSING_ID: &str =
    "Contract must define an \"Id\" property that references \"#/Guid\".";
pub const MISSING_TIMESTAMP: &str =
    "Contract must define a \"Timestamp\" property of type string with format date-time.";

/// Findings for a resolved contract; empty when it qualifies.
pub fn check_contract_requirements(dictionary: &SchemaDictionary) -> Vec<String> {
    let properties = &dictionary.contract().properties;
    let mut errors = Vec::new();

    let id_ok = properties
        .get(&CiKey::new("Id"))
        .is_some_and(|node| node.is_guid());
    if !id_ok {
        errors.push(MISSING_ID.to_string());
    }

    let timestamp_ok = properties
        .get(&CiKey::new("Timestamp"))
        .is_some_and(|node| node.is_date_time());
    if !timestamp_ok {
        errors.push(MISSING_TIMESTAMP.to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::build_schema_dictionary;
    use serde_json::{json, Value};

    fn check(value: Value) -> Vec<String> {
        check_contract_requirements(&build_schema_dictionary(&value.to_string()).unwrap())
    }

    #[test]
    fn qualifying_contract() {
        let errors = check(json!({
            "Contract": {
                "type": "object",
                "properties": {
                    "id": {"$ref": "#/Guid"},
                    "timestamp": {"type": "string", "format": "date-time"}
                }
            },
            "Guid": {"type": "string"}
        }));
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn uuid_format_counts_as_guid() {
        let errors = check(json!({
            "Contract": {
                "type": "object",
                "properties": {
                    "Id": {"type": "string", "format": "uuid"},
                    "Timestamp": {"$ref": "#/DateTime"}
                }
            },
            "DateTime": {"type": "string", "format": "date-time"}
        }));
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn reports_both_missing() {
        let errors = check(json!({
            "Contract": {
                "type": "object",
                "properties": {
                    "Id": {"type": "string"},
                    "Timestamp": {"type": "string"}
                }
            }
        }));
        assert_eq!(errors, [MISSING_ID, MISSING_TIMESTAMP]);
    }
}
