//! # Contract Version Testing
//!
//! Validation of a message against a stored contract version, layering the
//! version's deprecation date over the schema checks:
//!
//! - deprecated on or before `now`: the message is refused outright;
//! - deprecated in the future: normal validation plus a warning.

use chrono::{DateTime, Utc};
use creg_core::Timestamp;
use serde::{Deserialize, Serialize};

use crate::validate::{test_message, TestOptions, ValidationResult};

/// A contract version as held by the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractVersion {
    /// Raw schema document.
    pub schema: String,
    #[serde(default)]
    pub deprecation_date: Option<DateTime<Utc>>,
}

/// Validation result plus any non-blocking notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestOutcome {
    #[serde(flatten)]
    pub result: ValidationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Test a message against a contract version as of `now`.
pub fn test_contract_version(
    version: &ContractVersion,
    message: &str,
    options: TestOptions,
    now: DateTime<Utc>,
) -> TestOutcome {
    match version.deprecation_date {
        Some(date) if date <= now => {
            tracing::debug!(deprecated_on = %date, "refusing message for deprecated contract");
            TestOutcome {
                result: ValidationResult::invalid(format!(
                    "This contract version was deprecated on {} and can no longer be used.",
                    Timestamp::from_utc(date).to_date()
                )),
                warning: None,
            }
        }
        Some(date) => TestOutcome {
            result: test_message(&version.schema, message, options),
            warning: Some(format!(
                "This contract version will be deprecated on {}.",
                Timestamp::from_utc(date).to_date()
            )),
        },
        None => TestOutcome {
            result: test_message(&version.schema, message, options),
            warning: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn version(deprecation_date: Option<DateTime<Utc>>) -> ContractVersion {
        ContractVersion {
            schema: json!({
                "Contract": {"type": "object", "properties": {"Name": {"type": "string"}}}
            })
            .to_string(),
            deprecation_date,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn no_deprecation() {
        let outcome =
            test_contract_version(&version(None), r#"{"Name":"a"}"#, TestOptions::default(), now());
        assert!(outcome.result.is_valid);
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn past_deprecation_refuses() {
        let outcome = test_contract_version(
            &version(Some(now() - Duration::days(1))),
            r#"{"Name":"a"}"#,
            TestOptions::default(),
            now(),
        );
        assert_eq!(
            outcome.result,
            ValidationResult::invalid(
                "This contract version was deprecated on 2026-02-28 and can no longer be used."
            )
        );
    }

    #[test]
    fn future_deprecation_warns_alongside_results() {
        let outcome = test_contract_version(
            &version(Some(now() + Duration::days(10))),
            r#"{"Nickname":"a"}"#,
            TestOptions::default(),
            now(),
        );
        assert!(!outcome.result.is_valid);
        assert_eq!(outcome.result.errors.len(), 2);
        assert_eq!(
            outcome.warning.as_deref(),
            Some("This contract version will be deprecated on 2026-03-11.")
        );
    }

    #[test]
    fn outcome_serializes_flat() {
        let outcome = TestOutcome {
            result: ValidationResult::valid(),
            warning: Some("soon".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"isValid": true, "errors": [], "warning": "soon"})
        );
    }
}
