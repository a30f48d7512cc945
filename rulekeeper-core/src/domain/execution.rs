// rulekeeper-core/src/domain/execution.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

use crate::domain::nullable::null_as_default;
use crate::domain::rules::RuleId;

/// How many unexpected values a report shows per expectation.
pub const UNEXPECTED_VALUES_PREVIEW: usize = 10;

/// Report for one `POST /api/v1/rules/execute` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleExecutionResult {
    pub table_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub execution_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_duration: f64,
    pub total_rules: u32,
    pub successful_rules: u32,
    pub failed_rules: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub success_rate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<RuleRunReport>,
}

impl RuleExecutionResult {
    /// `successful_rules / total_rules`, zero for an empty run.
    pub fn computed_success_rate(&self) -> f64 {
        if self.total_rules == 0 {
            0.0
        } else {
            f64::from(self.successful_rules) / f64::from(self.total_rules)
        }
    }

    /// The ids this report covers.
    pub fn rule_ids(&self) -> Vec<RuleId> {
        self.results.iter().map(|r| r.rule_id).collect()
    }

    pub fn report_for(&self, rule_id: RuleId) -> Option<&RuleRunReport> {
        self.results.iter().find(|r| r.rule_id == rule_id)
    }

    /// Execution timestamp, accepting RFC 3339 or a naive ISO timestamp (read as UTC).
    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(&self.execution_time) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(&self.execution_time, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRunReport {
    pub rule_id: RuleId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rule_name: String,
    pub success: bool,
    #[serde(default)]
    pub statistics: Option<ExpectationStatistics>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<ExpectationOutcome>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub execution_time: f64,
}

impl RuleRunReport {
    pub fn failed_outcomes(&self) -> impl Iterator<Item = &ExpectationOutcome> {
        self.results.iter().filter(|o| !o.success)
    }

    pub fn has_sample_rows(&self) -> bool {
        self.results.iter().any(|o| !o.sample_rows.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpectationStatistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub evaluated_expectations: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub successful_expectations: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub unsuccessful_expectations: u32,
    #[serde(default)]
    pub total_rows: Option<u64>,
}

/// Outcome of one expectation inside a rule run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectationOutcome {
    #[serde(default, deserialize_with = "null_as_default")]
    pub expectation_type: String,
    pub success: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub result: FailureDetail,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sample_rows: Vec<Map<String, Value>>,
    #[serde(default)]
    pub kwargs: Option<Map<String, Value>>,
    /// Some backend versions report the column at the top level.
    #[serde(default)]
    pub column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FailureDetail {
    #[serde(default, deserialize_with = "null_as_default")]
    pub unexpected_values: Vec<Value>,
    #[serde(default)]
    pub element_count: Option<u64>,
    #[serde(default)]
    pub unexpected_count: Option<u64>,
    #[serde(default)]
    pub unexpected_percent: Option<f64>,
}

impl FailureDetail {
    /// First [`UNEXPECTED_VALUES_PREVIEW`] unexpected values.
    pub fn preview(&self) -> &[Value] {
        let end = self.unexpected_values.len().min(UNEXPECTED_VALUES_PREVIEW);
        &self.unexpected_values[..end]
    }

    /// Values left out of [`FailureDetail::preview`].
    pub fn hidden_count(&self) -> usize {
        self.unexpected_values
            .len()
            .saturating_sub(UNEXPECTED_VALUES_PREVIEW)
    }
}

static COLUMN_IN_TYPE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"expect_column_(.+)_to").ok());

/// Best-effort guess of the column an expectation outcome is about.
///
/// Display hint only, not a source of truth. Tries in order:
/// 1. `kwargs.column`
/// 2. the top-level `column` field
/// 3. the text between `expect_column_` and the last `_to` in the
///    expectation type (`expect_column_values_to_be_unique` gives `values`)
/// 4. the empty string
pub fn failing_column_of(outcome: &ExpectationOutcome) -> String {
    let from_kwargs = outcome
        .kwargs
        .as_ref()
        .and_then(|kwargs| kwargs.get("column"))
        .and_then(Value::as_str)
        .filter(|c| !c.is_empty());
    if let Some(column) = from_kwargs {
        return column.to_string();
    }

    if let Some(column) = outcome.column.as_deref().filter(|c| !c.is_empty()) {
        return column.to_string();
    }

    column_from_expectation_type(&outcome.expectation_type).unwrap_or_default()
}

/// Pattern fallback of [`failing_column_of`].
pub fn column_from_expectation_type(expectation_type: &str) -> Option<String> {
    COLUMN_IN_TYPE
        .as_ref()?
        .captures(expectation_type)?
        .get(1)
        .map(|m| m.as_str().to_string())
}
