// rulekeeper-core/src/domain/analysis.rs

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::domain::catalog::{Column, ForeignKey};
use crate::domain::nullable::null_as_default;
use crate::domain::rules::Rule;
use crate::domain::suggestion::{ApplySuggestedRulesResponse, SuggestRulesResponse};

/// Body of `POST /api/v1/analyze-table`. The same request either only
/// analyzes or also applies the resulting suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeTableRequest {
    pub table_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub apply_suggestions: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnAnalysis {
    #[serde(default, deserialize_with = "null_as_default")]
    pub columns: Vec<Column>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub primary_keys: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColumnStatistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub null_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub non_null_count: u64,
    // Only reported for ordered types.
    #[serde(default)]
    pub min_value: Option<Value>,
    #[serde(default)]
    pub max_value: Option<Value>,
    #[serde(default)]
    pub avg_value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataStatistics {
    #[serde(default, deserialize_with = "null_as_default")]
    pub row_count: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_stats: BTreeMap<String, ColumnStatistics>,
}

impl DataStatistics {
    /// Share of null values in `column`, in percent. `None` for an empty
    /// table or a column without statistics.
    pub fn null_percent(&self, column: &str) -> Option<f64> {
        if self.row_count == 0 {
            return None;
        }
        self.column_stats
            .get(column)
            .map(|stats| stats.null_count as f64 / self.row_count as f64 * 100.0)
    }
}

/// Answer of `POST /api/v1/analyze-table`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableAnalysis {
    pub table_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub column_analysis: ColumnAnalysis,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data_statistics: DataStatistics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sample_data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub rule_suggestions: Option<SuggestRulesResponse>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_rules: Vec<Rule>,
    /// Only set when the request asked for suggestions to be applied.
    #[serde(default)]
    pub applied_suggestions: Option<ApplySuggestedRulesResponse>,
}

impl TableAnalysis {
    /// Rules changed by the request, so the rule list must be reloaded.
    pub fn requires_rule_refresh(&self) -> bool {
        self.applied_suggestions.is_some()
    }

    pub fn stats_for(&self, column: &str) -> Option<&ColumnStatistics> {
        self.data_statistics.column_stats.get(column)
    }
}
