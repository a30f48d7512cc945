// rulekeeper-core/src/domain/rules/rule.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::config::RuleConfig;
use crate::domain::nullable::null_as_default;

pub type RuleId = i64;

fn default_active() -> bool {
    true
}

/// A named, persisted group of expectations bound to one table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: RuleId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    pub table_name: String,
    pub rule_config: RuleConfig,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draft: Option<bool>,
    /// Denormalized union of the columns referenced by `rule_config`.
    /// Sent by the backend for display; may be missing or out of sync.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
}

impl Rule {
    pub fn is_draft(&self) -> bool {
        self.is_draft.unwrap_or(false)
    }

    pub fn is_compound(&self) -> bool {
        self.rule_config.is_compound()
    }

    /// Columns to show next to the rule: the stored list when the backend
    /// sent one, otherwise derived from the expectations.
    pub fn display_columns(&self) -> Vec<String> {
        match &self.columns {
            Some(columns) if !columns.is_empty() => columns.clone(),
            _ => derive_ordered(&self.rule_config),
        }
    }
}

/// Columns touched by a rule.
///
/// A compound rule contributes every `column` and `compare_to` of its
/// expectations; a single-expectation rule contributes its `column` only.
/// Expectations naming neither contribute nothing.
pub fn columns_of(rule: &Rule) -> BTreeSet<String> {
    if rule.rule_config.is_compound() {
        rule.rule_config
            .iter()
            .flat_map(|e| e.referenced_columns())
            .map(str::to_string)
            .collect()
    } else {
        rule.rule_config
            .first()
            .column()
            .map(str::to_string)
            .into_iter()
            .collect()
    }
}

/// Columns in selection order, as the edit form presents them.
///
/// For a compound rule the stored `columns` list wins when present, since
/// its order carries the lower-bound/upper-bound meaning of the comparison.
pub fn ordered_columns(rule: &Rule) -> Vec<String> {
    if rule.rule_config.is_compound() {
        match &rule.columns {
            Some(columns) if !columns.is_empty() => columns.clone(),
            _ => derive_ordered(&rule.rule_config),
        }
    } else {
        rule.rule_config
            .first()
            .column()
            .map(str::to_string)
            .into_iter()
            .collect()
    }
}

fn derive_ordered(config: &RuleConfig) -> Vec<String> {
    let mut seen = Vec::new();
    for column in config.iter().flat_map(|e| e.referenced_columns()) {
        if !seen.iter().any(|c: &String| c == column) {
            seen.push(column.to_string());
        }
    }
    seen
}

/// The backend lists every rule; the console shows one table at a time.
pub fn rules_for_table(rules: Vec<Rule>, table_name: &str) -> Vec<Rule> {
    rules
        .into_iter()
        .filter(|r| r.table_name == table_name)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule_from(config: serde_json::Value) -> Rule {
        serde_json::from_value(json!({
            "id": 7,
            "name": "r",
            "description": "",
            "table_name": "orders",
            "rule_config": config,
            "is_active": true
        }))
        .unwrap()
    }

    #[test]
    fn test_columns_of_single_expectation_is_its_column() {
        let rule = rule_from(json!({
            "expectation_type": "expect_column_values_to_not_be_null",
            "kwargs": {"column": "age"}
        }));
        assert_eq!(columns_of(&rule), BTreeSet::from(["age".to_string()]));
    }

    #[test]
    fn test_columns_of_single_ignores_compare_to() {
        let rule = rule_from(json!({
            "expectation_type": "expect_column_values_to_be_greater_than_other_column",
            "kwargs": {"column": "end_date", "compare_to": "start_date"}
        }));
        assert_eq!(columns_of(&rule), BTreeSet::from(["end_date".to_string()]));
    }

    #[test]
    fn test_columns_of_compound_is_union_of_column_and_compare_to() {
        let rule = rule_from(json!([
            {"expectation_type": "expect_column_values_to_not_be_null", "kwargs": {"column": "start_date"}},
            {"expectation_type": "expect_column_values_to_not_be_null", "kwargs": {"column": "end_date"}},
            {"expectation_type": "expect_column_values_to_be_greater_than_other_column",
             "kwargs": {"column": "end_date", "compare_to": "start_date"}},
            {"expectation_type": "expect_custom_check", "kwargs": {"compare_to": "shipped_at"}}
        ]));
        let expected: BTreeSet<String> = ["start_date", "end_date", "shipped_at"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(columns_of(&rule), expected);
    }

    #[test]
    fn test_columns_of_tolerates_expectations_without_columns() {
        let rule = rule_from(json!({
            "expectation_type": "expect_table_row_count_to_be_between",
            "kwargs": {"min_value": 1}
        }));
        assert!(columns_of(&rule).is_empty());

        let compound = rule_from(json!([
            {"expectation_type": "expect_table_row_count_to_be_between", "kwargs": {}},
            {"expectation_type": "expect_column_values_to_be_unique", "kwargs": {"column": "id"}}
        ]));
        assert_eq!(columns_of(&compound), BTreeSet::from(["id".to_string()]));
    }

    #[test]
    fn test_ordered_columns_prefers_stored_list_for_compound_rules() {
        let mut rule = rule_from(json!([
            {"expectation_type": "expect_column_values_to_not_be_null", "kwargs": {"column": "a"}},
            {"expectation_type": "expect_column_values_to_be_greater_than_other_column",
             "kwargs": {"column": "b", "compare_to": "a"}}
        ]));
        assert_eq!(ordered_columns(&rule), vec!["a", "b"]);

        rule.columns = Some(vec!["b".into(), "a".into()]);
        assert_eq!(ordered_columns(&rule), vec!["b", "a"]);
    }

    #[test]
    fn test_optional_fields_default() {
        let rule: Rule = serde_json::from_value(json!({
            "id": 1,
            "name": "n",
            "table_name": "orders",
            "rule_config": {"expectation_type": "expect_column_values_to_be_unique", "kwargs": {"column": "id"}}
        }))
        .unwrap();
        assert!(rule.is_active);
        assert!(!rule.is_draft());
        assert!(rule.columns.is_none());
        assert_eq!(rule.display_columns(), vec!["id"]);
    }

    #[test]
    fn test_rules_for_table_filters_by_table_name() {
        let mut other = rule_from(json!({
            "expectation_type": "expect_column_values_to_be_unique", "kwargs": {"column": "id"}
        }));
        other.table_name = "customers".into();
        let mine = rule_from(json!({
            "expectation_type": "expect_column_values_to_be_unique", "kwargs": {"column": "id"}
        }));

        let filtered = rules_for_table(vec![other, mine.clone()], "orders");
        assert_eq!(filtered, vec![mine]);
    }

    #[test]
    fn test_null_description_decodes_as_empty() {
        let rule: Rule = serde_json::from_value(json!({
            "id": 9,
            "name": "id unique",
            "description": null,
            "table_name": "orders",
            "rule_config": {"expectation_type": "expect_column_values_to_be_unique",
                            "kwargs": {"column": "id"}},
            "is_draft": null,
            "columns": null
        }))
        .unwrap();

        assert_eq!(rule.description, "");
        assert!(!rule.is_draft());
        assert_eq!(columns_of(&rule), BTreeSet::from(["id".to_string()]));
    }
}
