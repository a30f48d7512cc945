// rulekeeper-core/src/domain/rules/edit.rs

use serde::{Deserialize, Serialize};

use super::config::RuleConfig;
use super::expectation::Expectation;
use super::rule::{Rule, ordered_columns};
use crate::domain::error::DomainError;

/// Body of `PUT /api/v1/rules/{id}`. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateRuleRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_config: Option<RuleConfig>,
}

/// What the user typed in the edit dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleEditForm {
    pub name: String,
    pub description: String,
    pub is_active: bool,
    /// Selected columns, in selection order.
    pub columns: Vec<String>,
}

impl RuleEditForm {
    pub fn from_rule(rule: &Rule) -> Self {
        Self {
            name: rule.name.clone(),
            description: rule.description.clone(),
            is_active: rule.is_active,
            columns: ordered_columns(rule),
        }
    }
}

/// Expectations generated for a column selection.
///
/// - no column: no configuration change
/// - `[c]`: `c` is not null
/// - `[low, high]`: `low` not null, `high` not null, `high > low`
///
/// The first selected column is the lower bound. Wider selections are
/// rejected rather than silently truncated.
pub fn config_for_columns(columns: &[String]) -> Result<Option<RuleConfig>, DomainError> {
    match columns {
        [] => Ok(None),
        [only] => Ok(Some(RuleConfig::single(Expectation::not_null(only.as_str())))),
        [low, high] => RuleConfig::try_new(vec![
            Expectation::not_null(low.as_str()),
            Expectation::not_null(high.as_str()),
            Expectation::greater_than_column(high.as_str(), low.as_str()),
        ])
        .map(Some),
        _ => Err(DomainError::UnsupportedColumnSelection {
            count: columns.len(),
        }),
    }
}

/// Turns the edit form into an update request for `original`.
///
/// Name, description and active flag are always sent. A new `rule_config`
/// is only sent when the selected columns differ from the rule's current
/// ones; order counts, since swapping two columns flips the comparison.
pub fn build_update_request(
    form: &RuleEditForm,
    original: &Rule,
) -> Result<UpdateRuleRequest, DomainError> {
    let rule_config = if form.columns == ordered_columns(original) {
        None
    } else {
        config_for_columns(&form.columns)?
    };

    Ok(UpdateRuleRequest {
        name: Some(form.name.clone()),
        description: Some(form.description.clone()),
        is_active: Some(form.is_active),
        rule_config,
    })
}
