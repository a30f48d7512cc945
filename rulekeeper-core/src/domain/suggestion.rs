// rulekeeper-core/src/domain/suggestion.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::nullable::null_as_default;
use crate::domain::rules::{Rule, RuleConfig, RuleId};

/// A proposed configuration. Some backends pre-serialize it to a JSON string,
/// others send the structure itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigPayload {
    Text(String),
    Structured(Value),
}

impl ConfigPayload {
    /// Text as sent, structures pretty-printed.
    pub fn render(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Structured(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }

    /// Structured value, decoding the text form when it holds JSON.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            Self::Text(text) => serde_json::from_str(text).ok(),
            Self::Structured(value) => Some(value.clone()),
        }
    }

    /// Typed rule configuration, when the payload is one.
    pub fn to_rule_config(&self) -> Option<RuleConfig> {
        self.to_value()
            .and_then(|value| serde_json::from_value(value).ok())
    }
}

impl Default for ConfigPayload {
    fn default() -> Self {
        Self::Structured(Value::Null)
    }
}

/// A new rule the backend proposes. It has no id yet; it is selected by its
/// position in [`SuggestRulesResponse::new_rule_suggestions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedRule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub rule_type: String,
    #[serde(default)]
    pub column: Option<String>,
    #[serde(default)]
    pub columns: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub rule_config: ConfigPayload,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
}

impl SuggestedRule {
    /// `columns` when non-empty, else `column`.
    pub fn target_columns(&self) -> Vec<String> {
        match (&self.columns, &self.column) {
            (Some(columns), _) if !columns.is_empty() => columns.clone(),
            (_, Some(column)) => vec![column.clone()],
            _ => vec![],
        }
    }
}

/// A proposed change to an existing rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleUpdateSuggestion {
    pub rule_id: RuleId,
    #[serde(default)]
    pub current_config: ConfigPayload,
    #[serde(default)]
    pub suggested_config: ConfigPayload,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reason: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
}

/// Answer of `GET /api/v1/tables/{table}/suggest-rules`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SuggestRulesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub table_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_rule_suggestions: Vec<SuggestedRule>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rule_update_suggestions: Vec<RuleUpdateSuggestion>,
}

impl SuggestRulesResponse {
    pub fn is_empty(&self) -> bool {
        self.new_rule_suggestions.is_empty() && self.rule_update_suggestions.is_empty()
    }

    pub fn has_update_for(&self, rule_id: RuleId) -> bool {
        self.rule_update_suggestions
            .iter()
            .any(|s| s.rule_id == rule_id)
    }
}

/// Body of `POST /api/v1/tables/{table}/apply-suggested-rules`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplySuggestedRulesRequest {
    pub table_name: String,
    /// Indexes into `new_rule_suggestions`.
    pub new_rule_ids: Vec<usize>,
    pub update_rule_ids: Vec<RuleId>,
}

/// Per-item outcome of applying suggestions. A non-empty `errors` list next
/// to created or updated rules is a normal, partially successful answer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApplySuggestedRulesResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_rules: Vec<Rule>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub updated_rules: Vec<Rule>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<String>,
}

impl ApplySuggestedRulesResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        self.has_errors() && !(self.created_rules.is_empty() && self.updated_rules.is_empty())
    }

    pub fn changed_rules(&self) -> impl Iterator<Item = &Rule> {
        self.created_rules.iter().chain(self.updated_rules.iter())
    }
}
