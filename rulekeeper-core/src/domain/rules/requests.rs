// rulekeeper-core/src/domain/rules/requests.rs

use serde::{Deserialize, Serialize};

use super::rule::RuleId;
use crate::domain::nullable::null_as_default;

/// Body of `POST /api/v1/rules/generate-from-description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateFromDescriptionRequest {
    pub table_name: String,
    pub rule_description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
}

/// Body of `POST /api/v1/rules/execute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRulesRequest {
    pub table_name: String,
    pub rule_ids: Vec<RuleId>,
}

/// Answer of `GET /api/v1/rules/check-outdated/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutdatedCheck {
    pub is_outdated: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub confidence: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suggestion: String,
}
