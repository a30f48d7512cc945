// rulekeeper-core/src/application/testing.rs
//
// In-memory backend shared by the application-layer unit tests.

#![allow(clippy::unwrap_used)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::analysis::{AnalyzeTableRequest, TableAnalysis};
use crate::domain::catalog::{Column, ConnectionStatus, TableSchema};
use crate::domain::execution::{RuleExecutionResult, RuleRunReport};
use crate::domain::rules::{
    Expectation, ExecuteRulesRequest, GenerateFromDescriptionRequest, OutdatedCheck, Rule,
    RuleConfig, RuleId, UpdateRuleRequest,
};
use crate::domain::suggestion::{
    ApplySuggestedRulesRequest, ApplySuggestedRulesResponse, SuggestRulesResponse,
};
use crate::error::RulekeeperError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::backend::QualityBackend;

pub(crate) fn not_null_rule(id: RuleId, table: &str, column: &str) -> Rule {
    Rule {
        id,
        name: format!("{} not null", column),
        description: String::new(),
        table_name: table.to_string(),
        rule_config: RuleConfig::single(Expectation::not_null(column)),
        is_active: true,
        is_draft: None,
        columns: Some(vec![column.to_string()]),
    }
}

// --- MOCK BACKEND ---
#[derive(Default)]
pub(crate) struct MockBackend {
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
    failure: Option<(u16, String)>,
    tables: Vec<String>,
    rules: Vec<Rule>,
    suggestions: Option<SuggestRulesResponse>,
    apply_response: Option<ApplySuggestedRulesResponse>,
    analysis: Option<TableAnalysis>,
    pub updates: Mutex<Vec<(RuleId, UpdateRuleRequest)>>,
    pub executed: Mutex<Vec<ExecuteRulesRequest>>,
    pub applied: Mutex<Vec<ApplySuggestedRulesRequest>>,
    pub analyzed: Mutex<Vec<AnalyzeTableRequest>>,
    pub deleted: Mutex<Vec<RuleId>>,
}

#[allow(dead_code)]
impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tables(mut self, tables: &[&str]) -> Self {
        self.tables = tables.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_suggestions(mut self, suggestions: SuggestRulesResponse) -> Self {
        self.suggestions = Some(suggestions);
        self
    }

    pub fn with_apply_response(mut self, response: ApplySuggestedRulesResponse) -> Self {
        self.apply_response = Some(response);
        self
    }

    pub fn with_analysis(mut self, analysis: TableAnalysis) -> Self {
        self.analysis = Some(analysis);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every call fails with this status and `detail`.
    pub fn failing(mut self, status: u16, detail: &str) -> Self {
        self.failure = Some((status, detail.to_string()));
        self
    }

    pub fn calls_to(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == name).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    async fn record(&self, name: &str) -> Result<(), RulekeeperError> {
        self.calls.lock().unwrap().push(name.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some((status, detail)) => Err(InfrastructureError::Status {
                status: *status,
                detail: Some(detail.clone()),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn find_rule(&self, rule_id: RuleId) -> Result<Rule, RulekeeperError> {
        self.rules
            .iter()
            .find(|r| r.id == rule_id)
            .cloned()
            .ok_or_else(|| {
                InfrastructureError::Status {
                    status: 404,
                    detail: Some(format!("Rule {} not found", rule_id)),
                }
                .into()
            })
    }
}

#[async_trait]
impl QualityBackend for MockBackend {
    async fn connect(&self) -> Result<ConnectionStatus, RulekeeperError> {
        self.record("connect").await?;
        Ok(ConnectionStatus {
            status: "connected".into(),
            message: "Successfully connected to database".into(),
            database_url: "postgresql://localhost:5432/shop".into(),
            tables: self.tables.clone(),
        })
    }

    async fn list_tables(&self) -> Result<Vec<String>, RulekeeperError> {
        self.record("list_tables").await?;
        Ok(self.tables.clone())
    }

    async fn table_schema(&self, table_name: &str) -> Result<TableSchema, RulekeeperError> {
        self.record("table_schema").await?;
        Ok(TableSchema {
            table_name: table_name.to_string(),
            columns: vec![Column {
                column_name: "id".into(),
                data_type: "integer".into(),
                is_nullable: false,
                column_default: None,
                character_maximum_length: None,
            }],
            primary_keys: vec!["id".into()],
            foreign_keys: vec![],
        })
    }

    async fn list_rules(&self) -> Result<Vec<Rule>, RulekeeperError> {
        self.record("list_rules").await?;
        Ok(self.rules.clone())
    }

    async fn get_rule(&self, rule_id: RuleId) -> Result<Rule, RulekeeperError> {
        self.record("get_rule").await?;
        self.find_rule(rule_id)
    }

    async fn generate_rules(&self, table_name: &str) -> Result<Vec<Rule>, RulekeeperError> {
        self.record("generate_rules").await?;
        Ok(vec![not_null_rule(100, table_name, "id")])
    }

    async fn generate_rule_from_description(
        &self,
        request: &GenerateFromDescriptionRequest,
    ) -> Result<Rule, RulekeeperError> {
        self.record("generate_rule_from_description").await?;
        let mut rule = not_null_rule(101, &request.table_name, "id");
        rule.description = request.rule_description.clone();
        if let Some(name) = &request.rule_name {
            rule.name = name.clone();
        }
        Ok(rule)
    }

    async fn update_rule(
        &self,
        rule_id: RuleId,
        request: &UpdateRuleRequest,
    ) -> Result<Rule, RulekeeperError> {
        self.record("update_rule").await?;
        let mut rule = self.find_rule(rule_id)?;
        if let Some(name) = &request.name {
            rule.name = name.clone();
        }
        if let Some(description) = &request.description {
            rule.description = description.clone();
        }
        if let Some(is_active) = request.is_active {
            rule.is_active = is_active;
        }
        if let Some(config) = &request.rule_config {
            rule.rule_config = config.clone();
            rule.columns = None;
        }
        self.updates.lock().unwrap().push((rule_id, request.clone()));
        Ok(rule)
    }

    async fn delete_rule(&self, rule_id: RuleId) -> Result<(), RulekeeperError> {
        self.record("delete_rule").await?;
        self.deleted.lock().unwrap().push(rule_id);
        Ok(())
    }

    async fn execute_rules(
        &self,
        request: &ExecuteRulesRequest,
    ) -> Result<RuleExecutionResult, RulekeeperError> {
        self.record("execute_rules").await?;
        self.executed.lock().unwrap().push(request.clone());
        let total = request.rule_ids.len() as u32;
        Ok(RuleExecutionResult {
            table_name: request.table_name.clone(),
            execution_time: "2026-01-15T10:30:00".into(),
            total_duration: 0.25,
            total_rules: total,
            successful_rules: total,
            failed_rules: 0,
            success_rate: if total == 0 { 0.0 } else { 1.0 },
            results: request
                .rule_ids
                .iter()
                .map(|id| RuleRunReport {
                    rule_id: *id,
                    rule_name: format!("rule {}", id),
                    success: true,
                    statistics: None,
                    results: vec![],
                    error: None,
                    execution_time: 0.1,
                })
                .collect(),
        })
    }

    async fn check_rule_outdated(&self, rule_id: RuleId) -> Result<OutdatedCheck, RulekeeperError> {
        self.record("check_rule_outdated").await?;
        self.find_rule(rule_id)?;
        Ok(OutdatedCheck {
            is_outdated: false,
            confidence: 0.9,
            suggestion: String::new(),
        })
    }

    async fn suggest_rules(
        &self,
        table_name: &str,
    ) -> Result<SuggestRulesResponse, RulekeeperError> {
        self.record("suggest_rules").await?;
        Ok(self.suggestions.clone().unwrap_or_else(|| SuggestRulesResponse {
            table_name: table_name.to_string(),
            ..Default::default()
        }))
    }

    async fn apply_suggested_rules(
        &self,
        request: &ApplySuggestedRulesRequest,
    ) -> Result<ApplySuggestedRulesResponse, RulekeeperError> {
        self.record("apply_suggested_rules").await?;
        self.applied.lock().unwrap().push(request.clone());
        Ok(self.apply_response.clone().unwrap_or_default())
    }

    async fn analyze_table(
        &self,
        request: &AnalyzeTableRequest,
    ) -> Result<TableAnalysis, RulekeeperError> {
        self.record("analyze_table").await?;
        self.analyzed.lock().unwrap().push(request.clone());
        self.analysis
            .clone()
            .ok_or_else(|| RulekeeperError::InternalError("no analysis configured".into()))
    }
}
