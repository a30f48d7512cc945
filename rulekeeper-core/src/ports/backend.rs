// rulekeeper-core/src/ports/backend.rs
//
// Everything the console needs from the rules backend. The HTTP adapter in
// `infrastructure::http` is the production implementation; tests plug in
// their own.

use async_trait::async_trait;

use crate::domain::analysis::{AnalyzeTableRequest, TableAnalysis};
use crate::domain::catalog::{ConnectionStatus, TableSchema};
use crate::domain::execution::RuleExecutionResult;
use crate::domain::rules::{
    ExecuteRulesRequest, GenerateFromDescriptionRequest, OutdatedCheck, Rule, RuleId,
    UpdateRuleRequest,
};
use crate::domain::suggestion::{
    ApplySuggestedRulesRequest, ApplySuggestedRulesResponse, SuggestRulesResponse,
};
use crate::error::RulekeeperError;

#[async_trait]
pub trait QualityBackend: Send + Sync {
    /// `GET /api/v1/database/connect`
    async fn connect(&self) -> Result<ConnectionStatus, RulekeeperError>;

    /// `GET /api/v1/database/tables`
    async fn list_tables(&self) -> Result<Vec<String>, RulekeeperError>;

    /// `GET /api/v1/database/tables/{table}/schema`
    async fn table_schema(&self, table_name: &str) -> Result<TableSchema, RulekeeperError>;

    /// `GET /api/v1/rules` (every table)
    async fn list_rules(&self) -> Result<Vec<Rule>, RulekeeperError>;

    /// `GET /api/v1/rules/{id}`
    async fn get_rule(&self, rule_id: RuleId) -> Result<Rule, RulekeeperError>;

    /// `POST /api/v1/rules/generate?table_name=`
    async fn generate_rules(&self, table_name: &str) -> Result<Vec<Rule>, RulekeeperError>;

    /// `POST /api/v1/rules/generate-from-description`
    async fn generate_rule_from_description(
        &self,
        request: &GenerateFromDescriptionRequest,
    ) -> Result<Rule, RulekeeperError>;

    /// `PUT /api/v1/rules/{id}`
    async fn update_rule(
        &self,
        rule_id: RuleId,
        request: &UpdateRuleRequest,
    ) -> Result<Rule, RulekeeperError>;

    /// `DELETE /api/v1/rules/{id}`
    async fn delete_rule(&self, rule_id: RuleId) -> Result<(), RulekeeperError>;

    /// `POST /api/v1/rules/execute`
    async fn execute_rules(
        &self,
        request: &ExecuteRulesRequest,
    ) -> Result<RuleExecutionResult, RulekeeperError>;

    /// `GET /api/v1/rules/check-outdated/{id}`
    async fn check_rule_outdated(&self, rule_id: RuleId) -> Result<OutdatedCheck, RulekeeperError>;

    /// `GET /api/v1/tables/{table}/suggest-rules`
    async fn suggest_rules(&self, table_name: &str)
    -> Result<SuggestRulesResponse, RulekeeperError>;

    /// `POST /api/v1/tables/{table}/apply-suggested-rules`
    async fn apply_suggested_rules(
        &self,
        request: &ApplySuggestedRulesRequest,
    ) -> Result<ApplySuggestedRulesResponse, RulekeeperError>;

    /// `POST /api/v1/analyze-table`
    async fn analyze_table(
        &self,
        request: &AnalyzeTableRequest,
    ) -> Result<TableAnalysis, RulekeeperError>;
}
