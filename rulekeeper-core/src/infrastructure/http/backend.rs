// rulekeeper-core/src/infrastructure/http/backend.rs

use async_trait::async_trait;
use reqwest::Method;

use super::transport::HttpTransport;
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
use crate::infrastructure::config::ClientConfig;
use crate::ports::backend::QualityBackend;

const NO_BODY: Option<&()> = None;

/// [`QualityBackend`] over the backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    transport: HttpTransport,
}

impl HttpBackend {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, RulekeeperError> {
        Ok(Self::new(HttpTransport::new(&config.api_base_url)?))
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }
}

#[async_trait]
impl QualityBackend for HttpBackend {
    async fn connect(&self) -> Result<ConnectionStatus, RulekeeperError> {
        Ok(self
            .transport
            .request(Method::GET, "/api/v1/database/connect", NO_BODY)
            .await?)
    }

    async fn list_tables(&self) -> Result<Vec<String>, RulekeeperError> {
        Ok(self
            .transport
            .request(Method::GET, "/api/v1/database/tables", NO_BODY)
            .await?)
    }

    async fn table_schema(&self, table_name: &str) -> Result<TableSchema, RulekeeperError> {
        let path = format!("/api/v1/database/tables/{}/schema", table_name);
        Ok(self.transport.request(Method::GET, &path, NO_BODY).await?)
    }

    async fn list_rules(&self) -> Result<Vec<Rule>, RulekeeperError> {
        Ok(self
            .transport
            .request(Method::GET, "/api/v1/rules", NO_BODY)
            .await?)
    }

    async fn get_rule(&self, rule_id: RuleId) -> Result<Rule, RulekeeperError> {
        let path = format!("/api/v1/rules/{}", rule_id);
        Ok(self.transport.request(Method::GET, &path, NO_BODY).await?)
    }

    async fn generate_rules(&self, table_name: &str) -> Result<Vec<Rule>, RulekeeperError> {
        Ok(self
            .transport
            .request_with_query(
                Method::POST,
                "/api/v1/rules/generate",
                &[("table_name", table_name)],
                NO_BODY,
            )
            .await?)
    }

    async fn generate_rule_from_description(
        &self,
        request: &GenerateFromDescriptionRequest,
    ) -> Result<Rule, RulekeeperError> {
        Ok(self
            .transport
            .request(
                Method::POST,
                "/api/v1/rules/generate-from-description",
                Some(request),
            )
            .await?)
    }

    async fn update_rule(
        &self,
        rule_id: RuleId,
        request: &UpdateRuleRequest,
    ) -> Result<Rule, RulekeeperError> {
        let path = format!("/api/v1/rules/{}", rule_id);
        Ok(self
            .transport
            .request(Method::PUT, &path, Some(request))
            .await?)
    }

    async fn delete_rule(&self, rule_id: RuleId) -> Result<(), RulekeeperError> {
        let path = format!("/api/v1/rules/{}", rule_id);
        Ok(self
            .transport
            .request_empty(Method::DELETE, &path, NO_BODY)
            .await?)
    }

    async fn execute_rules(
        &self,
        request: &ExecuteRulesRequest,
    ) -> Result<RuleExecutionResult, RulekeeperError> {
        Ok(self
            .transport
            .request(Method::POST, "/api/v1/rules/execute", Some(request))
            .await?)
    }

    async fn check_rule_outdated(&self, rule_id: RuleId) -> Result<OutdatedCheck, RulekeeperError> {
        let path = format!("/api/v1/rules/check-outdated/{}", rule_id);
        Ok(self.transport.request(Method::GET, &path, NO_BODY).await?)
    }

    async fn suggest_rules(
        &self,
        table_name: &str,
    ) -> Result<SuggestRulesResponse, RulekeeperError> {
        let path = format!("/api/v1/tables/{}/suggest-rules", table_name);
        Ok(self.transport.request(Method::GET, &path, NO_BODY).await?)
    }

    async fn apply_suggested_rules(
        &self,
        request: &ApplySuggestedRulesRequest,
    ) -> Result<ApplySuggestedRulesResponse, RulekeeperError> {
        let path = format!("/api/v1/tables/{}/apply-suggested-rules", request.table_name);
        Ok(self
            .transport
            .request(Method::POST, &path, Some(request))
            .await?)
    }

    async fn analyze_table(
        &self,
        request: &AnalyzeTableRequest,
    ) -> Result<TableAnalysis, RulekeeperError> {
        Ok(self
            .transport
            .request(Method::POST, "/api/v1/analyze-table", Some(request))
            .await?)
    }
}
