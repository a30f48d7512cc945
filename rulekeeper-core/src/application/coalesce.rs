// rulekeeper-core/src/application/coalesce.rs

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

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
use crate::ports::backend::QualityBackend;

type SharedCall<V> = Shared<BoxFuture<'static, Result<V, Arc<RulekeeperError>>>>;

/// Shares one in-flight call among concurrent callers asking for the same key.
///
/// Nothing is cached: once the call completes, the next caller starts a
/// fresh one.
pub struct Coalescer<K, V> {
    in_flight: Mutex<HashMap<K, SharedCall<V>>>,
}

impl<K, V> Default for Coalescer<K, V> {
    fn default() -> Self {
        Self {
            in_flight: Mutex::new(HashMap::new()),
        }
    }
}

impl<K, V> Coalescer<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<K, SharedCall<V>>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Joins the call in flight for `key`, or starts one with `start`.
    pub async fn run<F, Fut>(&self, key: K, start: F) -> Result<V, RulekeeperError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, RulekeeperError>> + Send + 'static,
    {
        let call = {
            let mut in_flight = self.lock();
            match in_flight.get(&key) {
                Some(call) => {
                    debug!("Joining in-flight request");
                    call.clone()
                }
                None => {
                    let call = start().map(|r| r.map_err(Arc::new)).boxed().shared();
                    in_flight.insert(key.clone(), call.clone());
                    call
                }
            }
        };

        let result = call.clone().await;

        {
            let mut in_flight = self.lock();
            let finished = in_flight
                .get(&key)
                .is_some_and(|current| current.ptr_eq(&call));
            if finished {
                in_flight.remove(&key);
            }
        }

        result.map_err(RulekeeperError::Coalesced)
    }

    pub fn in_flight(&self) -> usize {
        self.lock().len()
    }
}

/// [`QualityBackend`] decorator that de-duplicates concurrent identical
/// reads. Writes always go straight through.
pub struct CoalescingBackend<B> {
    inner: Arc<B>,
    tables: Coalescer<(), Vec<String>>,
    schemas: Coalescer<String, TableSchema>,
    rules: Coalescer<(), Vec<Rule>>,
    rule: Coalescer<RuleId, Rule>,
}

impl<B: QualityBackend + 'static> CoalescingBackend<B> {
    pub fn new(inner: B) -> Self {
        Self::from_arc(Arc::new(inner))
    }

    pub fn from_arc(inner: Arc<B>) -> Self {
        Self {
            inner,
            tables: Coalescer::new(),
            schemas: Coalescer::new(),
            rules: Coalescer::new(),
            rule: Coalescer::new(),
        }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

#[async_trait]
impl<B: QualityBackend + 'static> QualityBackend for CoalescingBackend<B> {
    async fn connect(&self) -> Result<ConnectionStatus, RulekeeperError> {
        self.inner.connect().await
    }

    async fn list_tables(&self) -> Result<Vec<String>, RulekeeperError> {
        let inner = Arc::clone(&self.inner);
        self.tables
            .run((), move || async move { inner.list_tables().await })
            .await
    }

    async fn table_schema(&self, table_name: &str) -> Result<TableSchema, RulekeeperError> {
        let inner = Arc::clone(&self.inner);
        let table = table_name.to_string();
        self.schemas
            .run(table.clone(), move || async move {
                inner.table_schema(&table).await
            })
            .await
    }

    async fn list_rules(&self) -> Result<Vec<Rule>, RulekeeperError> {
        let inner = Arc::clone(&self.inner);
        self.rules
            .run((), move || async move { inner.list_rules().await })
            .await
    }

    async fn get_rule(&self, rule_id: RuleId) -> Result<Rule, RulekeeperError> {
        let inner = Arc::clone(&self.inner);
        self.rule
            .run(rule_id, move || async move { inner.get_rule(rule_id).await })
            .await
    }

    async fn generate_rules(&self, table_name: &str) -> Result<Vec<Rule>, RulekeeperError> {
        self.inner.generate_rules(table_name).await
    }

    async fn generate_rule_from_description(
        &self,
        request: &GenerateFromDescriptionRequest,
    ) -> Result<Rule, RulekeeperError> {
        self.inner.generate_rule_from_description(request).await
    }

    async fn update_rule(
        &self,
        rule_id: RuleId,
        request: &UpdateRuleRequest,
    ) -> Result<Rule, RulekeeperError> {
        self.inner.update_rule(rule_id, request).await
    }

    async fn delete_rule(&self, rule_id: RuleId) -> Result<(), RulekeeperError> {
        self.inner.delete_rule(rule_id).await
    }

    async fn execute_rules(
        &self,
        request: &ExecuteRulesRequest,
    ) -> Result<RuleExecutionResult, RulekeeperError> {
        self.inner.execute_rules(request).await
    }

    async fn check_rule_outdated(&self, rule_id: RuleId) -> Result<OutdatedCheck, RulekeeperError> {
        self.inner.check_rule_outdated(rule_id).await
    }

    async fn suggest_rules(
        &self,
        table_name: &str,
    ) -> Result<SuggestRulesResponse, RulekeeperError> {
        self.inner.suggest_rules(table_name).await
    }

    async fn apply_suggested_rules(
        &self,
        request: &ApplySuggestedRulesRequest,
    ) -> Result<ApplySuggestedRulesResponse, RulekeeperError> {
        self.inner.apply_suggested_rules(request).await
    }

    async fn analyze_table(
        &self,
        request: &AnalyzeTableRequest,
    ) -> Result<TableAnalysis, RulekeeperError> {
        self.inner.analyze_table(request).await
    }
}
