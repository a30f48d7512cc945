// rulekeeper-core/src/application/catalog.rs

use tracing::{debug, instrument};

use crate::domain::catalog::{TableSchema, visible_tables};
use crate::domain::rules::{Rule, rules_for_table};
use crate::error::RulekeeperError;
use crate::infrastructure::config::ClientConfig;
use crate::ports::backend::QualityBackend;

/// Tables a user may browse, without the backend's own bookkeeping tables.
#[instrument(skip_all)]
pub async fn list_visible_tables(
    backend: &dyn QualityBackend,
    config: &ClientConfig,
) -> Result<Vec<String>, RulekeeperError> {
    let tables = backend.list_tables().await?;
    let visible = visible_tables(&tables, &config.internal_tables);
    debug!(
        "{} tables listed, {} hidden",
        tables.len(),
        tables.len() - visible.len()
    );
    Ok(visible)
}

pub fn table_has_rules(rules: &[Rule], table_name: &str) -> bool {
    rules.iter().any(|r| r.table_name == table_name)
}

/// Everything the table view shows once a table is picked.
#[derive(Debug, Clone, PartialEq)]
pub struct TableOverview {
    pub schema: TableSchema,
    pub rules: Vec<Rule>,
}

impl TableOverview {
    pub fn table_name(&self) -> &str {
        &self.schema.table_name
    }
}

/// Fetches the schema and the table's rules concurrently. Either failure
/// fails the whole load.
#[instrument(skip(backend))]
pub async fn load_table_overview(
    backend: &dyn QualityBackend,
    table_name: &str,
) -> Result<TableOverview, RulekeeperError> {
    let (schema, rules) =
        futures::try_join!(backend.table_schema(table_name), backend.list_rules())?;
    let rules = rules_for_table(rules, table_name);
    debug!("📋 {}: {} columns, {} rules", table_name, schema.columns.len(), rules.len());
    Ok(TableOverview { schema, rules })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::testing::{MockBackend, not_null_rule};

    #[tokio::test]
    async fn test_internal_tables_are_hidden() {
        let backend =
            MockBackend::new().with_tables(&["orders", "customers", "rules", "rule_versions"]);
        let tables = list_visible_tables(&backend, &ClientConfig::default())
            .await
            .unwrap();
        assert_eq!(tables, vec!["orders", "customers"]);
    }

    #[tokio::test]
    async fn test_configured_internal_tables() {
        let backend = MockBackend::new().with_tables(&["orders", "audit_log", "rules"]);
        let config = ClientConfig {
            internal_tables: vec!["audit_log".into()],
            ..ClientConfig::default()
        };
        let tables = list_visible_tables(&backend, &config).await.unwrap();
        assert_eq!(tables, vec!["orders", "rules"]);
    }

    #[test]
    fn test_table_has_rules() {
        let rules = vec![not_null_rule(1, "orders", "id")];
        assert!(table_has_rules(&rules, "orders"));
        assert!(!table_has_rules(&rules, "customers"));
        assert!(!table_has_rules(&[], "orders"));
    }

    #[tokio::test]
    async fn test_overview_keeps_only_table_rules() {
        let backend = MockBackend::new().with_rules(vec![
            not_null_rule(1, "orders", "id"),
            not_null_rule(2, "customers", "email"),
            not_null_rule(3, "orders", "customer_id"),
        ]);
        let overview = load_table_overview(&backend, "orders").await.unwrap();

        assert_eq!(overview.table_name(), "orders");
        assert_eq!(
            overview.rules.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        assert_eq!(backend.calls_to("table_schema"), 1);
        assert_eq!(backend.calls_to("list_rules"), 1);
    }

    #[tokio::test]
    async fn test_overview_fails_as_a_whole() {
        let backend = MockBackend::new().failing(404, "Table 'ghost' not found");
        let err = load_table_overview(&backend, "ghost").await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
