use anyhow::Result;
use rulekeeper_core::application::{
    ConnectionContext, NavigationScope, SuggestionSession, TableRules, analyze_table,
    execute_selected, list_visible_tables, load_table_overview,
};
use rulekeeper_core::domain::view::Selection;
use rulekeeper_core::infrastructure::config::ClientConfig;
use rulekeeper_core::infrastructure::http::HttpBackend;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn rule_json(id: i64, table: &str, column: &str) -> Value {
    json!({
        "id": id,
        "name": format!("{} not null", column),
        "description": "",
        "table_name": table,
        "rule_config": {
            "expectation_type": "expect_column_values_to_not_be_null",
            "kwargs": {"column": column}
        },
        "is_active": true,
        "columns": [column]
    })
}

async fn mount_get(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn backend_for(server: &MockServer) -> Result<(HttpBackend, ClientConfig)> {
    let config = ClientConfig::default().with_base_url(server.uri())?;
    Ok((HttpBackend::from_config(&config)?, config))
}

#[tokio::test]
async fn test_browse_and_execute_flow() -> Result<()> {
    let server = MockServer::start().await;
    let tables = json!(["orders", "customers", "rules", "rule_versions"]);

    mount_get(
        &server,
        "/api/v1/database/connect",
        json!({"status": "connected", "message": "ok",
               "database_url": "postgresql://localhost/shop", "tables": tables}),
    )
    .await;
    mount_get(&server, "/api/v1/database/tables", tables.clone()).await;
    mount_get(
        &server,
        "/api/v1/database/tables/orders/schema",
        json!({
            "table_name": "orders",
            "columns": [
                {"column_name": "id", "data_type": "integer", "is_nullable": false},
                {"column_name": "total", "data_type": "numeric", "is_nullable": true}
            ],
            "primary_keys": ["id"],
            "foreign_keys": []
        }),
    )
    .await;
    mount_get(
        &server,
        "/api/v1/rules",
        json!([
            rule_json(1, "orders", "id"),
            rule_json(2, "customers", "email"),
            rule_json(3, "orders", "total")
        ]),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/rules/execute"))
        .and(body_json(json!({"table_name": "orders", "rule_ids": [3, 1]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "table_name": "orders",
            "execution_time": "2026-01-15T10:30:00Z",
            "total_duration": 1.2,
            "total_rules": 2,
            "successful_rules": 1,
            "failed_rules": 1,
            "success_rate": 0.5,
            "results": [
                {"rule_id": 3, "rule_name": "total not null", "success": false,
                 "results": [{
                    "expectation_type": "expect_column_values_to_not_be_null",
                    "success": false,
                    "result": {"unexpected_values": [null, null], "element_count": 40,
                               "unexpected_count": 2, "unexpected_percent": 5.0}
                 }]},
                {"rule_id": 1, "rule_name": "id not null", "success": true, "results": []}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (backend, config) = backend_for(&server)?;

    let mut context = ConnectionContext::new();
    context.establish(&backend).await?;
    assert!(context.is_connected());

    let visible = list_visible_tables(&backend, &config).await?;
    assert_eq!(visible, vec!["orders", "customers"]);

    let mut scope = NavigationScope::new();
    let ticket = scope.navigate("orders");
    let overview = load_table_overview(&backend, ticket.subject()).await?;
    let mut shown = None;
    assert!(scope.commit(&ticket, overview, &mut shown));
    let overview = shown.unwrap();
    assert_eq!(overview.schema.column_names(), vec!["id", "total"]);
    assert_eq!(
        overview.rules.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![1, 3]
    );

    let selection: Selection<i64> = [3, 1].into_iter().collect();
    let result = execute_selected(&backend, "orders", &selection).await?;
    assert_eq!(result.success_rate, result.computed_success_rate());
    assert_eq!(result.rule_ids(), vec![3, 1]);

    let failed = result.report_for(3).unwrap();
    let outcome = failed.failed_outcomes().next().unwrap();
    assert_eq!(outcome.result.unexpected_count, Some(2));
    Ok(())
}

#[tokio::test]
async fn test_stale_response_is_not_committed() -> Result<()> {
    let mut scope = NavigationScope::new();
    let orders = scope.navigate("orders");
    let _customers = scope.navigate("customers");

    let mut shown: Option<&str> = None;
    assert!(!scope.commit(&orders, "orders overview", &mut shown));
    assert!(shown.is_none());
    Ok(())
}

#[tokio::test]
async fn test_apply_drops_stale_update_and_keeps_partial_success() -> Result<()> {
    let server = MockServer::start().await;

    mount_get(
        &server,
        "/api/v1/tables/customers/suggest-rules",
        json!({
            "table_name": "customers",
            "new_rule_suggestions": [
                {"rule_type": "not_null", "column": "email", "description": "emails are set",
                 "rule_config": {"expectation_type": "expect_column_values_to_not_be_null",
                                 "kwargs": {"column": "email"}},
                 "confidence": 0.9}
            ],
            "rule_update_suggestions": [
                {"rule_id": 5, "current_config": "{}", "suggested_config": "{}",
                 "reason": "column widened", "confidence": 0.6}
            ]
        }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/tables/customers/apply-suggested-rules"))
        .and(body_json(json!({
            "table_name": "customers",
            "new_rule_ids": [0],
            "update_rule_ids": [5]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "created_rules": [rule_json(21, "customers", "email")],
            "updated_rules": [],
            "errors": ["Rule 5: suggested config no longer applies"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (backend, _) = backend_for(&server)?;
    let mut board = TableRules::new("customers", vec![]);
    let mut session = SuggestionSession::new("customers");

    session.suggest(&backend).await?;
    session.toggle_new(0)?;
    session.toggle_update(5)?;
    session.toggle_update(77)?;

    let outcome = session.apply(&backend).await?;
    assert!(outcome.is_partial());
    assert_eq!(outcome.dropped_updates, vec![77]);
    assert_eq!(outcome.errors.len(), 1);

    board.absorb(outcome.changed_rules());
    assert_eq!(board.get(21).map(|r| r.name.as_str()), Some("email not null"));
    Ok(())
}

#[tokio::test]
async fn test_analysis_with_applied_suggestions_reloads_rules() -> Result<()> {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/analyze-table"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "table_name": "orders",
            "applied_suggestions": {
                "created_rules": [rule_json(30, "orders", "status")],
                "updated_rules": [],
                "errors": []
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/rules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            rule_json(1, "orders", "id"),
            rule_json(30, "orders", "status")
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (backend, _) = backend_for(&server)?;
    let mut board = TableRules::new("orders", vec![]);
    let outcome = analyze_table(&backend, "orders", true, &mut board).await?;

    assert!(outcome.refreshed_rules);
    assert_eq!(board.len(), 2);
    Ok(())
}
