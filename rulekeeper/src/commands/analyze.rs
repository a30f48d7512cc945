// rulekeeper/src/commands/analyze.rs
//
// USE CASE: analyze a table, optionally applying the suggestions.

use rulekeeper_core::application::{TableRules, analyze_table};
use serde_json::Value;

use super::{Console, table};

fn render(value: Option<&Value>) -> String {
    value.map(Value::to_string).unwrap_or_default()
}

pub async fn analyze(console: &Console, table_name: String, apply: bool) -> anyhow::Result<()> {
    let mut board = TableRules::new(table_name.as_str(), vec![]);
    let outcome = analyze_table(&console.backend, &table_name, apply, &mut board).await?;
    let analysis = &outcome.analysis;
    let stats = &analysis.data_statistics;

    println!("🔬 {} ({} rows)", analysis.table_name, stats.row_count);
    let mut out = table(vec!["Column", "Type", "Nulls", "Min", "Max", "Avg"]);
    for column in &analysis.column_analysis.columns {
        let name = column.column_name.as_str();
        let column_stats = analysis.stats_for(name);
        out.add_row(vec![
            name.to_string(),
            column.data_type.clone(),
            stats
                .null_percent(name)
                .map(|p| format!("{:.1}%", p))
                .unwrap_or_default(),
            render(column_stats.and_then(|s| s.min_value.as_ref())),
            render(column_stats.and_then(|s| s.max_value.as_ref())),
            render(column_stats.and_then(|s| s.avg_value.as_ref())),
        ]);
    }
    println!("{out}");

    if let Some(suggestions) = &analysis.rule_suggestions {
        println!(
            "💡 {} new rule and {} update suggestions",
            suggestions.new_rule_suggestions.len(),
            suggestions.rule_update_suggestions.len()
        );
    }

    if let Some(applied) = &analysis.applied_suggestions {
        println!(
            "✅ Applied: {} created, {} updated",
            applied.created_rules.len(),
            applied.updated_rules.len()
        );
        for error in &applied.errors {
            println!("   ⚠️  {}", error);
        }
    }
    if outcome.refreshed_rules {
        println!("📜 {} rules now on '{}'", board.len(), board.table_name());
    }
    Ok(())
}
