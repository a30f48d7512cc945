// rulekeeper/src/commands/execute.rs
//
// USE CASE: execute selected rules and render the report.

use rulekeeper_core::application::execute_selected;
use rulekeeper_core::domain::execution::{
    ExpectationOutcome, RuleExecutionResult, UNEXPECTED_VALUES_PREVIEW, failing_column_of,
};
use rulekeeper_core::domain::rules::RuleId;
use rulekeeper_core::domain::view::Selection;

use super::{Console, table};

pub async fn execute(
    console: &Console,
    table_name: String,
    rules: Vec<RuleId>,
    samples: bool,
) -> anyhow::Result<()> {
    let selection: Selection<RuleId> = rules.into_iter().collect();
    println!("▶️  Executing {} rules on '{}'...", selection.len(), table_name);

    let result = execute_selected(&console.backend, &table_name, &selection).await?;
    print_summary(&result);

    for report in &result.results {
        if let Some(error) = &report.error {
            println!("\n💥 {} (rule {}): {}", report.rule_name, report.rule_id, error);
            continue;
        }
        for outcome in report.failed_outcomes() {
            println!("\n❌ {} (rule {})", report.rule_name, report.rule_id);
            print_failure(outcome, samples);
        }
    }
    Ok(())
}

fn print_summary(result: &RuleExecutionResult) {
    let executed_at = result
        .executed_at()
        .map(|ts| ts.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| result.execution_time.clone());

    let mut out = table(vec!["Id", "Rule", "Result", "Time"]);
    for report in &result.results {
        out.add_row(vec![
            report.rule_id.to_string(),
            report.rule_name.clone(),
            if report.success { "✅ passed" } else { "❌ failed" }.to_string(),
            format!("{:.2}s", report.execution_time),
        ]);
    }
    println!("{out}");
    println!(
        "{}/{} passed ({:.1}%), {} failed, in {:.2}s at {}",
        result.successful_rules,
        result.total_rules,
        result.computed_success_rate() * 100.0,
        result.failed_rules,
        result.total_duration,
        executed_at
    );
}

fn print_failure(outcome: &ExpectationOutcome, samples: bool) {
    let column = failing_column_of(outcome);
    let detail = &outcome.result;

    println!("   Expectation: {}", outcome.expectation_type);
    if !column.is_empty() {
        println!("   Column:      {}", column);
    }
    if let (Some(unexpected), Some(total)) = (detail.unexpected_count, detail.element_count) {
        println!(
            "   Unexpected:  {} of {} ({:.2}%)",
            unexpected,
            total,
            detail.unexpected_percent.unwrap_or_default()
        );
    }

    let preview = detail.preview();
    if !preview.is_empty() {
        let values: Vec<String> = preview.iter().map(|v| v.to_string()).collect();
        println!("   Values:      {}", values.join(", "));
        if detail.hidden_count() > 0 {
            println!(
                "                … and {} more (first {} shown)",
                detail.hidden_count(),
                UNEXPECTED_VALUES_PREVIEW
            );
        }
    }

    if samples && !outcome.sample_rows.is_empty() {
        let mut headers: Vec<&str> = outcome.sample_rows[0].keys().map(String::as_str).collect();
        headers.sort_unstable();
        let mut out = table(headers.clone());
        for row in &outcome.sample_rows {
            out.add_row(
                headers
                    .iter()
                    .map(|h| row.get(*h).map(|v| v.to_string()).unwrap_or_default())
                    .collect::<Vec<_>>(),
            );
        }
        println!("{out}");
    } else if !outcome.sample_rows.is_empty() {
        println!(
            "   {} sample rows available (--samples to show)",
            outcome.sample_rows.len()
        );
    }
}
