// rulekeeper/src/commands/suggestions.rs
//
// USE CASES: list rule suggestions, apply a selection of them.

use rulekeeper_core::application::{ApplyOutcome, SuggestionSession};
use rulekeeper_core::domain::rules::RuleId;
use rulekeeper_core::domain::suggestion::SuggestRulesResponse;

use super::{Console, table};

fn print_suggestions(suggestions: &SuggestRulesResponse) {
    if suggestions.is_empty() {
        println!("💡 No suggestions for '{}'.", suggestions.table_name);
        return;
    }

    if !suggestions.new_rule_suggestions.is_empty() {
        println!("💡 New rules (select with --new <index>)");
        let mut out = table(vec!["Index", "Type", "Columns", "Description", "Confidence"]);
        for (index, s) in suggestions.new_rule_suggestions.iter().enumerate() {
            out.add_row(vec![
                index.to_string(),
                s.rule_type.clone(),
                s.target_columns().join(", "),
                s.description.clone(),
                format!("{:.0}%", s.confidence * 100.0),
            ]);
        }
        println!("{out}");
    }

    if !suggestions.rule_update_suggestions.is_empty() {
        println!("💡 Rule updates (select with --update <rule id>)");
        let mut out = table(vec!["Rule", "Reason", "Suggested config", "Confidence"]);
        for s in &suggestions.rule_update_suggestions {
            out.add_row(vec![
                s.rule_id.to_string(),
                s.reason.clone(),
                s.suggested_config.render(),
                format!("{:.0}%", s.confidence * 100.0),
            ]);
        }
        println!("{out}");
    }
}

pub async fn suggest(console: &Console, table_name: String) -> anyhow::Result<()> {
    let mut session = SuggestionSession::new(table_name);
    let suggestions = session.suggest(&console.backend).await?;
    print_suggestions(suggestions);
    Ok(())
}

pub async fn apply(
    console: &Console,
    table_name: String,
    new: Vec<usize>,
    update: Vec<RuleId>,
) -> anyhow::Result<()> {
    let mut session = SuggestionSession::new(table_name);
    session.suggest(&console.backend).await?;
    for index in new {
        session.select_new(index)?;
    }
    for rule_id in update {
        session.select_update(rule_id)?;
    }

    let outcome = session.apply(&console.backend).await?;
    print_outcome(&outcome);
    Ok(())
}

pub fn print_outcome(outcome: &ApplyOutcome) {
    for rule_id in &outcome.dropped_updates {
        println!("⏭️  No update suggestion for rule {}, skipped.", rule_id);
    }
    for rule in &outcome.created {
        println!("✨ Created rule {} '{}'", rule.id, rule.name);
    }
    for rule in &outcome.updated {
        println!("🛠️  Updated rule {} '{}'", rule.id, rule.name);
    }
    if outcome.has_errors() {
        println!("⚠️  {} suggestions could not be applied:", outcome.errors.len());
        for error in &outcome.errors {
            println!("   - {}", error);
        }
    }
}
