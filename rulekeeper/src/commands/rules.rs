// rulekeeper/src/commands/rules.rs
//
// USE CASES: list, show, generate, edit and delete rules.

use anyhow::Context;
use rulekeeper_core::QualityBackend;
use rulekeeper_core::application::{
    TableRules, check_rule_outdated, delete_rule, generate_from_description, generate_rules,
    save_edit,
};
use rulekeeper_core::domain::rules::{Rule, RuleId};
use rulekeeper_core::domain::view::{DeleteIntent, EditDialog, GenerateDialog};
use std::io::{self, BufRead, Write};

use super::{Console, table};

fn status_of(rule: &Rule) -> &'static str {
    match (rule.is_active, rule.is_draft()) {
        (_, true) => "draft",
        (true, false) => "active",
        (false, false) => "inactive",
    }
}

fn print_rules(rules: &[Rule]) {
    let mut out = table(vec!["Id", "Name", "Columns", "Expectations", "Status"]);
    for rule in rules {
        out.add_row(vec![
            rule.id.to_string(),
            rule.name.clone(),
            rule.display_columns().join(", "),
            rule.rule_config.len().to_string(),
            status_of(rule).to_string(),
        ]);
    }
    println!("{out}");
}

pub async fn list(console: &Console, table_name: String) -> anyhow::Result<()> {
    let board = TableRules::load(&console.backend, &table_name).await?;
    if board.is_empty() {
        println!(
            "📜 No rules on '{}' yet. Try 'rulekeeper generate {}'.",
            table_name, table_name
        );
        return Ok(());
    }
    println!("📜 Rules on '{}'", table_name);
    print_rules(board.rules());
    Ok(())
}

pub async fn show(console: &Console, rule_id: RuleId) -> anyhow::Result<()> {
    let rule = console
        .backend
        .get_rule(rule_id)
        .await
        .with_context(|| format!("Failed to load rule {}", rule_id))?;

    println!("🔍 Rule {}: {}", rule.id, rule.name);
    println!("   Table:   {}", rule.table_name);
    println!("   Status:  {}", status_of(&rule));
    if !rule.description.is_empty() {
        println!("   About:   {}", rule.description);
    }

    let mut out = table(vec!["#", "Expectation", "Type"]);
    for (i, expectation) in rule.rule_config.iter().enumerate() {
        out.add_row(vec![
            (i + 1).to_string(),
            expectation.to_string(),
            expectation.expectation_type().to_string(),
        ]);
    }
    println!("{out}");
    Ok(())
}

pub async fn generate(console: &Console, table_name: String) -> anyhow::Result<()> {
    let mut board = TableRules::new(table_name.as_str(), vec![]);
    println!("✨ Generating rules for '{}'...", table_name);
    let generated = generate_rules(&console.backend, &mut board).await?;
    println!(
        "   {} rules generated, {} on the table now.",
        generated.len(),
        board.len()
    );
    print_rules(board.rules());
    Ok(())
}

pub async fn describe(
    console: &Console,
    table_name: String,
    description: String,
    name: Option<String>,
) -> anyhow::Result<()> {
    let mut board = TableRules::new(table_name.as_str(), vec![]);
    let mut dialog = GenerateDialog {
        description,
        name: name.unwrap_or_default(),
        error: None,
    };
    let rule = generate_from_description(&console.backend, &mut dialog, &mut board).await?;
    println!("✨ Created rule {} '{}'", rule.id, rule.name);
    for expectation in &rule.rule_config {
        println!("   • {}", expectation);
    }
    Ok(())
}

pub struct EditArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub active: Option<bool>,
    pub columns: Vec<String>,
}

pub async fn edit(console: &Console, rule_id: RuleId, args: EditArgs) -> anyhow::Result<()> {
    let rule = console
        .backend
        .get_rule(rule_id)
        .await
        .with_context(|| format!("Failed to load rule {}", rule_id))?;
    let mut board = TableRules::new(rule.table_name.as_str(), vec![rule.clone()]);

    let mut dialog = EditDialog::open(rule);
    if let Some(form) = dialog.form_mut() {
        if let Some(name) = args.name {
            form.name = name;
        }
        if let Some(description) = args.description {
            form.description = description;
        }
        if let Some(active) = args.active {
            form.is_active = active;
        }
        if !args.columns.is_empty() {
            form.columns = args.columns;
        }
    }

    let updated = save_edit(&console.backend, &mut dialog, &mut board)
        .await
        .with_context(|| format!("Failed to update rule {}", rule_id))?;
    println!("🛠️  Rule {} saved ({})", updated.id, status_of(&updated));
    for expectation in &updated.rule_config {
        println!("   • {}", expectation);
    }
    Ok(())
}

fn ask_confirmation(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub async fn delete(console: &Console, rule_id: RuleId, yes: bool) -> anyhow::Result<()> {
    let rule = console
        .backend
        .get_rule(rule_id)
        .await
        .with_context(|| format!("Failed to load rule {}", rule_id))?;

    let intent = DeleteIntent::new(rule.id);
    let answer = yes || ask_confirmation(&format!("Delete rule {} '{}'?", rule.id, rule.name))?;
    let Some(confirmed) = intent.resolve(answer) else {
        println!("Aborted, rule {} kept.", rule_id);
        return Ok(());
    };

    let table_name = rule.table_name.clone();
    let mut board = TableRules::new(table_name.as_str(), vec![rule]);
    delete_rule(&console.backend, confirmed, &mut board).await?;
    println!("🗑️  Rule {} deleted.", rule_id);
    Ok(())
}

pub async fn outdated(console: &Console, rule_id: RuleId) -> anyhow::Result<()> {
    let check = check_rule_outdated(&console.backend, rule_id).await?;
    if check.is_outdated {
        println!(
            "⚠️  Rule {} looks outdated ({:.0}% confidence)",
            rule_id,
            check.confidence * 100.0
        );
        println!("   {}", check.suggestion);
    } else {
        println!("✅ Rule {} is up to date.", rule_id);
    }
    Ok(())
}
