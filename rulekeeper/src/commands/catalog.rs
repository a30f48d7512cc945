// rulekeeper/src/commands/catalog.rs
//
// USE CASES: connect, list tables, show a table schema.

use rulekeeper_core::QualityBackend;
use rulekeeper_core::application::{
    ConnectionContext, list_visible_tables, load_table_overview, table_has_rules,
};

use super::{Console, table};

pub async fn connect(console: &Console) -> anyhow::Result<()> {
    let mut context = ConnectionContext::new();
    let status = context.establish(&console.backend).await?;

    println!("🔌 {} ({})", status.message, status.status);
    println!("   Database: {}", status.database_url);
    println!("   Tables:   {}", status.tables.len());
    Ok(())
}

pub async fn tables(console: &Console) -> anyhow::Result<()> {
    let (tables, rules) = tokio::try_join!(
        list_visible_tables(&console.backend, &console.config),
        console.backend.list_rules(),
    )?;

    let mut out = table(vec!["Table", "Rules"]);
    for name in &tables {
        let marker = if table_has_rules(&rules, name) { "✔" } else { "" };
        out.add_row(vec![name.as_str(), marker]);
    }
    println!("{out}");
    println!("{} tables", tables.len());
    Ok(())
}

pub async fn schema(console: &Console, table_name: String) -> anyhow::Result<()> {
    let overview = load_table_overview(&console.backend, &table_name).await?;
    let schema = &overview.schema;

    println!("🧱 {}", schema.table_name);
    let mut out = table(vec!["Column", "Type", "Nullable", "Default", "Key"]);
    for column in &schema.columns {
        let key = if schema.is_primary_key(&column.column_name) {
            "PK".to_string()
        } else if let Some(fk) = schema.foreign_key(&column.column_name) {
            format!("FK → {}.{}", fk.references_table, fk.references_column)
        } else {
            String::new()
        };
        let data_type = match column.character_maximum_length {
            Some(len) => format!("{}({})", column.data_type, len),
            None => column.data_type.clone(),
        };
        out.add_row(vec![
            column.column_name.clone(),
            data_type,
            if column.is_nullable { "yes" } else { "no" }.to_string(),
            column.column_default.clone().unwrap_or_default(),
            key,
        ]);
    }
    println!("{out}");
    println!("{} rules on this table", overview.rules.len());
    Ok(())
}
