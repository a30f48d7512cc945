// rulekeeper/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use commands::{Console, describe_error, error_help};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug rulekeeper tables ... to see every request
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", describe_error(&e));
        if let Some(help) = error_help(&e) {
            eprintln!("👉 {}", help);
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let console = Console::open(&cli.global)?;

    match cli.command {
        Commands::Connect => commands::catalog::connect(&console).await,
        Commands::Tables => commands::catalog::tables(&console).await,
        Commands::Schema { table } => commands::catalog::schema(&console, table).await,

        Commands::Rules { table } => commands::rules::list(&console, table).await,
        Commands::Rule { id } => commands::rules::show(&console, id).await,
        Commands::Generate { table } => commands::rules::generate(&console, table).await,
        Commands::Describe {
            table,
            description,
            name,
        } => commands::rules::describe(&console, table, description, name).await,
        Commands::Edit {
            id,
            name,
            description,
            active,
            inactive,
            columns,
        } => {
            let active = match (active, inactive) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let args = commands::rules::EditArgs {
                name,
                description,
                active,
                columns,
            };
            commands::rules::edit(&console, id, args).await
        }
        Commands::Delete { id, yes } => commands::rules::delete(&console, id, yes).await,
        Commands::Outdated { id } => commands::rules::outdated(&console, id).await,

        Commands::Execute {
            table,
            rules,
            samples,
        } => commands::execute::execute(&console, table, rules, samples).await,

        Commands::Suggest { table } => commands::suggestions::suggest(&console, table).await,
        Commands::ApplySuggestions { table, new, update } => {
            commands::suggestions::apply(&console, table, new, update).await
        }

        Commands::Analyze { table, apply } => {
            commands::analyze::analyze(&console, table, apply).await
        }
    }
}
