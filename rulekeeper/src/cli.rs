// rulekeeper/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Args, Parser, Subcommand};
use rulekeeper_core::domain::rules::RuleId;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rulekeeper")]
#[command(about = "Browse tables and manage data-quality rules on a rules backend", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Backend base URL (overrides rulekeeper.yaml and RULEKEEPER_API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Directory holding rulekeeper.yaml
    #[arg(long, global = true, default_value = ".")]
    pub config_dir: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔌 Connects to the backend database and shows its status
    Connect,

    /// 📋 Lists the tables of the connected database
    Tables,

    /// 🧱 Shows columns, primary and foreign keys of a table
    Schema { table: String },

    /// 📜 Lists the rules of a table
    Rules { table: String },

    /// 🔍 Shows one rule and its expectations
    Rule { id: RuleId },

    /// ✨ Generates rules for a table
    Generate { table: String },

    /// ✍️  Generates one rule from a plain-language description
    Describe {
        table: String,
        description: String,

        /// Name of the new rule (the backend picks one otherwise)
        #[arg(long)]
        name: Option<String>,
    },

    /// 🛠️  Edits a rule
    Edit {
        id: RuleId,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Activates the rule
        #[arg(long, conflicts_with = "inactive")]
        active: bool,

        /// Deactivates the rule
        #[arg(long)]
        inactive: bool,

        /// New column selection; repeat for two columns (lower bound first)
        #[arg(long = "column")]
        columns: Vec<String>,
    },

    /// 🗑️  Deletes a rule
    Delete {
        id: RuleId,

        /// Skips the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },

    /// ▶️  Executes rules against a table
    Execute {
        table: String,

        /// Rule to execute; repeat to run several
        #[arg(long = "rule")]
        rules: Vec<RuleId>,

        /// Prints the sample rows returned for failing expectations
        #[arg(long)]
        samples: bool,
    },

    /// ⏳ Asks the backend whether a rule is outdated
    Outdated { id: RuleId },

    /// 💡 Lists rule suggestions for a table
    Suggest { table: String },

    /// ✅ Applies selected rule suggestions
    ApplySuggestions {
        table: String,

        /// Index of a new-rule suggestion, as listed by `suggest`
        #[arg(long = "new")]
        new: Vec<usize>,

        /// Rule id of an update suggestion, as listed by `suggest`
        #[arg(long = "update")]
        update: Vec<RuleId>,
    },

    /// 🔬 Analyzes a table (statistics and suggestions)
    Analyze {
        table: String,

        /// Also applies the suggestions
        #[arg(long)]
        apply: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_globals() -> Result<()> {
        let args = Cli::parse_from([
            "rulekeeper",
            "tables",
            "--api-url",
            "http://dq.internal:9000",
        ]);
        assert_eq!(args.global.api_url.as_deref(), Some("http://dq.internal:9000"));
        assert_eq!(args.global.config_dir.to_string_lossy(), ".");
        match args.command {
            Commands::Tables => Ok(()),
            _ => bail!("Expected Tables command"),
        }
    }

    #[test]
    fn test_cli_parse_execute_rules() -> Result<()> {
        let args = Cli::parse_from([
            "rulekeeper", "execute", "orders", "--rule", "3", "--rule", "1",
        ]);
        match args.command {
            Commands::Execute {
                table,
                rules,
                samples,
            } => {
                assert_eq!(table, "orders");
                assert_eq!(rules, vec![3, 1]);
                assert!(!samples);
                Ok(())
            }
            _ => bail!("Expected Execute command"),
        }
    }

    #[test]
    fn test_cli_parse_edit_columns() -> Result<()> {
        let args = Cli::parse_from([
            "rulekeeper",
            "edit",
            "9",
            "--column",
            "start_date",
            "--column",
            "end_date",
            "--inactive",
        ]);
        match args.command {
            Commands::Edit {
                id,
                columns,
                active,
                inactive,
                name,
                ..
            } => {
                assert_eq!(id, 9);
                assert_eq!(columns, vec!["start_date", "end_date"]);
                assert!(!active);
                assert!(inactive);
                assert_eq!(name, None);
                Ok(())
            }
            _ => bail!("Expected Edit command"),
        }
    }

    #[test]
    fn test_cli_rejects_active_and_inactive() {
        assert!(
            Cli::try_parse_from(["rulekeeper", "edit", "9", "--active", "--inactive"]).is_err()
        );
    }

    #[test]
    fn test_cli_parse_apply_suggestions() -> Result<()> {
        let args = Cli::parse_from([
            "rulekeeper",
            "apply-suggestions",
            "customers",
            "--new",
            "0",
            "--new",
            "2",
            "--update",
            "5",
        ]);
        match args.command {
            Commands::ApplySuggestions { table, new, update } => {
                assert_eq!(table, "customers");
                assert_eq!(new, vec![0, 2]);
                assert_eq!(update, vec![5]);
                Ok(())
            }
            _ => bail!("Expected ApplySuggestions command"),
        }
    }

    #[test]
    fn test_cli_parse_delete_yes() -> Result<()> {
        let args = Cli::parse_from(["rulekeeper", "delete", "4", "-y"]);
        match args.command {
            Commands::Delete { id, yes } => {
                assert_eq!(id, 4);
                assert!(yes);
                Ok(())
            }
            _ => bail!("Expected Delete command"),
        }
    }
}
