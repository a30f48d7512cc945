// rulekeeper/src/commands/mod.rs

pub mod analyze;
pub mod catalog;
pub mod execute;
pub mod rules;
pub mod suggestions;

use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use miette::Diagnostic;
use rulekeeper_core::RulekeeperError;
use rulekeeper_core::application::CoalescingBackend;
use rulekeeper_core::infrastructure::config::{ClientConfig, load_client_config};
use rulekeeper_core::infrastructure::http::HttpBackend;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Configuration and backend shared by every subcommand.
pub struct Console {
    pub config: ClientConfig,
    pub backend: CoalescingBackend<HttpBackend>,
}

impl Console {
    pub fn open(global: &GlobalArgs) -> anyhow::Result<Self> {
        let mut config = load_client_config(Some(&global.config_dir)).with_context(|| {
            format!("Failed to load configuration from {:?}", global.config_dir)
        })?;
        if let Some(url) = &global.api_url {
            config = config
                .with_base_url(url.as_str())
                .with_context(|| format!("Invalid --api-url '{}'", url))?;
        }
        debug!("Backend at {}", config.api_base_url);

        let backend = HttpBackend::from_config(&config)?;
        Ok(Self {
            config,
            backend: CoalescingBackend::new(backend),
        })
    }
}

pub fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// The error text shown to the user: context first, then the backend's
/// `detail` verbatim when the failure carried one.
pub fn describe_error(err: &anyhow::Error) -> String {
    let mut parts = Vec::new();
    for cause in err.chain() {
        if let Some(rk) = cause.downcast_ref::<RulekeeperError>() {
            parts.push(rk.user_message());
            break;
        }
        parts.push(cause.to_string());
    }
    parts.join(": ")
}

/// Help text attached to a domain error, if any.
pub fn error_help(err: &anyhow::Error) -> Option<String> {
    match err.downcast_ref::<RulekeeperError>()? {
        RulekeeperError::Domain(domain) => domain.help().map(|help| help.to_string()),
        _ => None,
    }
}
