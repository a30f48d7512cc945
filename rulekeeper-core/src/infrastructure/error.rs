// rulekeeper-core/src/infrastructure/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- HTTP ---
    #[error("Network Error: {0}")]
    #[diagnostic(
        code(rulekeeper::infra::network),
        help("Is the rules backend running at the configured base URL?")
    )]
    Network(#[from] reqwest::Error),

    #[error("Backend returned HTTP {status}")]
    #[diagnostic(code(rulekeeper::infra::status))]
    Status { status: u16, detail: Option<String> },

    #[error("Could not decode the answer of {path}: {message}")]
    #[diagnostic(
        code(rulekeeper::infra::decode),
        help("The backend answered with a shape this client does not understand.")
    )]
    Decode { path: String, message: String },

    #[error("Invalid backend URL '{0}'")]
    #[diagnostic(
        code(rulekeeper::infra::base_url),
        help("Use an absolute URL such as http://localhost:8000")
    )]
    InvalidBaseUrl(String),

    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(code(rulekeeper::infra::io))]
    Io(#[from] std::io::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(rulekeeper::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(rulekeeper::infra::config))]
    ConfigError(String),
}
