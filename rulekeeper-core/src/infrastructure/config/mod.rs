// rulekeeper-core/src/infrastructure/config/mod.rs

pub mod client;

pub use client::{BASE_URL_ENV, ClientConfig, load_client_config, load_client_config_with};
