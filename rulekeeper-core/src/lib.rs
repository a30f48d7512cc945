// rulekeeper-core/src/lib.rs

#![allow(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- HEXAGONAL MODULES ---

// Contracts towards the rules backend (one method per HTTP operation).
pub mod ports;

// Resource shapes, rule-model operations and view-state containers.
// Depends on nothing else in the crate.
pub mod domain;

// reqwest transport, HTTP adapter, configuration loading.
pub mod infrastructure;

// Use cases: connection, catalog, rules, execution, suggestions, analysis.
pub mod application;

pub mod error;

// --- RE-EXPORTS (FACADE) ---
pub use error::RulekeeperError;
pub use ports::QualityBackend;
