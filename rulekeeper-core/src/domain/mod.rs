// rulekeeper-core/src/domain/mod.rs

pub mod analysis;
pub mod catalog;
pub mod error;
pub mod execution;
mod nullable;
pub mod rules;
pub mod suggestion;
pub mod view;

pub use error::DomainError;
