// rulekeeper-core/src/domain/rules/mod.rs

pub mod config;
pub mod edit;
pub mod expectation;
pub mod requests;
pub mod rule;

pub use config::RuleConfig;
pub use edit::{RuleEditForm, UpdateRuleRequest, build_update_request, config_for_columns};
pub use expectation::{Expectation, ExpectationKind, RawExpectation};
pub use requests::{ExecuteRulesRequest, GenerateFromDescriptionRequest, OutdatedCheck};
pub use rule::{Rule, RuleId, columns_of, ordered_columns, rules_for_table};
