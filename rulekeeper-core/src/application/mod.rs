// rulekeeper-core/src/application/mod.rs

pub mod analysis;
pub mod catalog;
pub mod coalesce;
pub mod context;
pub mod execution;
pub mod navigation;
pub mod rules;
pub mod suggestions;

#[cfg(test)]
pub(crate) mod testing;

// --- RE-EXPORTS (FACADE PATTERN) ---

pub use analysis::{AnalysisOutcome, analyze_table};
pub use catalog::{TableOverview, list_visible_tables, load_table_overview, table_has_rules};
pub use coalesce::{Coalescer, CoalescingBackend};
pub use context::ConnectionContext;
pub use execution::{check_rule_outdated, execute_selected};
pub use navigation::{NavigationScope, ViewTicket};
pub use rules::{TableRules, delete_rule, generate_from_description, generate_rules, save_edit};
pub use suggestions::{ApplyOutcome, SuggestionPhase, SuggestionSession};
