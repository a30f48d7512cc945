// rulekeeper-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("A rule configuration needs at least one expectation")]
    #[diagnostic(code(rulekeeper::domain::empty_rule_config))]
    EmptyRuleConfig,

    #[error("Editing a rule supports one or two columns, {count} were selected")]
    #[diagnostic(
        code(rulekeeper::domain::column_selection),
        help("Pick one column for a not-null rule, or two (lower bound first) for a comparison rule.")
    )]
    UnsupportedColumnSelection { count: usize },

    #[error("Nothing selected: {0}")]
    #[diagnostic(code(rulekeeper::domain::nothing_selected))]
    NothingSelected(String),

    #[error("Invalid state: expected {expected}, found {actual}")]
    #[diagnostic(code(rulekeeper::domain::state))]
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Rule description cannot be blank")]
    #[diagnostic(code(rulekeeper::domain::blank_description))]
    BlankDescription,
}
