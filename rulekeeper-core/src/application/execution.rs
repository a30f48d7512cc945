// rulekeeper-core/src/application/execution.rs

use tracing::{info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::execution::RuleExecutionResult;
use crate::domain::rules::{ExecuteRulesRequest, OutdatedCheck, RuleId};
use crate::domain::view::Selection;
use crate::error::RulekeeperError;
use crate::ports::backend::QualityBackend;

/// Runs the selected rules against `table_name`, in selection order.
/// An empty selection is refused before anything is sent.
#[instrument(skip(backend, selection), fields(selected = selection.len()))]
pub async fn execute_selected(
    backend: &dyn QualityBackend,
    table_name: &str,
    selection: &Selection<RuleId>,
) -> Result<RuleExecutionResult, RulekeeperError> {
    if selection.is_empty() {
        return Err(
            DomainError::NothingSelected("select at least one rule to execute".into()).into(),
        );
    }

    let request = ExecuteRulesRequest {
        table_name: table_name.to_string(),
        rule_ids: selection.to_vec(),
    };
    let result = backend.execute_rules(&request).await?;

    let computed = result.computed_success_rate();
    if (result.success_rate - computed).abs() > 1e-9 {
        warn!(
            "Reported success rate {} differs from {}/{}",
            result.success_rate, result.successful_rules, result.total_rules
        );
    }
    info!(
        "▶️  {}/{} rules passed in {:.2}s",
        result.successful_rules, result.total_rules, result.total_duration
    );
    Ok(result)
}

#[instrument(skip(backend))]
pub async fn check_rule_outdated(
    backend: &dyn QualityBackend,
    rule_id: RuleId,
) -> Result<OutdatedCheck, RulekeeperError> {
    let check = backend.check_rule_outdated(rule_id).await?;
    if check.is_outdated {
        info!(
            "⚠️  Rule {} looks outdated ({:.0}% confidence)",
            rule_id,
            check.confidence * 100.0
        );
    }
    Ok(check)
}
