// rulekeeper-core/src/application/analysis.rs

use tracing::{info, instrument, warn};

use crate::application::rules::TableRules;
use crate::domain::analysis::{AnalyzeTableRequest, TableAnalysis};
use crate::error::RulekeeperError;
use crate::ports::backend::QualityBackend;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub analysis: TableAnalysis,
    /// Set when suggestions were applied and the rule list was reloaded.
    pub refreshed_rules: bool,
}

/// Analyzes a table, optionally applying the suggestions in the same
/// request. When the backend reports applied suggestions, `board` absorbs
/// the changed rules and is then reloaded from the backend.
#[instrument(skip(backend, board))]
pub async fn analyze_table(
    backend: &dyn QualityBackend,
    table_name: &str,
    apply_suggestions: bool,
    board: &mut TableRules,
) -> Result<AnalysisOutcome, RulekeeperError> {
    let request = AnalyzeTableRequest {
        table_name: table_name.to_string(),
        apply_suggestions,
    };
    let analysis = backend.analyze_table(&request).await?;
    info!(
        "🔬 {}: {} rows, {} columns",
        analysis.table_name,
        analysis.data_statistics.row_count,
        analysis.column_analysis.columns.len()
    );

    let refreshed_rules = match &analysis.applied_suggestions {
        Some(applied) => {
            for error in &applied.errors {
                warn!("⚠️  Suggestion not applied: {}", error);
            }
            board.absorb(applied.changed_rules());
            board.refresh(backend).await?;
            true
        }
        None => false,
    };

    Ok(AnalysisOutcome {
        analysis,
        refreshed_rules,
    })
}
