// rulekeeper-core/src/application/suggestions.rs

use std::mem;
use tracing::{info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::rules::{Rule, RuleId};
use crate::domain::suggestion::{
    ApplySuggestedRulesRequest, ApplySuggestedRulesResponse, SuggestRulesResponse,
};
use crate::domain::view::Selection;
use crate::error::RulekeeperError;
use crate::ports::backend::QualityBackend;

/// `Idle -> Suggesting -> Presenting -> Applying -> Idle`; cancelling from
/// any phase goes back to `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SuggestionPhase {
    #[default]
    Idle,
    Suggesting,
    Presenting(SuggestRulesResponse),
    /// Keeps the suggestions so a failed apply can present them again.
    Applying(SuggestRulesResponse),
}

impl SuggestionPhase {
    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Suggesting => "suggesting",
            Self::Presenting(_) => "presenting",
            Self::Applying(_) => "applying",
        }
    }
}

/// What an apply produced. `errors` next to created or updated rules is a
/// partial success, not a failure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApplyOutcome {
    pub created: Vec<Rule>,
    pub updated: Vec<Rule>,
    pub errors: Vec<String>,
    /// Selected update ids that were not in the presented suggestions.
    pub dropped_updates: Vec<RuleId>,
}

impl ApplyOutcome {
    fn from_response(response: ApplySuggestedRulesResponse, dropped_updates: Vec<RuleId>) -> Self {
        Self {
            created: response.created_rules,
            updated: response.updated_rules,
            errors: response.errors,
            dropped_updates,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn is_partial(&self) -> bool {
        self.has_errors() && !(self.created.is_empty() && self.updated.is_empty())
    }

    pub fn changed_rules(&self) -> impl Iterator<Item = &Rule> {
        self.created.iter().chain(self.updated.iter())
    }
}

/// One suggest/review/apply round for a table.
#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionSession {
    table_name: String,
    phase: SuggestionPhase,
    selected_new: Selection<usize>,
    selected_updates: Selection<RuleId>,
}

impl SuggestionSession {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            phase: SuggestionPhase::Idle,
            selected_new: Selection::new(),
            selected_updates: Selection::new(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn phase(&self) -> &SuggestionPhase {
        &self.phase
    }

    /// The suggestions on screen, while presenting or applying.
    pub fn suggestions(&self) -> Option<&SuggestRulesResponse> {
        match &self.phase {
            SuggestionPhase::Presenting(s) | SuggestionPhase::Applying(s) => Some(s),
            _ => None,
        }
    }

    pub fn selected_new(&self) -> &Selection<usize> {
        &self.selected_new
    }

    pub fn selected_updates(&self) -> &Selection<RuleId> {
        &self.selected_updates
    }

    /// Starts fetching suggestions. Allowed when idle, or when presenting
    /// (fetching again replaces the list and the selections).
    pub fn begin(&mut self) -> Result<(), DomainError> {
        match self.phase {
            SuggestionPhase::Idle | SuggestionPhase::Presenting(_) => {
                self.clear_selections();
                self.phase = SuggestionPhase::Suggesting;
                Ok(())
            }
            _ => Err(self.invalid("idle or presenting")),
        }
    }

    pub fn present(&mut self, suggestions: SuggestRulesResponse) -> Result<(), DomainError> {
        if self.phase != SuggestionPhase::Suggesting {
            return Err(self.invalid("suggesting"));
        }
        info!(
            "💡 {}: {} new, {} update suggestions",
            self.table_name,
            suggestions.new_rule_suggestions.len(),
            suggestions.rule_update_suggestions.len()
        );
        self.phase = SuggestionPhase::Presenting(suggestions);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.clear_selections();
        self.phase = SuggestionPhase::Idle;
    }

    /// Toggles a new-rule suggestion by its position in the list.
    pub fn toggle_new(&mut self, index: usize) -> Result<bool, DomainError> {
        self.ensure_presenting()?;
        Ok(self.selected_new.toggle(index))
    }

    /// Toggles an update suggestion by the id of the rule it changes.
    pub fn toggle_update(&mut self, rule_id: RuleId) -> Result<bool, DomainError> {
        self.ensure_presenting()?;
        Ok(self.selected_updates.toggle(rule_id))
    }

    /// Selects a new-rule suggestion; selecting it twice keeps it selected.
    pub fn select_new(&mut self, index: usize) -> Result<(), DomainError> {
        self.ensure_presenting()?;
        self.selected_new.select(index);
        Ok(())
    }

    pub fn select_update(&mut self, rule_id: RuleId) -> Result<(), DomainError> {
        self.ensure_presenting()?;
        self.selected_updates.select(rule_id);
        Ok(())
    }

    /// Builds the apply body from the selections. Update ids without a
    /// matching suggestion in the presented list are dropped and returned.
    pub fn build_apply_request(
        &mut self,
    ) -> Result<(ApplySuggestedRulesRequest, Vec<RuleId>), DomainError> {
        let suggestions = match &self.phase {
            SuggestionPhase::Presenting(s) => s,
            _ => return Err(self.invalid("presenting")),
        };

        let dropped = self
            .selected_updates
            .retain(|id| suggestions.has_update_for(*id));
        if !dropped.is_empty() {
            warn!("Dropping stale update selections {:?}", dropped);
        }

        if self.selected_new.is_empty() && self.selected_updates.is_empty() {
            return Err(DomainError::NothingSelected(
                "select at least one suggestion to apply".into(),
            ));
        }

        let request = ApplySuggestedRulesRequest {
            table_name: self.table_name.clone(),
            new_rule_ids: self.selected_new.to_vec(),
            update_rule_ids: self.selected_updates.to_vec(),
        };
        Ok((request, dropped))
    }

    /// Fetches suggestions and presents them. A failure returns to idle.
    #[instrument(skip_all, fields(table = %self.table_name))]
    pub async fn suggest(
        &mut self,
        backend: &dyn QualityBackend,
    ) -> Result<&SuggestRulesResponse, RulekeeperError> {
        self.begin()?;
        let fetched = backend.suggest_rules(&self.table_name).await;
        match fetched {
            Ok(suggestions) => {
                self.present(suggestions)?;
                self.suggestions().ok_or_else(|| {
                    RulekeeperError::InternalError("suggestions vanished after presenting".into())
                })
            }
            Err(err) => {
                self.phase = SuggestionPhase::Idle;
                Err(err)
            }
        }
    }

    /// Applies the selected suggestions. On success the session is idle
    /// again, whatever the per-item errors; a failed request keeps the
    /// suggestions and selections on screen.
    #[instrument(skip_all, fields(table = %self.table_name))]
    pub async fn apply(
        &mut self,
        backend: &dyn QualityBackend,
    ) -> Result<ApplyOutcome, RulekeeperError> {
        let (request, dropped) = self.build_apply_request()?;

        let suggestions = match mem::take(&mut self.phase) {
            SuggestionPhase::Presenting(s) => s,
            other => {
                let actual = other.label();
                self.phase = other;
                return Err(DomainError::InvalidState {
                    expected: "presenting",
                    actual,
                }
                .into());
            }
        };
        self.phase = SuggestionPhase::Applying(suggestions);

        let applied = backend.apply_suggested_rules(&request).await;
        match applied {
            Ok(response) => {
                for error in &response.errors {
                    warn!("⚠️  Suggestion not applied: {}", error);
                }
                info!(
                    "✅ {} rules created, {} updated, {} errors",
                    response.created_rules.len(),
                    response.updated_rules.len(),
                    response.errors.len()
                );
                self.cancel();
                Ok(ApplyOutcome::from_response(response, dropped))
            }
            Err(err) => {
                if let SuggestionPhase::Applying(s) = mem::take(&mut self.phase) {
                    self.phase = SuggestionPhase::Presenting(s);
                }
                Err(err)
            }
        }
    }

    fn ensure_presenting(&self) -> Result<(), DomainError> {
        match self.phase {
            SuggestionPhase::Presenting(_) => Ok(()),
            _ => Err(self.invalid("presenting")),
        }
    }

    fn invalid(&self, expected: &'static str) -> DomainError {
        DomainError::InvalidState {
            expected,
            actual: self.phase.label(),
        }
    }

    fn clear_selections(&mut self) {
        self.selected_new.clear();
        self.selected_updates.clear();
    }
}
