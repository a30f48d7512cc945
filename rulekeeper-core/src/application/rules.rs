// rulekeeper-core/src/application/rules.rs

use tracing::{debug, info, instrument};

use crate::domain::rules::{Rule, RuleId, rules_for_table};
use crate::domain::view::{ConfirmedDelete, EditDialog, GenerateDialog};
use crate::error::RulekeeperError;
use crate::ports::backend::QualityBackend;

/// The rule list of one table, as the table view shows it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableRules {
    table_name: String,
    rules: Vec<Rule>,
}

impl TableRules {
    pub fn new(table_name: impl Into<String>, rules: Vec<Rule>) -> Self {
        let table_name = table_name.into();
        let rules = rules_for_table(rules, &table_name);
        Self { table_name, rules }
    }

    pub async fn load(
        backend: &dyn QualityBackend,
        table_name: &str,
    ) -> Result<Self, RulekeeperError> {
        Ok(Self::new(table_name, backend.list_rules().await?))
    }

    /// Replaces the list with the backend's current one.
    #[instrument(skip(self, backend), fields(table = %self.table_name))]
    pub async fn refresh(&mut self, backend: &dyn QualityBackend) -> Result<(), RulekeeperError> {
        self.rules = rules_for_table(backend.list_rules().await?, &self.table_name);
        info!("🔄 {} rules loaded", self.rules.len());
        Ok(())
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, rule_id: RuleId) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == rule_id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Inserts or replaces `rule` by id. Rules of other tables are ignored.
    pub fn upsert(&mut self, rule: Rule) -> bool {
        if rule.table_name != self.table_name {
            debug!("Ignoring rule {} of table {}", rule.id, rule.table_name);
            return false;
        }
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        true
    }

    /// Upserts every rule, returning how many belonged to this table.
    pub fn absorb<'a>(&mut self, rules: impl IntoIterator<Item = &'a Rule>) -> usize {
        rules
            .into_iter()
            .filter(|rule| self.upsert((*rule).clone()))
            .count()
    }

    pub fn remove(&mut self, rule_id: RuleId) -> Option<Rule> {
        let index = self.rules.iter().position(|r| r.id == rule_id)?;
        Some(self.rules.remove(index))
    }
}

/// Bulk generation for the board's table, then a refresh.
#[instrument(skip_all, fields(table = %board.table_name()))]
pub async fn generate_rules(
    backend: &dyn QualityBackend,
    board: &mut TableRules,
) -> Result<Vec<Rule>, RulekeeperError> {
    let generated = backend.generate_rules(board.table_name()).await?;
    info!("✨ {} rules generated", generated.len());
    board.refresh(backend).await?;
    Ok(generated)
}

/// Sends the dialog's description. A failure is also recorded on the
/// dialog, which keeps its inputs; success resets it.
#[instrument(skip_all, fields(table = %board.table_name()))]
pub async fn generate_from_description(
    backend: &dyn QualityBackend,
    dialog: &mut GenerateDialog,
    board: &mut TableRules,
) -> Result<Rule, RulekeeperError> {
    let outcome = match dialog.request(board.table_name()) {
        Ok(request) => backend.generate_rule_from_description(&request).await,
        Err(err) => Err(err.into()),
    };

    match outcome {
        Ok(rule) => {
            info!("✨ Rule {} '{}' generated", rule.id, rule.name);
            dialog.reset();
            board.refresh(backend).await?;
            Ok(rule)
        }
        Err(err) => {
            dialog.fail(err.user_message());
            Err(err)
        }
    }
}

/// Submits the open editor and closes it on success.
#[instrument(skip_all)]
pub async fn save_edit(
    backend: &dyn QualityBackend,
    dialog: &mut EditDialog,
    board: &mut TableRules,
) -> Result<Rule, RulekeeperError> {
    let (rule_id, request) = dialog.submit()?;
    debug!(
        "Updating rule {} (config changed: {})",
        rule_id,
        request.rule_config.is_some()
    );
    let updated = backend.update_rule(rule_id, &request).await?;
    board.upsert(updated.clone());
    dialog.close();
    Ok(updated)
}

#[instrument(skip_all, fields(rule_id = confirmed.rule_id()))]
pub async fn delete_rule(
    backend: &dyn QualityBackend,
    confirmed: ConfirmedDelete,
    board: &mut TableRules,
) -> Result<(), RulekeeperError> {
    backend.delete_rule(confirmed.rule_id()).await?;
    board.remove(confirmed.rule_id());
    info!("🗑️  Rule {} deleted", confirmed.rule_id());
    Ok(())
}
