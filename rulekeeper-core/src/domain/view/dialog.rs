// rulekeeper-core/src/domain/view/dialog.rs

use crate::domain::error::DomainError;
use crate::domain::rules::{
    GenerateFromDescriptionRequest, Rule, RuleEditForm, RuleId, UpdateRuleRequest,
    build_update_request,
};

/// State of the rule editor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditDialog {
    #[default]
    Closed,
    Open {
        rule: Box<Rule>,
        form: RuleEditForm,
    },
}

impl EditDialog {
    /// Opens the editor pre-filled from `rule`.
    pub fn open(rule: Rule) -> Self {
        let form = RuleEditForm::from_rule(&rule);
        Self::Open {
            rule: Box::new(rule),
            form,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn form(&self) -> Option<&RuleEditForm> {
        match self {
            Self::Open { form, .. } => Some(form),
            Self::Closed => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut RuleEditForm> {
        match self {
            Self::Open { form, .. } => Some(form),
            Self::Closed => None,
        }
    }

    /// The update to send for the rule being edited.
    pub fn submit(&self) -> Result<(RuleId, UpdateRuleRequest), DomainError> {
        match self {
            Self::Open { rule, form } => Ok((rule.id, build_update_request(form, rule)?)),
            Self::Closed => Err(DomainError::InvalidState {
                expected: "open editor",
                actual: "closed editor",
            }),
        }
    }

    pub fn close(&mut self) {
        *self = Self::Closed;
    }
}

/// State of the "generate rule from description" dialog.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerateDialog {
    pub description: String,
    pub name: String,
    pub error: Option<String>,
}

impl GenerateDialog {
    pub fn request(&self, table_name: &str) -> Result<GenerateFromDescriptionRequest, DomainError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(DomainError::BlankDescription);
        }
        let name = self.name.trim();
        Ok(GenerateFromDescriptionRequest {
            table_name: table_name.to_string(),
            rule_description: description.to_string(),
            rule_name: (!name.is_empty()).then(|| name.to_string()),
        })
    }

    /// Keeps the inputs and shows `message`.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A delete the user asked for but has not confirmed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteIntent {
    rule_id: RuleId,
}

/// A delete the user confirmed. Only this reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmedDelete {
    rule_id: RuleId,
}

impl DeleteIntent {
    pub fn new(rule_id: RuleId) -> Self {
        Self { rule_id }
    }

    pub fn rule_id(&self) -> RuleId {
        self.rule_id
    }

    pub fn confirm(self) -> ConfirmedDelete {
        ConfirmedDelete {
            rule_id: self.rule_id,
        }
    }

    /// Confirms when `answer` is yes.
    pub fn resolve(self, answer: bool) -> Option<ConfirmedDelete> {
        answer.then(|| self.confirm())
    }
}

impl ConfirmedDelete {
    pub fn rule_id(&self) -> RuleId {
        self.rule_id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule() -> Rule {
        serde_json::from_value(json!({
            "id": 21,
            "name": "age present",
            "description": "age must be set",
            "table_name": "people",
            "rule_config": {"expectation_type": "expect_column_values_to_not_be_null",
                            "kwargs": {"column": "age"}},
            "is_active": true
        }))
        .unwrap()
    }

    #[test]
    fn test_edit_dialog_round_trip() {
        let mut dialog = EditDialog::open(rule());
        assert!(dialog.is_open());
        assert_eq!(dialog.form().unwrap().columns, vec!["age"]);

        let form = dialog.form_mut().unwrap();
        form.columns = vec!["born_on".into(), "died_on".into()];
        form.is_active = false;

        let (id, request) = dialog.submit().unwrap();
        assert_eq!(id, 21);
        assert_eq!(request.is_active, Some(false));
        assert_eq!(request.rule_config.unwrap().len(), 3);

        dialog.close();
        assert!(!dialog.is_open());
        assert!(matches!(
            dialog.submit(),
            Err(DomainError::InvalidState { .. })
        ));
    }

    #[test]
    fn test_generate_dialog_rejects_blank_description() {
        let dialog = GenerateDialog {
            description: "   ".into(),
            ..Default::default()
        };
        assert!(matches!(
            dialog.request("orders"),
            Err(DomainError::BlankDescription)
        ));
    }

    #[test]
    fn test_generate_dialog_omits_empty_name() {
        let mut dialog = GenerateDialog {
            description: " totals are positive ".into(),
            name: "".into(),
            error: None,
        };
        let request = dialog.request("orders").unwrap();
        assert_eq!(request.rule_description, "totals are positive");
        assert_eq!(request.rule_name, None);
        assert!(serde_json::to_value(&request).unwrap().get("rule_name").is_none());

        dialog.fail("Table not found");
        assert_eq!(dialog.error.as_deref(), Some("Table not found"));
        dialog.reset();
        assert!(dialog.description.is_empty());
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let intent = DeleteIntent::new(8);
        assert_eq!(intent.resolve(false), None);
        assert_eq!(intent.resolve(true).map(|c| c.rule_id()), Some(8));
    }
}
