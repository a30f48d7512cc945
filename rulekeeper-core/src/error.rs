// rulekeeper-core/src/error.rs

use std::sync::Arc;

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RulekeeperError {
    // --- DOMAIN (rule model, selections, session misuse) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- INFRASTRUCTURE (HTTP, config files) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // A failure shared by every caller of a coalesced request.
    #[error(transparent)]
    Coalesced(Arc<RulekeeperError>),

    #[error("Internal Error: {0}")]
    InternalError(String),
}

impl RulekeeperError {
    /// Backend `detail` message when the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Infrastructure(InfrastructureError::Status { detail, .. }) => detail.as_deref(),
            Self::Coalesced(inner) => inner.detail(),
            _ => None,
        }
    }

    /// String to show next to the action that failed.
    pub fn user_message(&self) -> String {
        match self.detail() {
            Some(detail) => detail.to_string(),
            None => self.to_string(),
        }
    }

    /// HTTP status of a non-2xx response, if that is what failed.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Infrastructure(InfrastructureError::Status { status, .. }) => Some(*status),
            Self::Coalesced(inner) => inner.status(),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RulekeeperError {
    fn from(err: std::io::Error) -> Self {
        RulekeeperError::Infrastructure(InfrastructureError::Io(err))
    }
}
