// rulekeeper-core/src/application/context.rs

use tracing::{info, instrument};

use crate::domain::catalog::ConnectionStatus;
use crate::error::RulekeeperError;
use crate::ports::backend::QualityBackend;

/// The "currently connected database", owned by whoever drives the console
/// and passed to the code that needs it.
#[derive(Debug, Clone, Default)]
pub struct ConnectionContext {
    current: Option<ConnectionStatus>,
}

impl ConnectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the backend to connect and remembers the answer. A failed
    /// attempt leaves the previous state untouched.
    #[instrument(skip(self, backend))]
    pub async fn establish(
        &mut self,
        backend: &dyn QualityBackend,
    ) -> Result<&ConnectionStatus, RulekeeperError> {
        let status = backend.connect().await?;
        info!(
            "🔌 Connected to {} ({} tables)",
            status.database_url,
            status.tables.len()
        );
        Ok(self.current.insert(status))
    }

    pub fn current(&self) -> Option<&ConnectionStatus> {
        self.current.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.current.is_some()
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
