// rulekeeper-core/src/application/navigation.rs

use tracing::warn;

/// Proof that a request was issued while `subject` was on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewTicket {
    generation: u64,
    subject: String,
}

impl ViewTicket {
    pub fn subject(&self) -> &str {
        &self.subject
    }
}

/// Tracks what the user is looking at so that answers to requests issued
/// for an earlier screen are dropped instead of overwriting the current one.
/// In-flight requests are never cancelled; their answers just lose.
#[derive(Debug, Default)]
pub struct NavigationScope {
    generation: u64,
    subject: Option<String>,
}

impl NavigationScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to `subject` (a table name) and returns the ticket for
    /// requests issued from there.
    pub fn navigate(&mut self, subject: impl Into<String>) -> ViewTicket {
        self.generation += 1;
        let subject = subject.into();
        self.subject = Some(subject.clone());
        ViewTicket {
            generation: self.generation,
            subject,
        }
    }

    /// A ticket for the current screen, without navigating.
    pub fn ticket(&self) -> Option<ViewTicket> {
        self.subject.as_ref().map(|subject| ViewTicket {
            generation: self.generation,
            subject: subject.clone(),
        })
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn is_current(&self, ticket: &ViewTicket) -> bool {
        ticket.generation == self.generation
            && self.subject.as_deref() == Some(ticket.subject.as_str())
    }

    /// Stores `value` into `slot` only when `ticket` is still current.
    pub fn commit<T>(&self, ticket: &ViewTicket, value: T, slot: &mut Option<T>) -> bool {
        if self.is_current(ticket) {
            *slot = Some(value);
            true
        } else {
            warn!(
                "Discarding stale response for '{}' (now on {:?})",
                ticket.subject, self.subject
            );
            false
        }
    }
}
