use std::sync::{Arc, Mutex};

use uuid::Uuid;

use crate::events::AuditEvent;

/// Per-session audit sink.
///
/// Cloning shares the session id and, for recording instances, the
/// captured event list.
#[derive(Debug, Clone)]
pub struct Telemetry {
    user_sub: String,
    session_id: Uuid,
    enabled: bool,
    recorded: Option<Arc<Mutex<Vec<AuditEvent>>>>,
}

impl Telemetry {
    pub fn new(user_sub: impl Into<String>) -> Self {
        Self {
            user_sub: user_sub.into(),
            session_id: Uuid::new_v4(),
            enabled: true,
            recorded: None,
        }
    }

    /// Emits nothing. For callers that opted out of audit logging.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new("")
        }
    }

    /// Emits as usual and also keeps every event for [`Telemetry::events`].
    pub fn recording(user_sub: impl Into<String>) -> Self {
        Self {
            recorded: Some(Arc::new(Mutex::new(Vec::new()))),
            ..Self::new(user_sub)
        }
    }

    pub fn user_sub(&self) -> &str {
        &self.user_sub
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Stamp the event with this session and emit it.
    pub fn record(&self, mut event: AuditEvent) {
        if !self.enabled {
            return;
        }
        event.user_sub = self.user_sub.clone();
        event.session_id = self.session_id.to_string();
        event.emit();

        if let Some(recorded) = &self.recorded {
            match recorded.lock() {
                Ok(mut events) => events.push(event),
                Err(poisoned) => poisoned.into_inner().push(event),
            }
        }
    }

    /// Events captured so far. Empty unless built with [`Telemetry::recording`].
    pub fn events(&self) -> Vec<AuditEvent> {
        match &self.recorded {
            Some(recorded) => match recorded.lock() {
                Ok(events) => events.clone(),
                Err(poisoned) => poisoned.into_inner().clone(),
            },
            None => Vec::new(),
        }
    }
}
