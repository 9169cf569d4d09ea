//! Transient user notifications.
//!
//! At most one alert is visible. A new alert replaces the current one, and
//! every alert disappears after the channel's time-to-live unless it is
//! dismissed first. Expiry is evaluated lazily against [`tokio::time::Instant`],
//! so paused-clock tests can drive it without background timers.
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

#[derive(Debug, Clone)]
struct ActiveAlert {
    alert: Alert,
    /// `None` when the time-to-live reaches past the clock's range.
    expires_at: Option<Instant>,
}

#[derive(Debug, Clone)]
pub struct AlertChannel {
    current: Option<ActiveAlert>,
    ttl: Duration,
}

impl AlertChannel {
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3);

    pub fn new(ttl: Duration) -> Self {
        Self { current: None, ttl }
    }

    /// Shows `alert`, replacing whatever was visible.
    pub fn show(&mut self, alert: Alert) {
        debug!(severity = ?alert.severity, message = %alert.message, "Showing alert");
        self.current = Some(ActiveAlert {
            alert,
            expires_at: Instant::now().checked_add(self.ttl),
        });
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.show(Alert::success(message))
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.show(Alert::error(message))
    }

    /// Hides the visible alert. Calling it again, or after expiry, does nothing.
    pub fn dismiss(&mut self) {
        if let Some(active) = self.current.take() {
            debug!(message = %active.alert.message, "Dismissed alert");
        }
    }

    /// The visible alert, if it has not expired.
    pub fn current(&mut self) -> Option<&Alert> {
        let expired = self
            .current
            .as_ref()
            .and_then(|active| active.expires_at)
            .is_some_and(|at| Instant::now() >= at);
        if expired {
            self.current = None;
        }
        self.current.as_ref().map(|active| &active.alert)
    }
}

impl Default for AlertChannel {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TTL)
    }
}
