use serde::Serialize;

pub const DEFAULT_ACTION: &str = "Close";
pub const DEFAULT_DURATION_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
}

impl Notification {
    /// Snackbar-style message with the default close action and duration.
    pub fn snackbar(severity: Severity, message: impl Into<String>, action: impl Into<String>) -> Self {
        Notification {
            severity,
            message: message.into(),
            action: Some(action.into()),
            duration_ms: Some(DEFAULT_DURATION_MS),
        }
    }
}

/// Fire-and-forget sink for user-facing messages.
pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Collects notifications until the response carrying them is written.
#[derive(Debug, Default)]
pub struct NotificationQueue {
    pending: Vec<Notification>,
}

impl NotificationQueue {
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

impl Notifier for NotificationQueue {
    fn notify(&mut self, notification: Notification) {
        tracing::debug!(severity = ?notification.severity, message = %notification.message, "notification queued");
        self.pending.push(notification);
    }
}
