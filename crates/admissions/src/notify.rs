//! User-facing notification seam. The service never renders toasts itself;
//! it hands structured notifications to an injected sink.

/// How prominently a notification should be surfaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Warning,
    Error,
}

/// One transient user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Sink for transient notifications (toast rail, log line, test recorder).
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
