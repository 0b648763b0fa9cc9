// File: src/feedback/toast.rs
// Purpose: Toast notifications and the page-level container model

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Toast severity; drives styling and the default title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Info,
    Success,
    Error,
}

impl Severity {
    /// Lenient parse for values coming from page scripts; unknown is `Info`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" | "danger" => Severity::Error,
            _ => Severity::Info,
        }
    }

    pub fn default_title(self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Success => "Success",
            Severity::Error => "Error",
        }
    }

    /// Modifier class applied to the toast panel
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "fe-toast-info",
            Severity::Success => "fe-toast-success",
            Severity::Error => "fe-toast-error",
        }
    }
}

/// How long a toast stays up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLifetime {
    Timed(Duration),
    /// Stays until the user closes it
    Sticky,
}

impl ToastLifetime {
    /// Zero or negative means sticky
    pub fn from_millis(ms: i64) -> Self {
        if ms <= 0 {
            ToastLifetime::Sticky
        } else {
            ToastLifetime::Timed(Duration::from_millis(ms as u64))
        }
    }

    pub fn duration(self) -> Option<Duration> {
        match self {
            ToastLifetime::Timed(d) => Some(d),
            ToastLifetime::Sticky => None,
        }
    }
}

impl Default for ToastLifetime {
    fn default() -> Self {
        ToastLifetime::Timed(Duration::from_millis(5000))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub message: String,
    pub severity: Severity,
    pub lifetime: ToastLifetime,
}

impl Toast {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            title: severity.default_title().to_string(),
            message: message.into(),
            severity,
            lifetime: ToastLifetime::default(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_lifetime(mut self, lifetime: ToastLifetime) -> Self {
        self.lifetime = lifetime;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    id: ToastId,
    toast: Toast,
    expires_at: Option<Duration>,
}

/// Live toasts in the shared container, oldest first.
///
/// Timestamps are offsets from any fixed origin the caller picks
/// (the browser uses `Date.now()`).
#[derive(Debug, Default)]
pub struct ToastStack {
    next_id: u64,
    entries: Vec<Entry>,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a toast shown at `now`
    pub fn push(&mut self, toast: Toast, now: Duration) -> ToastId {
        self.next_id += 1;
        let id = ToastId(self.next_id);
        let expires_at = toast.lifetime.duration().map(|d| now + d);
        tracing::debug!(%id, severity = ?toast.severity, "toast shown");
        self.entries.push(Entry {
            id,
            toast,
            expires_at,
        });
        id
    }

    /// Remove a toast. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove every timed toast whose lifetime has elapsed at `now`
    pub fn expire(&mut self, now: Duration) -> Vec<ToastId> {
        let mut expired = Vec::new();
        self.entries.retain(|e| match e.expires_at {
            Some(at) if at <= now => {
                expired.push(e.id);
                false
            }
            _ => true,
        });
        expired
    }

    pub fn contains(&self, id: ToastId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.entries.iter().find(|e| e.id == id).map(|e| &e.toast)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ToastId, &Toast)> {
        self.entries.iter().map(|e| (e.id, &e.toast))
    }
}
