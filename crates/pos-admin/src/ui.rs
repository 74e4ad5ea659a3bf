//! # Notifications & Navigation
//!
//! The pages report to the operator through [`Notifier`] (blocking alerts on
//! the add-product page, transient toasts on the sell page) and leave through
//! [`Navigator`]. Both are fire-and-forget.
//!
//! The `Tracing*` implementations log; the `*Log` implementations record
//! what was shown so tests and the demo can inspect it.

use parking_lot::Mutex;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

impl Display for ToastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToastLevel::Success => write!(f, "success"),
            ToastLevel::Error => write!(f, "error"),
        }
    }
}

/// One message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Alert(String),
    Toast(ToastLevel, String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Alert(message) | Notification::Toast(_, message) => message,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
    fn toast(&self, level: ToastLevel, message: &str);
}

pub trait Navigator: Send + Sync {
    fn redirect(&self, route: &str);
}

/// Writes every notification to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        info!(text = message, "Alert");
    }

    fn toast(&self, level: ToastLevel, message: &str) {
        match level {
            ToastLevel::Success => info!(%level, text = message, "Toast"),
            ToastLevel::Error => error!(%level, text = message, "Toast"),
        }
    }
}

/// Keeps every notification in order. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.lock().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl Notifier for NotificationLog {
    fn alert(&self, message: &str) {
        self.entries
            .lock()
            .push(Notification::Alert(message.to_string()));
    }

    fn toast(&self, level: ToastLevel, message: &str) {
        self.entries
            .lock()
            .push(Notification::Toast(level, message.to_string()));
    }
}

/// Logs redirects.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn redirect(&self, route: &str) {
        warn!(route, "Redirect");
    }
}

/// Keeps every redirect target in order.
#[derive(Debug, Clone, Default)]
pub struct NavigationLog {
    routes: Arc<Mutex<Vec<String>>>,
}

impl NavigationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<String> {
        self.routes.lock().clone()
    }
}

impl Navigator for NavigationLog {
    fn redirect(&self, route: &str) {
        self.routes.lock().push(route.to_string());
    }
}
