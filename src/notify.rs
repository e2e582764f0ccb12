//! Build failure notifications.
//!
//! The bundler's error reporter calls [`NotifierCallback::on_errors`] with a
//! severity and the errors it collected. Only errors notify; warnings are
//! dropped. The first error becomes a [`Notification`] which is handed to a
//! [`Notifier`] for delivery. Drawing the notification is the notifier's
//! business; [`LogNotifier`] just writes it to the log.

use crate::config::NotifierConfig;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// An error as reported by the bundler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildError {
    pub name: String,
    /// Module request, possibly prefixed with loaders: `a-loader!b-loader!./src/app.js`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl BuildError {
    /// The resource part of the file request, with loader prefixes removed.
    pub fn resource(&self) -> Option<&str> {
        self.file.as_deref().and_then(|f| f.rsplit('!').next())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub subtitle: String,
    pub icon: String,
}

/// Delivers notifications.
pub trait Notifier {
    fn notify(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Writes notifications to the log at warn level.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, n: &Notification) -> Result<(), NotifyError> {
        tracing::warn!(title = %n.title, subtitle = %n.subtitle, "{}", n.message);
        Ok(())
    }
}

/// Keeps every notification it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, n: &Notification) -> Result<(), NotifyError> {
        self.sent.borrow_mut().push(n.clone());
        Ok(())
    }
}

/// Turns bundler error reports into notifications.
pub struct NotifierCallback<N: Notifier> {
    title: String,
    icon: String,
    notifier: N,
}

impl<N: Notifier> NotifierCallback<N> {
    pub fn new(title: impl Into<String>, icon: impl Into<String>, notifier: N) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            notifier,
        }
    }

    pub fn from_config(config: &NotifierConfig, notifier: N) -> Self {
        Self::new(&config.title, &config.icon, notifier)
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Build the notification for a report, or `None` if it shouldn't notify.
    pub fn notification_for(&self, severity: Severity, errors: &[BuildError]) -> Option<Notification> {
        if severity != Severity::Error {
            return None;
        }
        let error = errors.first()?;
        Some(Notification {
            title: self.title.clone(),
            message: format!("{severity}: {}", error.name),
            subtitle: error.resource().unwrap_or_default().to_string(),
            icon: self.icon.clone(),
        })
    }

    /// Handle a report. Returns whether a notification was sent.
    pub fn on_errors(&self, severity: Severity, errors: &[BuildError]) -> Result<bool, NotifyError> {
        match self.notification_for(severity, errors) {
            Some(notification) => {
                self.notifier.notify(&notification)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
