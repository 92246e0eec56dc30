//! User-facing alerts.
//!
//! Every completed action ends in either new state or an [`Alert`]; the
//! front-end decides how to show it.

use std::fmt;

/// Severity of an [`Alert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Success,
    Warning,
    Error,
}

/// A blocking message for the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

impl Alert {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Success,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Warning,
            title: title.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.level, AlertLevel::Error)
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}
