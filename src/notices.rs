//! Notices
//!
//! User-visible confirmations and complaints. The engine only produces
//! these; displaying them (toasts, status bars) is the embedder's concern.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral information.
    Info,

    /// A mutation succeeded.
    Success,

    /// A request was refused; no state changed.
    Error,
}

/// A short user-facing message with a severity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Presentation level.
    pub severity: Severity,

    /// Message text.
    pub message: String,
}

impl Notice {
    /// An informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// A success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.message)
    }
}
