//! Error types shared by the reconciliation, favorites and catalog layers.

use thiserror::Error;

/// Result type alias for tourdesk operations.
pub type Result<T> = std::result::Result<T, TourdeskError>;

/// Errors surfaced by the client core.
///
/// None of these are process-fatal: every failure leaves local state
/// re-editable, and callers decide whether to retry or show a message.
#[derive(Debug, Error)]
pub enum TourdeskError {
    /// Transport or connectivity failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An existing remote resource could not be re-fetched for a replace.
    #[error("Could not materialize {locator}: {reason}")]
    Materialization {
        /// Locator of the resource that failed.
        locator: String,
        /// What went wrong while fetching it.
        reason: String,
    },

    /// Malformed edit state, rejected before any network call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Backend rejected the operation against stale state.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Backend returned a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body returned by the backend.
        message: String,
    },

    /// Response body could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TourdeskError {
    /// Returns true if retrying the same call may succeed.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Materialization { .. } => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Creates an API error from a status code and message.
    #[must_use]
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates a materialization error for a locator.
    #[must_use]
    pub fn materialization(locator: impl Into<String>, reason: impl ToString) -> Self {
        Self::Materialization {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }

    /// Message suitable for showing to an end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(_) => "Could not reach the server. Please try again.".to_string(),
            Self::Materialization { locator, .. } => {
                format!("Could not reload image {locator}. Nothing was uploaded; please retry.")
            }
            Self::Validation(reason) => reason.clone(),
            Self::Conflict(_) => {
                "The data changed on the server. Reload and try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}
