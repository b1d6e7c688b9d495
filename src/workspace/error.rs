//! Workspace error types

use thiserror::Error;

/// Errors that can occur when talking to the workspace
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Transport-level failure (connect, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with an error status
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not have the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl WorkspaceError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }
}
