// ── Core error types ──
//
// Reconciliation errors. Transport-level failures from sonarsync-api are
// wrapped, not flattened: consumers that care about the HTTP status can
// still reach it through `source()`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Precondition errors ──────────────────────────────────────────
    /// The declaration is inconsistent. Raised before any request.
    #[error("Invalid declaration: {message}")]
    Validation { message: String },

    /// The server edition does not offer this feature.
    #[error("{message}")]
    EditionUnsupported { message: String },

    /// The operation does not exist for this kind of resource.
    #[error("Operation not supported: {operation} ({reason})")]
    Unsupported { operation: String, reason: String },

    // ── Remote errors ────────────────────────────────────────────────
    /// The request failed or the server answered with an unexpected status.
    #[error("Request failed: {0}")]
    Transport(#[source] sonarsync_api::Error),

    /// The response body does not fit the expected shape.
    #[error("Unexpected response body: {message}")]
    Decode { message: String },

    /// Read found no record matching the declaration.
    #[error("{kind} not found: {identity}")]
    NotFound { kind: String, identity: String },
}

impl CoreError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The wrapped API error, if this came from the transport layer.
    pub fn api_error(&self) -> Option<&sonarsync_api::Error> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<sonarsync_api::Error> for CoreError {
    fn from(err: sonarsync_api::Error) -> Self {
        match err {
            sonarsync_api::Error::Deserialization { message, body: _ } => {
                CoreError::Decode { message }
            }
            other => CoreError::Transport(other),
        }
    }
}
