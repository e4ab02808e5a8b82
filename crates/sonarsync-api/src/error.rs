use thiserror::Error;

/// Top-level error type for the `sonarsync-api` crate.
///
/// Every request goes through the same invoker, so every failure is one of
/// these: the request never completed, the server answered with a status
/// other than the one the endpoint documents, or the body did not decode.
/// `sonarsync-core` maps these into reconciliation errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server rejected the credentials (HTTP 401).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The credentials are valid but lack the required permission (HTTP 403).
    #[error("Insufficient privileges: {message}")]
    Forbidden { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Web API ─────────────────────────────────────────────────────
    /// The server answered with a status other than the expected one.
    ///
    /// `message` is taken from SonarQube's `{"errors":[{"msg":"..."}]}`
    /// body when present, otherwise the raw body or the status text.
    #[error("SonarQube API error (HTTP {status}, expected {expected}): {message}")]
    Api {
        status: u16,
        expected: u16,
        message: String,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this error came from an HTTP 404.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Api { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }

    /// Returns `true` if the server refused the credentials or privileges.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Authentication { .. } | Self::Forbidden { .. })
    }

    /// The HTTP status the server answered with, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Authentication { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Api { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
