//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use thiserror::Error;

use sonarsync_config::ConfigError;
use sonarsync_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const UNSUPPORTED: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to SonarQube at {url}")]
    #[diagnostic(
        code(sonarsync::connection_failed),
        help(
            "Check that the server is running and reachable.\n\
             For self-signed certificates, set ca_cert in your profile or pass --insecure (-k)."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<sonarsync_api::Error>,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(sonarsync::auth_failed),
        help(
            "Verify the token or credentials and that the user holds the\n\
             'Administer' permission. Pass --token or set SONARSYNC_TOKEN."
        )
    )]
    AuthFailed { message: String },

    #[error("No password configured for user '{username}' in profile '{profile}'")]
    #[diagnostic(
        code(sonarsync::no_credentials),
        help("Set password in the profile, or store it in the OS keyring as '{profile}/password'.")
    )]
    NoCredentials { profile: String, username: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{kind} '{identity}' not found")]
    #[diagnostic(
        code(sonarsync::not_found),
        help("The resource was removed or changed outside sonarsync. Run `create` to restore it.")
    )]
    NotFound { kind: String, identity: String },

    // ── Unsupported ──────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(sonarsync::edition_unsupported),
        help("ALM bindings need Developer edition or above.")
    )]
    EditionUnsupported { message: String },

    #[error("Operation '{operation}' is not supported: {reason}")]
    #[diagnostic(code(sonarsync::unsupported))]
    Unsupported { operation: String, reason: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("SonarQube API error (HTTP {status}): {message}")]
    #[diagnostic(code(sonarsync::api_error))]
    ApiError { status: u16, message: String },

    #[error("Unexpected response from SonarQube: {message}")]
    #[diagnostic(
        code(sonarsync::decode),
        help("The server version may not be supported. Re-run with -vv to see the requests.")
    )]
    Decode { message: String },

    #[error(transparent)]
    #[diagnostic(code(sonarsync::transport))]
    Transport(Box<sonarsync_api::Error>),

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sonarsync::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(sonarsync::profile_not_found),
        help("Add a [profiles.{name}] table to the config file (see `sonarsync config path`).")
    )]
    ProfileNotFound { name: String },

    #[error("No server configured")]
    #[diagnostic(
        code(sonarsync::no_config),
        help(
            "Pass --url (or set SONARSYNC_URL), or create a profile in\n\
             {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(sonarsync::config))]
    Config(Box<ConfigError>),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error("Could not read {path}")]
    #[diagnostic(code(sonarsync::io))]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to render output: {message}")]
    #[diagnostic(code(sonarsync::render))]
    Render { message: String },
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::EditionUnsupported { .. } | Self::Unsupported { .. } => exit_code::UNSUPPORTED,
            Self::Validation { .. } | Self::NoConfig { .. } | Self::ProfileNotFound { .. } => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }

    /// Fill in the server URL on connection failures that lack one.
    pub fn with_url(self, server: &url::Url) -> Self {
        match self {
            Self::ConnectionFailed { url, source } if url.is_empty() => Self::ConnectionFailed {
                url: server.to_string(),
                source,
            },
            other => other,
        }
    }
}

// ── API error → CliError mapping ─────────────────────────────────────

impl From<sonarsync_api::Error> for CliError {
    fn from(err: sonarsync_api::Error) -> Self {
        use sonarsync_api::Error as ApiErr;

        match err {
            ApiErr::Authentication { message } | ApiErr::Forbidden { message } => {
                CliError::AuthFailed { message }
            }
            ApiErr::Api {
                status, message, ..
            } => CliError::ApiError { status, message },
            ApiErr::Deserialization { message, .. } => CliError::Decode { message },
            ApiErr::InvalidUrl(e) => CliError::Validation {
                field: "url".into(),
                reason: e.to_string(),
            },
            ApiErr::Transport(ref e) if e.is_connect() || e.is_timeout() => {
                let url = e.url().map(ToString::to_string).unwrap_or_default();
                CliError::ConnectionFailed {
                    url,
                    source: Box::new(err),
                }
            }
            ApiErr::Tls(_) => CliError::ConnectionFailed {
                url: String::new(),
                source: Box::new(err),
            },
            other => CliError::Transport(Box::new(other)),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { message } => CliError::Validation {
                field: "declaration".into(),
                reason: message,
            },
            CoreError::EditionUnsupported { message } => CliError::EditionUnsupported { message },
            CoreError::Unsupported { operation, reason } => {
                CliError::Unsupported { operation, reason }
            }
            CoreError::Transport(e) => e.into(),
            CoreError::Decode { message } => CliError::Decode { message },
            CoreError::NotFound { kind, identity } => CliError::NotFound { kind, identity },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::UnknownProfile { name } => CliError::ProfileNotFound { name },
            ConfigError::NoCredentials { profile, username } => {
                CliError::NoCredentials { profile, username }
            }
            other => CliError::Config(Box::new(other)),
        }
    }
}
