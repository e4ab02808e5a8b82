// ── Runtime connection configuration ──
//
// These types describe *how* to reach a SonarQube server. They carry
// credential data and connection tuning, but never touch disk: the CLI
// builds a `ServerConfig` from its profile layer and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use sonarsync_api::{Credentials, TlsMode, TransportConfig};

/// How to authenticate with the server.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// User token (preferred).
    Token(SecretString),
    /// Local account login and password.
    Credentials {
        username: String,
        password: SecretString,
    },
    /// No credentials at all.
    Anonymous,
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed test servers).
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server root URL (e.g., `https://sonar.example.com`).
    pub url: Url,
    pub auth: AuthCredentials,
    pub tls: TlsVerification,
    /// Request timeout.
    pub timeout: Duration,
    /// Edition to assume instead of asking the server.
    pub edition: Option<String>,
}

impl ServerConfig {
    /// A config with default transport settings and no credentials.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            auth: AuthCredentials::Anonymous,
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
            edition: None,
        }
    }

    pub(crate) fn credentials(&self) -> Credentials {
        match &self.auth {
            AuthCredentials::Token(token) => Credentials::Token(token.clone()),
            AuthCredentials::Credentials { username, password } => Credentials::Basic {
                username: username.clone(),
                password: password.clone(),
            },
            AuthCredentials::Anonymous => Credentials::Anonymous,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: match &self.tls {
                TlsVerification::SystemDefaults => TlsMode::System,
                TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
                TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
            },
            timeout: self.timeout,
        }
    }
}
