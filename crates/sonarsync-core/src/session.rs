// ── Server session ──
//
// A connected client plus what the server told us about itself at
// startup. Both halves are immutable and shared by every reconciler.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use sonarsync_api::SonarClient;

use crate::config::ServerConfig;
use crate::error::CoreError;

/// Edition reported when the server does not say.
const UNKNOWN_EDITION: &str = "unknown";

// ── ServerInfo ───────────────────────────────────────────────────────

/// Server edition and version, discovered once and injected afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerInfo {
    /// `community`, `developer`, `enterprise`, `datacenter` or `unknown`.
    pub edition: String,
    pub version: String,
}

impl ServerInfo {
    pub fn new(edition: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            edition: edition.into(),
            version: version.into(),
        }
    }

    /// Ask the server for its version and edition.
    ///
    /// `api/system/status` gives the version. The edition comes from
    /// `api/navigation/global` unless `edition_override` is set, in which
    /// case that call is skipped.
    pub async fn discover(
        client: &SonarClient,
        edition_override: Option<&str>,
    ) -> Result<Self, CoreError> {
        let status = client.server_status().await?;
        debug!(version = %status.version, status = %status.status, "server status");

        let edition = match edition_override {
            Some(edition) => edition.to_owned(),
            None => client
                .navigation_global()
                .await?
                .edition
                .unwrap_or_else(|| UNKNOWN_EDITION.to_owned()),
        };

        Ok(Self::new(edition, status.version))
    }

    pub fn is_community(&self) -> bool {
        self.edition.eq_ignore_ascii_case("community")
    }
}

impl fmt::Display for ServerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SonarQube {} version {}", self.edition, self.version)
    }
}

// ── Session ──────────────────────────────────────────────────────────

/// Shared handle passed to every reconciler.
///
/// Cheaply cloneable; the client and server info sit behind `Arc`.
#[derive(Debug, Clone)]
pub struct Session {
    client: Arc<SonarClient>,
    server: Arc<ServerInfo>,
}

impl Session {
    pub fn new(client: SonarClient, server: ServerInfo) -> Self {
        Self {
            client: Arc::new(client),
            server: Arc::new(server),
        }
    }

    /// Build the HTTP client from `config` and discover the server.
    pub async fn connect(config: &ServerConfig) -> Result<Self, CoreError> {
        let client = SonarClient::new(
            config.url.as_str(),
            config.credentials(),
            &config.transport(),
        )?;
        let server = ServerInfo::discover(&client, config.edition.as_deref()).await?;
        info!(%server, "connected");
        Ok(Self::new(client, server))
    }

    pub fn client(&self) -> &SonarClient {
        &self.client
    }

    pub fn server(&self) -> &ServerInfo {
        &self.server
    }
}
