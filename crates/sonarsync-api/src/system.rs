// Server discovery endpoints
//
// Used once at startup to learn the server version and edition.

use tracing::debug;

use crate::client::SonarClient;
use crate::error::Error;
use crate::models::{NavigationGlobal, SystemStatus};

impl SonarClient {
    /// Server version and health.
    ///
    /// `GET /api/system/status` (no authentication required)
    pub async fn server_status(&self) -> Result<SystemStatus, Error> {
        debug!("fetching system status");
        self.get_json("system/status", &[]).await
    }

    /// Global navigation metadata, which carries the server edition.
    ///
    /// `GET /api/navigation/global`
    pub async fn navigation_global(&self) -> Result<NavigationGlobal, Error> {
        debug!("fetching global navigation");
        self.get_json("navigation/global", &[]).await
    }
}
