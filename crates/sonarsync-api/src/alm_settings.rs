// ALM settings endpoints
//
// Project bindings are keyed by project only: `get_binding` returns a flat
// object and `delete_binding` removes whatever binding the project has,
// regardless of ALM type.

use tracing::debug;

use crate::client::SonarClient;
use crate::error::Error;
use crate::models::AlmBinding;

impl SonarClient {
    /// Create or replace a project binding.
    ///
    /// `POST /api/alm_settings/{action}` expecting `204`, where `action` is
    /// `set_gitlab_binding`, `set_github_binding`, ...
    pub async fn set_binding(&self, action: &str, params: &[(&str, String)]) -> Result<(), Error> {
        debug!(action, "setting project binding");
        self.post_no_content(&format!("alm_settings/{action}"), params)
            .await
    }

    /// Fetch the binding of a project.
    ///
    /// `GET /api/alm_settings/get_binding?project=...`
    pub async fn get_binding(&self, project: &str) -> Result<AlmBinding, Error> {
        debug!(project, "fetching project binding");
        self.get_json("alm_settings/get_binding", &[("project", project.to_owned())])
            .await
    }

    /// Remove the binding of a project.
    ///
    /// `POST /api/alm_settings/delete_binding?project=...`
    pub async fn delete_binding(&self, project: &str) -> Result<(), Error> {
        debug!(project, "deleting project binding");
        self.post_no_content(
            "alm_settings/delete_binding",
            &[("project", project.to_owned())],
        )
        .await
    }
}
