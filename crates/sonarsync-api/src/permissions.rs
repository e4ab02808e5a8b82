// Permissions endpoints
//
// `api/permissions/*` exposes one action per (principal, scope) pair, and
// every mutation takes exactly one `permission` value. Choosing the action
// is the caller's job; these methods only carry the request.

use tracing::debug;

use crate::client::SonarClient;
use crate::error::Error;
use crate::models::{PermissionGroups, PermissionTemplates, PermissionUsers};

impl SonarClient {
    /// Apply one permission mutation.
    ///
    /// `POST /api/permissions/{action}` expecting `204`, where `action` is
    /// e.g. `add_user`, `remove_group_from_template`.
    pub async fn mutate_permission(
        &self,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<(), Error> {
        debug!(action, "mutating permission");
        self.post_no_content(&format!("permissions/{action}"), params)
            .await
    }

    /// List users and their permissions.
    ///
    /// `GET /api/permissions/{action}` where `action` is `users` or
    /// `template_users`.
    pub async fn list_permission_users(
        &self,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<PermissionUsers, Error> {
        debug!(action, "listing permission users");
        self.get_json(&format!("permissions/{action}"), params)
            .await
    }

    /// List groups and their permissions.
    ///
    /// `GET /api/permissions/{action}` where `action` is `groups` or
    /// `template_groups`.
    pub async fn list_permission_groups(
        &self,
        action: &str,
        params: &[(&str, String)],
    ) -> Result<PermissionGroups, Error> {
        debug!(action, "listing permission groups");
        self.get_json(&format!("permissions/{action}"), params)
            .await
    }

    /// Search permission templates.
    ///
    /// `GET /api/permissions/search_templates`
    pub async fn search_permission_templates(
        &self,
        params: &[(&str, String)],
    ) -> Result<PermissionTemplates, Error> {
        debug!("searching permission templates");
        self.get_json("permissions/search_templates", params).await
    }
}
