// SonarQube Web API response types
//
// Only the fields the reconcilers read are modeled explicitly. Everything
// else is tolerated (serde ignores unknown fields) so newer server versions
// adding attributes don't break decoding.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

// ── Paging ───────────────────────────────────────────────────────────

/// Paging envelope on list/search endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub page_index: u32,
    pub page_size: u32,
    pub total: u32,
}

// ── Permissions ──────────────────────────────────────────────────────

/// Response of `api/permissions/users` and `api/permissions/template_users`.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionUsers {
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default)]
    pub users: Vec<PermissionUser>,
}

/// A user entry with the permissions granted in the requested scope.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionUser {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Response of `api/permissions/groups` and `api/permissions/template_groups`.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionGroups {
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default)]
    pub groups: Vec<PermissionGroup>,
}

/// A group entry with the permissions granted in the requested scope.
#[derive(Debug, Clone, Deserialize)]
pub struct PermissionGroup {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Response of `api/permissions/search_templates`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionTemplates {
    #[serde(default)]
    pub paging: Option<Paging>,
    #[serde(default)]
    pub permission_templates: Vec<PermissionTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub project_key_pattern: Option<String>,
    #[serde(default)]
    pub permissions: Vec<TemplatePermission>,
}

/// One permission of a template, with per-principal counters.
///
/// `with_project_creator` is the only place the project-creator grant
/// shows up; it has no user/group entry of its own.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplatePermission {
    pub key: String,
    #[serde(default)]
    pub users_count: u32,
    #[serde(default)]
    pub groups_count: u32,
    #[serde(default)]
    pub with_project_creator: bool,
}

// ── ALM settings ─────────────────────────────────────────────────────

/// Response of `api/alm_settings/get_binding`.
///
/// A flat object, not a list: a project has at most one binding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlmBinding {
    /// Key of the ALM setting the project is bound through.
    pub key: String,
    /// ALM type: `gitlab`, `github`, `azure`, `bitbucket`, `bitbucketcloud`.
    pub alm: String,
    #[serde(default)]
    pub repository: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub summary_comment_enabled: Option<bool>,
    #[serde(default)]
    pub monorepo: bool,
}

// ── User tokens ──────────────────────────────────────────────────────

/// Response of `api/user_tokens/generate`. The only time the secret is visible.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedToken {
    pub login: String,
    pub name: String,
    pub token: SecretString,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Response of `api/user_tokens/search`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserTokens {
    pub login: String,
    #[serde(default)]
    pub user_tokens: Vec<UserToken>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserToken {
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_connection_date: Option<String>,
}

// ── System ───────────────────────────────────────────────────────────

/// Response of `api/system/status`.
#[derive(Debug, Clone, Deserialize)]
pub struct SystemStatus {
    #[serde(default)]
    pub id: Option<String>,
    pub version: String,
    /// `UP`, `STARTING`, `DB_MIGRATION_NEEDED`, ...
    pub status: String,
}

/// The subset of `api/navigation/global` used for edition detection.
///
/// Older servers omit `edition`; callers treat that as unknown.
#[derive(Debug, Clone, Deserialize)]
pub struct NavigationGlobal {
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}
