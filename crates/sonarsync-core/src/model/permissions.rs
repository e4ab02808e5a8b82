use serde::{Deserialize, Serialize};

/// Permissions granted to one principal in one scope.
///
/// Exactly one of `login_name`, `group_name` and `special_group_name`
/// selects the principal. At most one of `project_key`, `template_id` and
/// `template_name` selects the scope; none means global. Empty strings
/// count as unset. See [`PermissionsDeclaration::target`] for the full
/// rule set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsDeclaration {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    /// Only `project_creator` is defined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_group_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_name: Option<String>,

    /// `admin`, `codeviewer`, `issueadmin`, `securityhotspotadmin`, `scan`,
    /// `user`, ... Passed through verbatim.
    #[serde(default)]
    pub permissions: Vec<String>,
}
