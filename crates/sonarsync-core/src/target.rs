// ── Permission target resolution ──
//
// A permissions declaration names its principal and scope through six
// mutually exclusive optional fields. `target()` turns them into a tagged
// pair once, up front; everything downstream (endpoint, query) works off
// that pair and never looks at the raw fields again.

use strum::Display;

use crate::error::CoreError;
use crate::model::PermissionsDeclaration;

// ── Tagged target ────────────────────────────────────────────────────

/// Pseudo-principals that only exist inside permission templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SpecialGroup {
    ProjectCreator,
}

/// Who receives the permissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionTarget {
    User(String),
    Group(String),
    SpecialGroup(SpecialGroup),
}

/// Where the permissions apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionScope {
    Global,
    Project(String),
    TemplateById(String),
    TemplateByName(String),
}

/// A validated declaration: one target, one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTarget {
    pub target: PermissionTarget,
    pub scope: PermissionScope,
}

// ── Lookup keys ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalMode {
    User,
    Group,
    SpecialGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeMode {
    Global,
    Project,
    Template,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl PermissionTarget {
    pub fn mode(&self) -> PrincipalMode {
        match self {
            Self::User(_) => PrincipalMode::User,
            Self::Group(_) => PrincipalMode::Group,
            Self::SpecialGroup(_) => PrincipalMode::SpecialGroup,
        }
    }
}

impl PermissionScope {
    pub fn mode(&self) -> ScopeMode {
        match self {
            Self::Global => ScopeMode::Global,
            Self::Project(_) => ScopeMode::Project,
            Self::TemplateById(_) | Self::TemplateByName(_) => ScopeMode::Template,
        }
    }
}

// ── Validation pass ──────────────────────────────────────────────────

fn set(field: Option<&String>) -> Option<&str> {
    field.map(String::as_str).filter(|s| !s.is_empty())
}

impl PermissionsDeclaration {
    /// Validate the selector fields and resolve them into a tagged pair.
    ///
    /// Fails with [`CoreError::Validation`] when:
    /// - not exactly one of the principal fields is set;
    /// - `project_key` is combined with `special_group_name`,
    ///   `template_id` or `template_name`;
    /// - `template_id` is combined with `template_name`;
    /// - `special_group_name` is not `project_creator`;
    /// - `special_group_name` is set without a template scope;
    /// - `permissions` is empty.
    pub fn target(&self) -> Result<ResolvedTarget, CoreError> {
        let login = set(self.login_name.as_ref());
        let group = set(self.group_name.as_ref());
        let special = set(self.special_group_name.as_ref());
        let project = set(self.project_key.as_ref());
        let template_id = set(self.template_id.as_ref());
        let template_name = set(self.template_name.as_ref());

        let target = match (login, group, special) {
            (Some(login), None, None) => PermissionTarget::User(login.to_owned()),
            (None, Some(group), None) => PermissionTarget::Group(group.to_owned()),
            (None, None, Some("project_creator")) => {
                PermissionTarget::SpecialGroup(SpecialGroup::ProjectCreator)
            }
            (None, None, Some(other)) => {
                return Err(CoreError::validation(format!(
                    "special_group_name must be \"project_creator\", got {other:?}"
                )));
            }
            (None, None, None) => {
                return Err(CoreError::validation(
                    "one of login_name, group_name or special_group_name must be set",
                ));
            }
            _ => {
                return Err(CoreError::validation(
                    "only one of login_name, group_name and special_group_name may be set",
                ));
            }
        };

        if project.is_some() && (special.is_some() || template_id.is_some() || template_name.is_some())
        {
            return Err(CoreError::validation(
                "project_key cannot be combined with special_group_name, template_id or template_name",
            ));
        }

        let scope = match (project, template_id, template_name) {
            (Some(key), None, None) => PermissionScope::Project(key.to_owned()),
            (None, Some(id), None) => PermissionScope::TemplateById(id.to_owned()),
            (None, None, Some(name)) => PermissionScope::TemplateByName(name.to_owned()),
            (None, None, None) => PermissionScope::Global,
            _ => {
                return Err(CoreError::validation(
                    "template_id and template_name cannot both be set",
                ));
            }
        };

        if matches!(target, PermissionTarget::SpecialGroup(_)) && scope.mode() != ScopeMode::Template
        {
            return Err(CoreError::validation(
                "template_id or template_name must be set when special_group_name is project_creator",
            ));
        }

        if self.permissions.is_empty() {
            return Err(CoreError::validation("permissions must not be empty"));
        }

        Ok(ResolvedTarget { target, scope })
    }
}

// ── Endpoint table ───────────────────────────────────────────────────

/// The `api/permissions/*` action for a principal/scope/operation triple.
///
/// Update shares Create's endpoint: adding an existing grant is a no-op on
/// the server. The project creator only exists in templates, so global and
/// project scopes have no entry for it.
pub fn endpoint(
    principal: PrincipalMode,
    scope: ScopeMode,
    operation: Operation,
) -> Result<&'static str, CoreError> {
    use Operation::{Create, Delete, Read, Update};
    use PrincipalMode as P;
    use ScopeMode as S;

    let action = match (principal, scope, operation) {
        (P::User, S::Global | S::Project, Create | Update) => "add_user",
        (P::User, S::Global | S::Project, Read) => "users",
        (P::User, S::Global | S::Project, Delete) => "remove_user",
        (P::User, S::Template, Create | Update) => "add_user_to_template",
        (P::User, S::Template, Read) => "template_users",
        (P::User, S::Template, Delete) => "remove_user_from_template",

        (P::Group, S::Global | S::Project, Create | Update) => "add_group",
        (P::Group, S::Global | S::Project, Read) => "groups",
        (P::Group, S::Global | S::Project, Delete) => "remove_group",
        (P::Group, S::Template, Create | Update) => "add_group_to_template",
        (P::Group, S::Template, Read) => "template_groups",
        (P::Group, S::Template, Delete) => "remove_group_from_template",

        (P::SpecialGroup, S::Template, Create | Update) => "add_project_creator_to_template",
        (P::SpecialGroup, S::Template, Read) => "search_templates",
        (P::SpecialGroup, S::Template, Delete) => "remove_project_creator_from_template",

        (P::SpecialGroup, S::Global | S::Project, _) => {
            return Err(CoreError::validation(format!(
                "cannot {operation} project_creator permissions outside a permission template"
            )));
        }
    };

    Ok(action)
}

/// Read page size. Only the first page is scanned.
pub const READ_PAGE_SIZE: &str = "100";

/// Query parameters shared by every request of `operation`.
///
/// The per-call `permission` value is added by the caller. Reads list the
/// whole scope, so they carry no principal; the match happens client-side.
/// `search_templates` has no id filter, and filters by name through `q`.
pub fn query(resolved: &ResolvedTarget, operation: Operation) -> Vec<(&'static str, String)> {
    let mut params = Vec::with_capacity(3);
    let reading = operation == Operation::Read;

    if !reading {
        match &resolved.target {
            PermissionTarget::User(login) => params.push(("login", login.clone())),
            PermissionTarget::Group(name) => params.push(("groupName", name.clone())),
            PermissionTarget::SpecialGroup(_) => {}
        }
    }

    let special = matches!(resolved.target, PermissionTarget::SpecialGroup(_));
    match &resolved.scope {
        PermissionScope::Global => {}
        PermissionScope::Project(key) => params.push(("projectKey", key.clone())),
        PermissionScope::TemplateById(_) if special && reading => {}
        PermissionScope::TemplateById(id) => params.push(("templateId", id.clone())),
        PermissionScope::TemplateByName(name) if special && reading => {
            params.push(("q", name.clone()));
        }
        PermissionScope::TemplateByName(name) => params.push(("templateName", name.clone())),
    }

    if reading {
        params.push(("ps", READ_PAGE_SIZE.to_owned()));
    }

    params
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn decl() -> PermissionsDeclaration {
        PermissionsDeclaration {
            permissions: vec!["user".into()],
            ..PermissionsDeclaration::default()
        }
    }

    fn invalid(d: &PermissionsDeclaration) -> String {
        match d.target() {
            Err(CoreError::Validation { message }) => message,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    // ── target() ──

    #[test]
    fn user_on_project() {
        let d = PermissionsDeclaration {
            login_name: Some("alice".into()),
            project_key: Some("proj1".into()),
            ..decl()
        };
        assert_eq!(
            d.target().unwrap(),
            ResolvedTarget {
                target: PermissionTarget::User("alice".into()),
                scope: PermissionScope::Project("proj1".into()),
            }
        );
    }

    #[test]
    fn group_is_global_without_scope() {
        let d = PermissionsDeclaration {
            group_name: Some("sonar-users".into()),
            ..decl()
        };
        let resolved = d.target().unwrap();
        assert_eq!(resolved.target, PermissionTarget::Group("sonar-users".into()));
        assert_eq!(resolved.scope, PermissionScope::Global);
    }

    #[test]
    fn project_creator_on_template_name() {
        let d = PermissionsDeclaration {
            special_group_name: Some("project_creator".into()),
            template_name: Some("Default template".into()),
            ..decl()
        };
        let resolved = d.target().unwrap();
        assert_eq!(
            resolved.target,
            PermissionTarget::SpecialGroup(SpecialGroup::ProjectCreator)
        );
        assert_eq!(
            resolved.scope,
            PermissionScope::TemplateByName("Default template".into())
        );
    }

    #[test]
    fn empty_strings_count_as_unset() {
        let d = PermissionsDeclaration {
            login_name: Some("alice".into()),
            group_name: Some(String::new()),
            project_key: Some(String::new()),
            template_id: Some("tmpl-1".into()),
            ..decl()
        };
        assert_eq!(
            d.target().unwrap().scope,
            PermissionScope::TemplateById("tmpl-1".into())
        );
    }

    #[test]
    fn no_principal_is_rejected() {
        assert!(invalid(&decl()).contains("must be set"));
    }

    #[test]
    fn two_principals_are_rejected() {
        let d = PermissionsDeclaration {
            login_name: Some("alice".into()),
            group_name: Some("devs".into()),
            ..decl()
        };
        assert!(invalid(&d).contains("only one"));
    }

    #[test]
    fn unknown_special_group_is_rejected() {
        let d = PermissionsDeclaration {
            special_group_name: Some("anyone".into()),
            template_id: Some("tmpl-1".into()),
            ..decl()
        };
        assert!(invalid(&d).contains("project_creator"));
    }

    #[test]
    fn project_key_conflicts() {
        for d in [
            PermissionsDeclaration {
                login_name: Some("alice".into()),
                project_key: Some("p".into()),
                template_id: Some("t".into()),
                ..decl()
            },
            PermissionsDeclaration {
                login_name: Some("alice".into()),
                project_key: Some("p".into()),
                template_name: Some("t".into()),
                ..decl()
            },
            PermissionsDeclaration {
                special_group_name: Some("project_creator".into()),
                project_key: Some("p".into()),
                ..decl()
            },
        ] {
            assert!(invalid(&d).contains("project_key"), "{d:?}");
        }
    }

    #[test]
    fn template_id_conflicts_with_template_name() {
        let d = PermissionsDeclaration {
            group_name: Some("devs".into()),
            template_id: Some("t1".into()),
            template_name: Some("Default".into()),
            ..decl()
        };
        assert!(invalid(&d).contains("template_id and template_name"));
    }

    #[test]
    fn project_creator_needs_a_template() {
        let d = PermissionsDeclaration {
            special_group_name: Some("project_creator".into()),
            ..decl()
        };
        assert!(invalid(&d).contains("template_id or template_name must be set"));
    }

    #[test]
    fn empty_permissions_are_rejected() {
        let d = PermissionsDeclaration {
            login_name: Some("alice".into()),
            permissions: vec![],
            ..decl()
        };
        assert!(invalid(&d).contains("permissions"));
    }

    // ── endpoint() ──

    #[test]
    fn endpoint_table() {
        use Operation::{Create, Delete, Read, Update};
        let cases = [
            (PrincipalMode::User, ScopeMode::Global, Create, "add_user"),
            (PrincipalMode::User, ScopeMode::Project, Read, "users"),
            (PrincipalMode::User, ScopeMode::Project, Delete, "remove_user"),
            (PrincipalMode::User, ScopeMode::Template, Create, "add_user_to_template"),
            (PrincipalMode::User, ScopeMode::Template, Read, "template_users"),
            (PrincipalMode::User, ScopeMode::Template, Delete, "remove_user_from_template"),
            (PrincipalMode::Group, ScopeMode::Global, Create, "add_group"),
            (PrincipalMode::Group, ScopeMode::Global, Read, "groups"),
            (PrincipalMode::Group, ScopeMode::Project, Delete, "remove_group"),
            (PrincipalMode::Group, ScopeMode::Template, Update, "add_group_to_template"),
            (PrincipalMode::Group, ScopeMode::Template, Read, "template_groups"),
            (PrincipalMode::Group, ScopeMode::Template, Delete, "remove_group_from_template"),
            (PrincipalMode::SpecialGroup, ScopeMode::Template, Create, "add_project_creator_to_template"),
            (PrincipalMode::SpecialGroup, ScopeMode::Template, Read, "search_templates"),
            (PrincipalMode::SpecialGroup, ScopeMode::Template, Delete, "remove_project_creator_from_template"),
        ];
        for (principal, scope, op, expected) in cases {
            assert_eq!(endpoint(principal, scope, op).unwrap(), expected);
        }
    }

    #[test]
    fn update_resolves_to_create_endpoint() {
        for principal in [PrincipalMode::User, PrincipalMode::Group] {
            for scope in [ScopeMode::Global, ScopeMode::Project, ScopeMode::Template] {
                assert_eq!(
                    endpoint(principal, scope, Operation::Update).unwrap(),
                    endpoint(principal, scope, Operation::Create).unwrap()
                );
            }
        }
    }

    #[test]
    fn project_creator_outside_template_has_no_endpoint() {
        for scope in [ScopeMode::Global, ScopeMode::Project] {
            for op in [Operation::Create, Operation::Read, Operation::Delete] {
                assert!(matches!(
                    endpoint(PrincipalMode::SpecialGroup, scope, op),
                    Err(CoreError::Validation { .. })
                ));
            }
        }
    }

    // ── query() ──

    fn resolved(target: PermissionTarget, scope: PermissionScope) -> ResolvedTarget {
        ResolvedTarget { target, scope }
    }

    #[test]
    fn mutation_query_carries_principal_and_scope() {
        let r = resolved(
            PermissionTarget::User("alice".into()),
            PermissionScope::Project("proj1".into()),
        );
        assert_eq!(
            query(&r, Operation::Create),
            vec![("login", "alice".to_owned()), ("projectKey", "proj1".to_owned())]
        );
    }

    #[test]
    fn read_query_lists_scope_with_page_size() {
        let r = resolved(
            PermissionTarget::Group("devs".into()),
            PermissionScope::TemplateById("tmpl-1".into()),
        );
        assert_eq!(
            query(&r, Operation::Read),
            vec![("templateId", "tmpl-1".to_owned()), ("ps", "100".to_owned())]
        );
    }

    #[test]
    fn project_creator_read_filters_by_q() {
        let by_name = resolved(
            PermissionTarget::SpecialGroup(SpecialGroup::ProjectCreator),
            PermissionScope::TemplateByName("Default".into()),
        );
        assert_eq!(
            query(&by_name, Operation::Read),
            vec![("q", "Default".to_owned()), ("ps", "100".to_owned())]
        );

        let by_id = resolved(
            PermissionTarget::SpecialGroup(SpecialGroup::ProjectCreator),
            PermissionScope::TemplateById("tmpl-1".into()),
        );
        assert_eq!(query(&by_id, Operation::Read), vec![("ps", "100".to_owned())]);
        assert_eq!(
            query(&by_id, Operation::Delete),
            vec![("templateId", "tmpl-1".to_owned())]
        );
    }
}
