// Permissions reconciler
//
// One declaration fans out into one request per permission. Read lists
// the whole scope and scans for the principal, since the list endpoints
// cannot filter by exact login or group name.

use tracing::debug;

use crate::codec;
use crate::error::CoreError;
use crate::identity::ResourceIdentity;
use crate::model::{PermissionsDeclaration, ResourceKind};
use crate::session::Session;
use crate::target::{
    endpoint, query, Operation, PermissionScope, PermissionTarget, ResolvedTarget,
};

use super::{Reconcile, Reconciled};

/// Reconciler for [`PermissionsDeclaration`]s.
#[derive(Debug, Clone)]
pub struct Permissions {
    session: Session,
}

impl Permissions {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    /// Issue one mutation per declared permission.
    ///
    /// Resolution happens before the first request, so an invalid
    /// declaration never reaches the server.
    async fn apply(
        &self,
        declaration: &PermissionsDeclaration,
        operation: Operation,
    ) -> Result<(), CoreError> {
        let resolved = declaration.target()?;
        let action = endpoint(resolved.target.mode(), resolved.scope.mode(), operation)?;
        let base = query(&resolved, operation);

        for params in codec::expand(&base, "permission", &declaration.permissions) {
            self.session
                .client()
                .mutate_permission(action, &params)
                .await?;
        }
        Ok(())
    }

    async fn find(
        &self,
        resolved: &ResolvedTarget,
        declaration: &PermissionsDeclaration,
    ) -> Result<Option<PermissionsDeclaration>, CoreError> {
        let action = endpoint(resolved.target.mode(), resolved.scope.mode(), Operation::Read)?;
        let params = query(resolved, Operation::Read);
        let client = self.session.client();

        let found = match &resolved.target {
            PermissionTarget::User(login) => client
                .list_permission_users(action, &params)
                .await?
                .users
                .into_iter()
                .find(|u| u.login.eq_ignore_ascii_case(login))
                .map(|u| PermissionsDeclaration {
                    login_name: Some(u.login),
                    permissions: codec::flatten(&u.permissions),
                    ..declaration.clone()
                }),
            PermissionTarget::Group(name) => client
                .list_permission_groups(action, &params)
                .await?
                .groups
                .into_iter()
                .find(|g| g.name.eq_ignore_ascii_case(name))
                .map(|g| PermissionsDeclaration {
                    group_name: Some(g.name),
                    permissions: codec::flatten(&g.permissions),
                    ..declaration.clone()
                }),
            PermissionTarget::SpecialGroup(special) => client
                .search_permission_templates(&params)
                .await?
                .permission_templates
                .into_iter()
                .find(|t| match &resolved.scope {
                    PermissionScope::TemplateById(id) => t.id.eq_ignore_ascii_case(id),
                    PermissionScope::TemplateByName(name) => t.name.eq_ignore_ascii_case(name),
                    PermissionScope::Global | PermissionScope::Project(_) => false,
                })
                .map(|t| PermissionsDeclaration {
                    special_group_name: Some(special.to_string()),
                    permissions: codec::flatten_project_creator(&t.permissions),
                    ..declaration.clone()
                }),
        };

        Ok(found)
    }
}

impl Reconcile for Permissions {
    type Declaration = PermissionsDeclaration;

    fn kind(&self) -> ResourceKind {
        ResourceKind::Permissions
    }

    async fn create(
        &self,
        declaration: &PermissionsDeclaration,
    ) -> Result<Reconciled<PermissionsDeclaration>, CoreError> {
        debug!(
            kind = %self.kind(),
            count = declaration.permissions.len(),
            "creating permissions"
        );
        self.apply(declaration, Operation::Create).await?;

        let identity = ResourceIdentity::generate();
        let declaration = self.read(&identity, declaration).await?;
        Ok(Reconciled {
            identity,
            declaration,
        })
    }

    async fn read(
        &self,
        identity: &ResourceIdentity,
        declaration: &PermissionsDeclaration,
    ) -> Result<PermissionsDeclaration, CoreError> {
        debug!(kind = %self.kind(), %identity, "reading permissions");
        let resolved = declaration.target()?;

        self.find(&resolved, declaration)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                kind: self.kind().to_string(),
                identity: identity.to_string(),
            })
    }

    async fn update(
        &self,
        identity: &ResourceIdentity,
        declaration: &PermissionsDeclaration,
    ) -> Result<Reconciled<PermissionsDeclaration>, CoreError> {
        debug!(kind = %self.kind(), %identity, "updating permissions");
        self.apply(declaration, Operation::Update).await?;

        let declaration = self.read(identity, declaration).await?;
        Ok(Reconciled {
            identity: identity.clone(),
            declaration,
        })
    }

    async fn delete(
        &self,
        identity: &ResourceIdentity,
        declaration: &PermissionsDeclaration,
    ) -> Result<(), CoreError> {
        debug!(kind = %self.kind(), %identity, "deleting permissions");
        self.apply(declaration, Operation::Delete).await
    }

    async fn import(
        &self,
        _identity: &ResourceIdentity,
    ) -> Result<Reconciled<PermissionsDeclaration>, CoreError> {
        Err(CoreError::Unsupported {
            operation: "import permissions".into(),
            reason: "permission identities are random and carry no selector fields".into(),
        })
    }
}
