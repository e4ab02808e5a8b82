// ALM binding reconciler
//
// Bindings are keyed by project on the server side: one project has at
// most one binding, and setting a new one replaces the old. The identity
// `<project>/<repository>` records which repository we bound, so Read can
// tell our binding apart from one made out of band.

use tracing::debug;

use crate::codec;
use crate::error::CoreError;
use crate::identity::ResourceIdentity;
use crate::model::{AlmBindingDeclaration, AlmKind, ResourceKind};
use crate::session::Session;

use super::{Reconcile, Reconciled};

/// Reconciler for GitLab or GitHub project bindings.
#[derive(Debug, Clone)]
pub struct AlmBindings {
    session: Session,
    alm: AlmKind,
}

impl AlmBindings {
    pub fn new(session: Session, alm: AlmKind) -> Self {
        Self { session, alm }
    }

    pub fn gitlab(session: Session) -> Self {
        Self::new(session, AlmKind::GitLab)
    }

    pub fn github(session: Session) -> Self {
        Self::new(session, AlmKind::GitHub)
    }

    /// Community edition has no ALM integration at all.
    fn check_edition(&self) -> Result<(), CoreError> {
        let server = self.session.server();
        if server.is_community() {
            return Err(CoreError::EditionUnsupported {
                message: format!(
                    "{} bindings are not supported in the Community edition of SonarQube. \
                     You are using: {server}",
                    self.alm.label()
                ),
            });
        }
        Ok(())
    }

    /// Bind the project, returning the identity of the binding just made.
    async fn set(&self, declaration: &AlmBindingDeclaration) -> Result<ResourceIdentity, CoreError> {
        self.check_edition()?;
        if declaration.project.is_empty() || declaration.repository.is_empty() {
            return Err(CoreError::validation(
                "binding project and repository must not be empty",
            ));
        }

        let mut params = vec![
            ("almSetting", declaration.alm_setting.clone()),
            ("monorepo", codec::query_bool(declaration.monorepo)),
            ("project", declaration.project.clone()),
            ("repository", declaration.repository.clone()),
        ];
        if self.alm == AlmKind::GitHub {
            params.push((
                "summaryCommentEnabled",
                codec::query_bool(declaration.summary_comment_enabled.unwrap_or(true)),
            ));
        }

        self.session
            .client()
            .set_binding(self.alm.set_action(), &params)
            .await?;

        Ok(ResourceIdentity::composite(
            &declaration.project,
            &declaration.repository,
        ))
    }

    fn not_found(&self, identity: &ResourceIdentity) -> CoreError {
        CoreError::NotFound {
            kind: self.kind().to_string(),
            identity: identity.to_string(),
        }
    }
}

impl Reconcile for AlmBindings {
    type Declaration = AlmBindingDeclaration;

    fn kind(&self) -> ResourceKind {
        match self.alm {
            AlmKind::GitLab => ResourceKind::GitlabBinding,
            AlmKind::GitHub => ResourceKind::GithubBinding,
        }
    }

    async fn create(
        &self,
        declaration: &AlmBindingDeclaration,
    ) -> Result<Reconciled<AlmBindingDeclaration>, CoreError> {
        debug!(kind = %self.kind(), project = %declaration.project, "creating binding");
        let identity = self.set(declaration).await?;
        let declaration = self.read(&identity, declaration).await?;
        Ok(Reconciled {
            identity,
            declaration,
        })
    }

    async fn read(
        &self,
        identity: &ResourceIdentity,
        declaration: &AlmBindingDeclaration,
    ) -> Result<AlmBindingDeclaration, CoreError> {
        self.check_edition()?;
        debug!(kind = %self.kind(), %identity, "reading binding");
        let (project, repository) = identity.split()?;

        let binding = match self.session.client().get_binding(project).await {
            Ok(binding) => binding,
            Err(e) if e.is_not_found() => return Err(self.not_found(identity)),
            Err(e) => return Err(e.into()),
        };

        if binding.repository.as_deref() != Some(repository) || binding.alm != self.alm.wire_name()
        {
            return Err(self.not_found(identity));
        }

        Ok(AlmBindingDeclaration {
            project: project.to_owned(),
            repository: repository.to_owned(),
            alm_setting: binding.key,
            monorepo: binding.monorepo,
            summary_comment_enabled: match self.alm {
                AlmKind::GitHub => binding.summary_comment_enabled,
                AlmKind::GitLab => declaration.summary_comment_enabled,
            },
        })
    }

    async fn update(
        &self,
        identity: &ResourceIdentity,
        declaration: &AlmBindingDeclaration,
    ) -> Result<Reconciled<AlmBindingDeclaration>, CoreError> {
        debug!(kind = %self.kind(), %identity, "updating binding");
        // A changed project or repository moves the binding to a new identity.
        let identity = self.set(declaration).await?;
        let declaration = self.read(&identity, declaration).await?;
        Ok(Reconciled {
            identity,
            declaration,
        })
    }

    async fn delete(
        &self,
        identity: &ResourceIdentity,
        _declaration: &AlmBindingDeclaration,
    ) -> Result<(), CoreError> {
        self.check_edition()?;
        debug!(kind = %self.kind(), %identity, "deleting binding");
        let (project, _) = identity.split()?;
        self.session.client().delete_binding(project).await?;
        Ok(())
    }

    async fn import(
        &self,
        identity: &ResourceIdentity,
    ) -> Result<Reconciled<AlmBindingDeclaration>, CoreError> {
        self.check_edition()?;
        let (project, repository) = identity.split()?;
        let seed = AlmBindingDeclaration {
            project: project.to_owned(),
            repository: repository.to_owned(),
            ..AlmBindingDeclaration::default()
        };
        let declaration = self.read(identity, &seed).await?;
        Ok(Reconciled {
            identity: identity.clone(),
            declaration,
        })
    }
}
