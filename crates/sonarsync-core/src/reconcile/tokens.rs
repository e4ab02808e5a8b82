// User token reconciler

use tracing::debug;

use crate::error::CoreError;
use crate::identity::ResourceIdentity;
use crate::model::{ResourceKind, UserTokenDeclaration};
use crate::session::Session;

use super::{Reconcile, Reconciled};

/// Reconciler for [`UserTokenDeclaration`]s.
///
/// Tokens cannot be edited; the only mutations are generate and revoke.
#[derive(Debug, Clone)]
pub struct UserTokens {
    session: Session,
}

impl UserTokens {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl Reconcile for UserTokens {
    type Declaration = UserTokenDeclaration;

    fn kind(&self) -> ResourceKind {
        ResourceKind::UserToken
    }

    async fn create(
        &self,
        declaration: &UserTokenDeclaration,
    ) -> Result<Reconciled<UserTokenDeclaration>, CoreError> {
        debug!(kind = %self.kind(), name = %declaration.name, "generating token");
        if declaration.name.is_empty() {
            return Err(CoreError::validation("token name must not be empty"));
        }

        let generated = self
            .session
            .client()
            .generate_token(&declaration.name, declaration.login_name.as_deref())
            .await?;

        let identity = ResourceIdentity::composite(&generated.login, &generated.name);
        let seed = UserTokenDeclaration {
            login_name: Some(generated.login),
            name: generated.name,
            token: Some(generated.token),
        };
        let declaration = self.read(&identity, &seed).await?;
        Ok(Reconciled {
            identity,
            declaration,
        })
    }

    async fn read(
        &self,
        identity: &ResourceIdentity,
        declaration: &UserTokenDeclaration,
    ) -> Result<UserTokenDeclaration, CoreError> {
        debug!(kind = %self.kind(), %identity, "reading token");
        let (login, name) = identity.split()?;

        let tokens = self.session.client().search_tokens(Some(login)).await?;
        let found = tokens
            .user_tokens
            .into_iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| CoreError::NotFound {
                kind: self.kind().to_string(),
                identity: identity.to_string(),
            })?;

        Ok(UserTokenDeclaration {
            login_name: Some(tokens.login),
            name: found.name,
            token: declaration.token.clone(),
        })
    }

    async fn update(
        &self,
        identity: &ResourceIdentity,
        declaration: &UserTokenDeclaration,
    ) -> Result<Reconciled<UserTokenDeclaration>, CoreError> {
        debug!(kind = %self.kind(), %identity, "tokens are immutable, re-reading");
        let declaration = self.read(identity, declaration).await?;
        Ok(Reconciled {
            identity: identity.clone(),
            declaration,
        })
    }

    async fn delete(
        &self,
        identity: &ResourceIdentity,
        _declaration: &UserTokenDeclaration,
    ) -> Result<(), CoreError> {
        debug!(kind = %self.kind(), %identity, "revoking token");
        let (login, name) = identity.split()?;
        self.session
            .client()
            .revoke_token(name, Some(login))
            .await?;
        Ok(())
    }

    async fn import(
        &self,
        identity: &ResourceIdentity,
    ) -> Result<Reconciled<UserTokenDeclaration>, CoreError> {
        let (login, name) = identity.split()?;
        let seed = UserTokenDeclaration {
            login_name: Some(login.to_owned()),
            name: name.to_owned(),
            token: None,
        };
        let declaration = self.read(identity, &seed).await?;
        Ok(Reconciled {
            identity: identity.clone(),
            declaration,
        })
    }
}
