// ── Declarations ──
//
// The desired state of one managed object, per kind. Declarations are
// plain data: serde-deserializable so a config engine (or the CLI) can
// hand them over as TOML/YAML/JSON, and never mutated by the reconcilers,
// which always return a fresh value.

pub mod binding;
pub mod permissions;
pub mod token;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

pub use binding::{AlmBindingDeclaration, AlmKind};
pub use permissions::PermissionsDeclaration;
pub use token::UserTokenDeclaration;

/// The kinds of resource sonarsync reconciles.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Permissions,
    GitlabBinding,
    GithubBinding,
    UserToken,
}

/// Any declaration, tagged by `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Declaration {
    Permissions(PermissionsDeclaration),
    GitlabBinding(AlmBindingDeclaration),
    GithubBinding(AlmBindingDeclaration),
    UserToken(UserTokenDeclaration),
}

impl Declaration {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Permissions(_) => ResourceKind::Permissions,
            Self::GitlabBinding(_) => ResourceKind::GitlabBinding,
            Self::GithubBinding(_) => ResourceKind::GithubBinding,
            Self::UserToken(_) => ResourceKind::UserToken,
        }
    }
}
