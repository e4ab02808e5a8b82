use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::codec;

/// The ALM a project is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum AlmKind {
    #[strum(serialize = "gitlab")]
    GitLab,
    #[strum(serialize = "github")]
    GitHub,
}

impl AlmKind {
    /// The `alm` value `get_binding` reports for this kind.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::GitLab => "gitlab",
            Self::GitHub => "github",
        }
    }

    /// The `alm_settings` action that creates or replaces a binding.
    pub fn set_action(self) -> &'static str {
        match self {
            Self::GitLab => "set_gitlab_binding",
            Self::GitHub => "set_github_binding",
        }
    }

    /// Display name used in messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::GitLab => "GitLab",
            Self::GitHub => "GitHub",
        }
    }
}

/// Binding between a SonarQube project and an ALM repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlmBindingDeclaration {
    /// SonarQube project key.
    pub project: String,
    /// GitLab project id, or `owner/name` on GitHub.
    pub repository: String,
    /// Key of the ALM setting to bind through.
    pub alm_setting: String,
    #[serde(default, deserialize_with = "codec::bool_or_string")]
    pub monorepo: bool,
    /// GitHub only.
    #[serde(
        default,
        deserialize_with = "codec::opt_bool_or_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary_comment_enabled: Option<bool>,
}
