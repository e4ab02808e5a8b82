use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// A named user token.
///
/// The secret exists only in the value returned by Create: the server
/// never shows it again, and it is never serialized.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserTokenDeclaration {
    /// Owner of the token. Defaults to the authenticated user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_name: Option<String>,
    pub name: String,
    #[serde(skip)]
    pub token: Option<SecretString>,
}
