use secrecy::{ExposeSecret, SecretString};

/// Credentials for authenticating with a SonarQube server.
///
/// SonarQube accepts a user token as the basic-auth username with an empty
/// password on every supported version, so both variants end up as basic
/// auth on the wire.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// User token (`squ_...`). Generated at: My Account > Security.
    Token(SecretString),

    /// Login and password of a local account.
    Basic {
        username: String,
        password: SecretString,
    },

    /// No authentication (anonymous access, or an auth proxy in front).
    Anonymous,
}

impl Credentials {
    /// Attach these credentials to a request builder.
    pub(crate) fn apply(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self {
            Self::Token(token) => builder.basic_auth(token.expose_secret(), Some("")),
            Self::Basic { username, password } => {
                builder.basic_auth(username, Some(password.expose_secret()))
            }
            Self::Anonymous => builder,
        }
    }
}
