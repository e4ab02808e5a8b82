// User token endpoints

use tracing::debug;

use crate::client::SonarClient;
use crate::error::Error;
use crate::models::{GeneratedToken, UserTokens};

impl SonarClient {
    /// Generate a token.
    ///
    /// `POST /api/user_tokens/generate` expecting `200`. Without `login`,
    /// the token belongs to the authenticated user.
    pub async fn generate_token(
        &self,
        name: &str,
        login: Option<&str>,
    ) -> Result<GeneratedToken, Error> {
        debug!(name, ?login, "generating user token");
        self.post_json("user_tokens/generate", &token_params(name, login))
            .await
    }

    /// List the tokens of a user (never their secrets).
    ///
    /// `GET /api/user_tokens/search`
    pub async fn search_tokens(&self, login: Option<&str>) -> Result<UserTokens, Error> {
        debug!(?login, "searching user tokens");
        let params: Vec<(&str, String)> = login
            .map(|l| vec![("login", l.to_owned())])
            .unwrap_or_default();
        self.get_json("user_tokens/search", &params).await
    }

    /// Revoke a token.
    ///
    /// `POST /api/user_tokens/revoke` expecting `204`.
    pub async fn revoke_token(&self, name: &str, login: Option<&str>) -> Result<(), Error> {
        debug!(name, ?login, "revoking user token");
        self.post_no_content("user_tokens/revoke", &token_params(name, login))
            .await
    }
}

fn token_params(name: &str, login: Option<&str>) -> Vec<(&'static str, String)> {
    let mut params = vec![("name", name.to_owned())];
    if let Some(login) = login {
        params.push(("login", login.to_owned()));
    }
    params
}
