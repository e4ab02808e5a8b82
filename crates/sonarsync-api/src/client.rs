// SonarQube Web API HTTP client
//
// Wraps `reqwest::Client` with base-URL handling, credential injection and
// strict status validation. Every endpoint documents exactly one success
// status (204 for mutations, 200 for reads); anything else is an error.
// Endpoint modules (permissions, alm_settings, ...) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::transport::TransportConfig;

/// SonarQube's error body: `{"errors":[{"msg":"..."}]}`.
#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<ErrorMessage>,
}

#[derive(serde::Deserialize)]
struct ErrorMessage {
    msg: String,
}

/// Raw HTTP client for the SonarQube Web API.
///
/// Immutable once built: the base URL, credentials and underlying
/// connection pool are shared read-only by every caller.
#[derive(Debug, Clone)]
pub struct SonarClient {
    http: reqwest::Client,
    base_url: Url,
    credentials: Credentials,
}

impl SonarClient {
    /// Create a client from a base URL, credentials and transport config.
    ///
    /// `base_url` is the server root (e.g. `https://sonar.example.com` or
    /// `https://example.com/sonarqube` behind a path prefix).
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::from_reqwest(base_url, http, credentials)
    }

    /// Wrap an existing `reqwest::Client`.
    pub fn from_reqwest(
        base_url: &str,
        http: reqwest::Client,
        credentials: Credentials,
    ) -> Result<Self, Error> {
        let base_url = Url::parse(base_url)?;
        Ok(Self {
            http,
            base_url,
            credentials,
        })
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build `{base}/api/{path}?{query}` with the query sorted by key.
    ///
    /// Sorting is stable, so repeated keys keep their relative order.
    pub(crate) fn api_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/api/{path}"))?;

        if !params.is_empty() {
            let mut sorted: Vec<&(&str, String)> = params.iter().collect();
            sorted.sort_by_key(|(key, _)| *key);
            url.query_pairs_mut()
                .extend_pairs(sorted.into_iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    // ── Invoker ──────────────────────────────────────────────────────

    /// Issue one request and validate the status against `expected`.
    ///
    /// Returns the raw response body on success. Any other status is
    /// classified into an [`Error`]; no retries are attempted.
    pub async fn invoke(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        expected: StatusCode,
    ) -> Result<String, Error> {
        let url = self.api_url(path, params)?;
        debug!("{method} {url}");

        let builder = self.credentials.apply(self.http.request(method, url));
        let resp = builder.send().await?;
        let status = resp.status();
        let body = resp.text().await?;
        trace!(%status, bytes = body.len(), "response received");

        if status == expected {
            return Ok(body);
        }

        Err(classify(status, expected, &body))
    }

    /// `GET` an endpoint expecting `200` and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let body = self.invoke(Method::GET, path, params, StatusCode::OK).await?;
        decode(body)
    }

    /// `POST` an endpoint expecting `200` and decode the JSON body.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, Error> {
        let body = self.invoke(Method::POST, path, params, StatusCode::OK).await?;
        decode(body)
    }

    /// `POST` a mutation endpoint expecting `204 No Content`.
    pub(crate) async fn post_no_content(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<(), Error> {
        self.invoke(Method::POST, path, params, StatusCode::NO_CONTENT)
            .await
            .map(|_| ())
    }
}

// ── Response handling ────────────────────────────────────────────────

fn decode<T: DeserializeOwned>(body: String) -> Result<T, Error> {
    serde_json::from_str(&body).map_err(|e| {
        let head = preview(&body);
        Error::Deserialization {
            message: format!("{e} (body preview: {head:?})"),
            body: body.clone(),
        }
    })
}

fn classify(status: StatusCode, expected: StatusCode, body: &str) -> Error {
    let message = error_message(status, body);

    match status {
        StatusCode::UNAUTHORIZED => Error::Authentication { message },
        StatusCode::FORBIDDEN => Error::Forbidden { message },
        _ => Error::Api {
            status: status.as_u16(),
            expected: expected.as_u16(),
            message,
        },
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if !parsed.errors.is_empty() {
            return parsed
                .errors
                .into_iter()
                .map(|e| e.msg)
                .collect::<Vec<_>>()
                .join("; ");
        }
    }

    if body.trim().is_empty() {
        status.to_string()
    } else {
        preview(body).to_owned()
    }
}

/// First 200 characters of a body, cut on a char boundary.
fn preview(body: &str) -> &str {
    match body.char_indices().nth(200) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client(base: &str) -> SonarClient {
        SonarClient::from_reqwest(base, reqwest::Client::new(), Credentials::Anonymous).unwrap()
    }

    #[test]
    fn api_url_sorts_query_by_key() {
        let c = client("https://sonar.example.com");
        let url = c
            .api_url(
                "permissions/add_user",
                &[
                    ("projectKey", "proj1".into()),
                    ("login", "alice".into()),
                    ("permission", "user".into()),
                ],
            )
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sonar.example.com/api/permissions/add_user?login=alice&permission=user&projectKey=proj1"
        );
    }

    #[test]
    fn api_url_keeps_path_prefix_and_trims_slash() {
        let c = client("https://example.com/sonarqube/");
        let url = c.api_url("system/status", &[]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/sonarqube/api/system/status");
    }

    #[test]
    fn api_url_percent_encodes_values() {
        let c = client("https://sonar.example.com");
        let url = c
            .api_url("permissions/add_group", &[("groupName", "sonar users".into())])
            .unwrap();
        assert_eq!(url.query(), Some("groupName=sonar+users"));
    }

    #[test]
    fn error_message_joins_sonar_errors() {
        let body = r#"{"errors":[{"msg":"first"},{"msg":"second"}]}"#;
        assert_eq!(error_message(StatusCode::BAD_REQUEST, body), "first; second");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, ""),
            "500 Internal Server Error"
        );
    }

    #[test]
    fn classify_maps_auth_statuses() {
        assert!(matches!(
            classify(StatusCode::UNAUTHORIZED, StatusCode::OK, ""),
            Error::Authentication { .. }
        ));
        assert!(matches!(
            classify(StatusCode::FORBIDDEN, StatusCode::OK, ""),
            Error::Forbidden { .. }
        ));
        assert!(matches!(
            classify(StatusCode::OK, StatusCode::NO_CONTENT, ""),
            Error::Api {
                status: 200,
                expected: 204,
                ..
            }
        ));
    }
}
