//! Configuration for the sonarsync CLI.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `sonarsync_core::ServerConfig`. The CLI layers its
//! own flag overrides on top of what this crate produces.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use sonarsync_core::{AuthCredentials, ServerConfig, TlsVerification};

/// Keyring service name. Entries are `<profile>/token` and `<profile>/password`.
pub const KEYRING_SERVICE: &str = "sonarsync";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found in config")]
    UnknownProfile { name: String },

    #[error("no password configured for user '{username}' in profile '{profile}'")]
    NoCredentials { profile: String, username: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when none is named on the command line.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named server profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Server base URL (e.g., "https://sonar.example.com").
    pub url: String,

    /// User token (plaintext; prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable name containing the token.
    pub token_env: Option<String>,

    /// Login for basic auth, used when no token resolves.
    pub username: Option<String>,

    /// Password for basic auth (plaintext; prefer keyring).
    pub password: Option<String>,

    /// Edition to assume instead of asking the server.
    pub edition: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

impl Config {
    /// Look up a profile by name, falling back to `default_profile`.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
            .to_owned();
        match self.profiles.get(&name) {
            Some(profile) => Ok((name, profile)),
            None => Err(ConfigError::UnknownProfile { name }),
        }
    }

    /// A copy with every plaintext secret replaced, for display.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        for profile in config.profiles.values_mut() {
            if profile.token.is_some() {
                profile.token = Some("<redacted>".into());
            }
            if profile.password.is_some() {
                profile.password = Some("<redacted>".into());
            }
        }
        config
    }

    /// Render as TOML with secrets redacted.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.redacted())?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "sonarsync", "sonarsync").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("sonarsync");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load the full Config from `path` + environment.
///
/// A missing file is not an error; defaults and `SONARSYNC_*` variables
/// still apply.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SONARSYNC_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Credential resolution ───────────────────────────────────────────

/// Walk the credential chain for one secret: the named env var, then the
/// keyring entry, then the plaintext value.
fn resolve_secret(
    env_name: Option<&str>,
    plaintext: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl FnOnce() -> Option<String>,
) -> Option<SecretString> {
    if let Some(value) = env_name.and_then(&env) {
        return Some(SecretString::from(value));
    }
    if let Some(value) = keyring() {
        return Some(SecretString::from(value));
    }
    plaintext.map(|value| SecretString::from(value.to_owned()))
}

fn keyring_lookup(profile_name: &str, key: &str) -> Option<String> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{key}"))
        .ok()?
        .get_password()
        .ok()
}

fn resolve_auth_with(
    profile: &Profile,
    profile_name: &str,
    env: impl Fn(&str) -> Option<String>,
    keyring: impl Fn(&str) -> Option<String>,
) -> Result<AuthCredentials, ConfigError> {
    if let Some(token) = resolve_secret(
        profile.token_env.as_deref(),
        profile.token.as_deref(),
        &env,
        || keyring("token"),
    ) {
        return Ok(AuthCredentials::Token(token));
    }

    let Some(username) = profile.username.clone() else {
        return Ok(AuthCredentials::Anonymous);
    };

    match resolve_secret(None, profile.password.as_deref(), &env, || {
        keyring("password")
    }) {
        Some(password) => Ok(AuthCredentials::Credentials { username, password }),
        None => Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
            username,
        }),
    }
}

/// Resolve credentials for a profile.
///
/// A token wins over a username/password pair. A profile with neither
/// connects anonymously.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    resolve_auth_with(
        profile,
        profile_name,
        |name| std::env::var(name).ok(),
        |key| keyring_lookup(profile_name, key),
    )
}

/// Build a `ServerConfig` from a profile, with no CLI flag overrides.
pub fn profile_to_server_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ServerConfig, ConfigError> {
    let url: url::Url = profile.url.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {}", profile.url),
    })?;

    let auth = resolve_auth(profile, profile_name)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ServerConfig {
        url,
        auth,
        tls,
        timeout,
        edition: profile.edition.clone(),
    })
}
