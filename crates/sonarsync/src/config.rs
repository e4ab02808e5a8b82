//! Translation of the loaded config plus global flags into a
//! `sonarsync_core::ServerConfig`.
//!
//! Core never sees profiles or flags; it receives a pre-built `ServerConfig`.

use std::time::Duration;

use secrecy::SecretString;

use sonarsync_config::{ConfigError, Config, Defaults};
use sonarsync_core::{AuthCredentials, ServerConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Build a `ServerConfig` from the config file, profile, and CLI overrides.
pub fn build_server_config(global: &GlobalOpts) -> Result<ServerConfig, CliError> {
    let cfg = sonarsync_config::load_config()?;
    resolve(&cfg, global)
}

fn resolve(cfg: &Config, global: &GlobalOpts) -> Result<ServerConfig, CliError> {
    let server = match cfg.profile(global.profile.as_deref()) {
        Ok((name, profile)) => {
            sonarsync_config::profile_to_server_config(profile, &name, &cfg.defaults)?
        }
        // A missing default profile is fine when flags name the server.
        Err(ConfigError::UnknownProfile { .. }) if global.profile.is_none() => {
            from_flags(global, &cfg.defaults)?
        }
        Err(e) => return Err(e.into()),
    };

    apply_overrides(server, global)
}

/// No profile: `--url` is mandatory, everything else has a default.
fn from_flags(global: &GlobalOpts, defaults: &Defaults) -> Result<ServerConfig, CliError> {
    let url = global.url.as_deref().ok_or_else(|| CliError::NoConfig {
        path: sonarsync_config::config_path().display().to_string(),
    })?;

    let tls = if defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ServerConfig {
        tls,
        timeout: Duration::from_secs(defaults.timeout),
        ..ServerConfig::new(parse_url(url)?)
    })
}

fn apply_overrides(mut server: ServerConfig, global: &GlobalOpts) -> Result<ServerConfig, CliError> {
    if let Some(ref url) = global.url {
        server.url = parse_url(url)?;
    }
    if let Some(ref token) = global.token {
        server.auth = AuthCredentials::Token(SecretString::from(token.clone()));
    }
    if let Some(ref edition) = global.edition {
        server.edition = Some(edition.clone());
    }
    if global.insecure {
        server.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        server.timeout = Duration::from_secs(secs);
    }
    Ok(server)
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}
