// sonarsync-api: Async Rust client for the SonarQube Web API endpoints
// driven by the sonarsync reconcilers.

pub mod alm_settings;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod permissions;
pub mod system;
pub mod transport;
pub mod user_tokens;

pub use auth::Credentials;
pub use client::SonarClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};

pub use reqwest::{Method, StatusCode};
