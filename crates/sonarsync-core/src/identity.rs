// ── Resource identity ──
//
// The durable id string handed back after Create. Two shapes exist: a
// random UUID that carries no fields, and a natural key of two parts
// joined by `/`. Both are opaque to callers; only the reconciler of the
// matching kind knows how to take one apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Identity of one managed resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceIdentity(String);

impl ResourceIdentity {
    /// A fresh random identity (UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// `<head>/<tail>`.
    pub fn composite(head: &str, tail: &str) -> Self {
        Self(format!("{head}/{tail}"))
    }

    /// Split a composite identity on the first `/`.
    ///
    /// The tail may itself contain `/` (GitHub repositories are
    /// `owner/name`). Both halves must be non-empty.
    pub fn split(&self) -> Result<(&str, &str), CoreError> {
        match self.0.split_once('/') {
            Some((head, tail)) if !head.is_empty() && !tail.is_empty() => Ok((head, tail)),
            _ => Err(CoreError::validation(format!(
                "identity {:?} is not of the form <a>/<b>",
                self.0
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ResourceIdentity {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for ResourceIdentity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResourceIdentity {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}
