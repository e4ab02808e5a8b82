// ── Declaration <-> wire codec ──
//
// SonarQube mutations take one value per call, and list endpoints return
// plain arrays. These helpers sit between the two shapes.

use serde::{Deserialize, Deserializer};

use sonarsync_api::models::TemplatePermission;

/// One parameter set per declared value: `base` plus `key=value`.
///
/// Order follows `values`; the caller issues one request per item.
pub fn expand<'a>(
    base: &'a [(&'static str, String)],
    key: &'static str,
    values: &'a [String],
) -> impl Iterator<Item = Vec<(&'static str, String)>> + 'a {
    values.iter().map(move |value| {
        let mut params = base.to_vec();
        params.push((key, value.clone()));
        params
    })
}

/// A server string array as a declared list, in server order.
pub fn flatten(values: &[String]) -> Vec<String> {
    values.to_vec()
}

/// Keys of the template permissions granted to the project creator.
pub fn flatten_project_creator(permissions: &[TemplatePermission]) -> Vec<String> {
    permissions
        .iter()
        .filter(|p| p.with_project_creator)
        .map(|p| p.key.clone())
        .collect()
}

/// Query value for a boolean flag.
pub fn query_bool(value: bool) -> String {
    value.to_string()
}

// ── Lenient booleans ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
    Bool(bool),
    String(String),
}

impl BoolOrString {
    fn into_bool<E: serde::de::Error>(self) -> Result<bool, E> {
        match self {
            Self::Bool(b) => Ok(b),
            Self::String(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Self::String(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            Self::String(s) => Err(E::custom(format!(
                "expected a boolean or \"true\"/\"false\", got {s:?}"
            ))),
        }
    }
}

/// Accept `true`, `false`, `"true"`, `"FALSE"`, ...
pub fn bool_or_string<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    BoolOrString::deserialize(deserializer)?.into_bool()
}

/// [`bool_or_string`] for optional fields.
pub fn opt_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<BoolOrString>::deserialize(deserializer)?
        .map(BoolOrString::into_bool)
        .transpose()
}
