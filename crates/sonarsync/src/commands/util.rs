//! Shared helpers for command handlers.

use std::path::Path;

use sonarsync_core::Declaration;

use crate::error::CliError;

/// Read and parse a declaration file, choosing the format by extension.
pub fn read_declaration(path: &Path) -> Result<Declaration, CliError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if !matches!(extension.as_str(), "toml" | "yaml" | "yml" | "json") {
        return Err(CliError::Validation {
            field: "file".into(),
            reason: format!(
                "{}: unsupported extension (expected .toml, .yaml, .yml or .json)",
                path.display()
            ),
        });
    }

    let contents = std::fs::read_to_string(path).map_err(|source| CliError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;

    parse_declaration(&extension, &contents).map_err(|reason| CliError::Validation {
        field: "file".into(),
        reason: format!("{}: {reason}", path.display()),
    })
}

fn parse_declaration(extension: &str, contents: &str) -> Result<Declaration, String> {
    match extension {
        "toml" => toml::from_str(contents).map_err(|e| e.to_string()),
        "json" => serde_json::from_str(contents).map_err(|e| e.to_string()),
        _ => serde_yaml::from_str(contents).map_err(|e| e.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_toml_permissions() {
        let file = write_temp(
            ".toml",
            r#"
kind = "permissions"
login_name = "alice"
project_key = "proj1"
permissions = ["user", "scan"]
"#,
        );

        let Declaration::Permissions(decl) = read_declaration(file.path()).unwrap() else {
            panic!("expected permissions");
        };
        assert_eq!(decl.login_name.as_deref(), Some("alice"));
        assert_eq!(decl.permissions, vec!["user", "scan"]);
    }

    #[test]
    fn test_reads_yaml_binding_with_string_flag() {
        let file = write_temp(
            ".yml",
            "kind: gitlab_binding\n\
             project: my-project\n\
             repository: \"1234\"\n\
             alm_setting: gitlab-main\n\
             monorepo: \"true\"\n",
        );

        let Declaration::GitlabBinding(decl) = read_declaration(file.path()).unwrap() else {
            panic!("expected gitlab binding");
        };
        assert!(decl.monorepo);
        assert_eq!(decl.repository, "1234");
    }

    #[test]
    fn test_reads_json_token() {
        let file = write_temp(
            ".json",
            r#"{ "kind": "user_token", "login_name": "bot", "name": "ci" }"#,
        );

        let declaration = read_declaration(file.path()).unwrap();
        assert_eq!(declaration.kind(), sonarsync_core::ResourceKind::UserToken);
    }

    #[test]
    fn test_unknown_extension_is_rejected_before_reading() {
        let err = read_declaration(Path::new("/nonexistent/decl.ini")).unwrap_err();
        assert!(matches!(err, CliError::Validation { .. }));
    }

    #[test]
    fn test_unknown_kind_is_validation_error() {
        let file = write_temp(".json", r#"{ "kind": "quality_gate", "name": "x" }"#);
        let err = read_declaration(file.path()).unwrap_err();
        assert!(matches!(err, CliError::Validation { ref reason, .. } if reason.contains("quality_gate")));
    }
}
