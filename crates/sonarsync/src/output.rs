//! Output formatting: table, JSON, YAML.
//!
//! Renders data in the format selected by `--output`. Table flattens the
//! serialized value into field/value rows via `tabled`; structured formats
//! use serde directly.

use std::io::{self, Write};

use serde::Serialize;
use serde_json::Value;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a single serde-serializable item in the chosen format.
pub fn render_single<T: Serialize + ?Sized>(
    format: OutputFormat,
    data: &T,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => render_detail(data),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
    }
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

#[derive(Debug, Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Value")]
    value: String,
}

/// Key/value table of every non-null field, nested objects flattened with
/// dotted keys.
fn render_detail<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    let value = serde_json::to_value(data).map_err(render_err)?;
    let mut rows = Vec::new();
    flatten_into(&mut rows, "", &value);
    Ok(Table::new(rows).with(Style::rounded()).to_string())
}

fn flatten_into(rows: &mut Vec<FieldRow>, prefix: &str, value: &Value) {
    match value {
        Value::Object(map) => {
            for (key, nested) in map {
                let field = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_into(rows, &field, nested);
            }
        }
        Value::Null => {}
        other => rows.push(FieldRow {
            field: prefix.to_owned(),
            value: display_value(other),
        }),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(display_value)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    rendered.map_err(render_err)
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(render_err)
}

fn render_err(err: impl std::fmt::Display) -> CliError {
    CliError::Render {
        message: err.to_string(),
    }
}
