//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a raw JSON value. Table and plain fall back to pretty JSON.
pub fn render_value(format: &OutputFormat, data: &serde_json::Value) -> Result<String, CliError> {
    match format {
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Table | OutputFormat::Json | OutputFormat::Plain => render_json(data, false),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let rendered = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(rendered)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Validation {
        field: "output".into(),
        reason: format!("cannot render YAML: {e}"),
    })
}
