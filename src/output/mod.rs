mod table;

pub use table::{left, right, standard_table};

use std::collections::BTreeMap;

use clap::ValueEnum;
use comfy_table::{Cell, Table};
use odata_query::to_query_string;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    Table,
    Json,
    /// Literal `name=value&...` query string.
    Query,
}

impl OutputMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Query => "query",
        }
    }
}

pub fn print_params(
    mode: OutputMode,
    params: &BTreeMap<String, Vec<String>>,
    path: Option<&str>,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            println!("{}", serde_json::to_string_pretty(params)?);
        }
        OutputMode::Query => match path {
            Some(path) => println!("{}", odata_query::with_query(path, params)),
            None => println!("{}", to_query_string(params)),
        },
        OutputMode::Table => {
            println!("{}", render_params_table(params));
        }
    }
    Ok(())
}

pub fn render_params_table(params: &BTreeMap<String, Vec<String>>) -> Table {
    let mut table = standard_table(&["Parameter", "#", "Value"]);
    for (name, values) in params {
        for (idx, value) in values.iter().enumerate() {
            table.add_row(vec![left(name.as_str()), right(idx.to_string()), left(value.as_str())]);
        }
    }
    table
}

/// Prints `(input, encoded)` pairs; query mode prints one encoded value per
/// line.
pub fn print_encoded(mode: OutputMode, pairs: &[(String, String)]) -> anyhow::Result<()> {
    match mode {
        OutputMode::Json => {
            let rows = pairs
                .iter()
                .map(|(input, encoded)| json!({"input": input, "encoded": encoded}))
                .collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        OutputMode::Query => {
            for (_, encoded) in pairs {
                println!("{encoded}");
            }
        }
        OutputMode::Table => {
            let mut table = standard_table(&["Input", "Encoded"]);
            for (input, encoded) in pairs {
                table.add_row(vec![left(input.as_str()), left(encoded.as_str())]);
            }
            println!("{table}");
        }
    }
    Ok(())
}

pub fn print_value(mode: OutputMode, value: &Value) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            if let Some(obj) = value.as_object() {
                println!("{}", render_fields_table(obj));
            } else {
                println!("{}", serde_json::to_string_pretty(value)?);
            }
        }
        OutputMode::Json | OutputMode::Query => {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}

/// Two-column `Field | Value` view of a JSON object, scalars flattened.
fn render_fields_table(obj: &serde_json::Map<String, Value>) -> Table {
    let mut table = standard_table(&["Field", "Value"]);
    for (field, value) in obj {
        table.add_row(vec![left(field.as_str()), left(short_json(value))]);
    }
    table
}

pub fn print_rows(mode: OutputMode, rows: &[Value], columns: &[&str]) -> anyhow::Result<()> {
    match mode {
        OutputMode::Table => {
            let mut table = standard_table(columns);
            for row in rows {
                table.add_row(
                    columns
                        .iter()
                        .map(|c| Cell::new(read_column(row, c)))
                        .collect::<Vec<_>>(),
                );
            }

            println!("{table}");
        }
        OutputMode::Json | OutputMode::Query => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
    }
    Ok(())
}

fn read_column(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(v) => short_json(v),
        None => "-".to_string(),
    }
}

fn short_json(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string()),
    }
}
