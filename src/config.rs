use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use crate::output::OutputMode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StoredConfig {
    pub output: Option<OutputMode>,
    pub encode: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub output: OutputMode,
    pub encode: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            output: OutputMode::Table,
            encode: true,
        }
    }
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("odata-query").join("config.json"))
}

pub fn load_stored_config() -> anyhow::Result<StoredConfig> {
    load_config_from(&config_path()?)
}

pub fn save_config(config: &StoredConfig) -> anyhow::Result<PathBuf> {
    let path = config_path()?;
    save_config_to(&path, config)?;
    Ok(path)
}

pub fn delete_config() -> anyhow::Result<bool> {
    let path = config_path()?;
    if path.exists() {
        fs::remove_file(&path).with_context(|| format!("removing {}", path.display()))?;
        return Ok(true);
    }
    Ok(false)
}

fn load_config_from(path: &Path) -> anyhow::Result<StoredConfig> {
    if !path.exists() {
        return Ok(StoredConfig::default());
    }

    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = serde_json::from_str::<StoredConfig>(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

fn save_config_to(path: &Path, config: &StoredConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let body = serde_json::to_string_pretty(config)?;
    let mut file = fs::File::create(path).with_context(|| format!("writing {}", path.display()))?;
    file.write_all(body.as_bytes())?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    tracing::info!(path = %path.display(), "saved config");
    Ok(())
}

pub fn resolve_runtime_config(
    cli_output: Option<OutputMode>,
    cli_no_encode: bool,
) -> anyhow::Result<RuntimeConfig> {
    let file_cfg = load_stored_config()?;
    Ok(resolve(cli_output, cli_no_encode, |key| std::env::var(key).ok(), file_cfg))
}

/// Flag, then environment, then stored config, then default.
fn resolve(
    cli_output: Option<OutputMode>,
    cli_no_encode: bool,
    env: impl Fn(&str) -> Option<String>,
    file_cfg: StoredConfig,
) -> RuntimeConfig {
    let defaults = RuntimeConfig::default();

    let output = cli_output
        .or_else(|| env("ODQ_OUTPUT").and_then(parse_output))
        .or(file_cfg.output)
        .unwrap_or(defaults.output);

    let encode = if cli_no_encode {
        false
    } else {
        env("ODQ_ENCODE")
            .and_then(parse_bool)
            .or(file_cfg.encode)
            .unwrap_or(defaults.encode)
    };

    tracing::debug!(?output, encode, "resolved runtime config");
    RuntimeConfig { output, encode }
}

fn parse_output(value: String) -> Option<OutputMode> {
    match value.to_lowercase().as_str() {
        "table" => Some(OutputMode::Table),
        "json" => Some(OutputMode::Json),
        "query" => Some(OutputMode::Query),
        other => {
            tracing::warn!(value = other, "ignoring unknown ODQ_OUTPUT");
            None
        }
    }
}

fn parse_bool(value: String) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            tracing::warn!(value = other, "ignoring unknown ODQ_ENCODE");
            None
        }
    }
}
