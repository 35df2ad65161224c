use clap::{Args, Subcommand};
use serde_json::json;

use crate::{
    config::{config_path, delete_config, load_stored_config, save_config},
    output::{print_value, OutputMode},
};

#[derive(Debug, Clone, Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    command: ConfigSubcmd,
}

#[derive(Debug, Clone, Subcommand)]
enum ConfigSubcmd {
    Show,
    Path,
    /// Store defaults used when neither a flag nor an env var is given.
    Set {
        #[arg(long, value_enum)]
        output: Option<OutputMode>,
        #[arg(long)]
        encode: Option<bool>,
    },
    Reset,
}

pub fn run(cmd: ConfigCmd, mode: OutputMode) -> anyhow::Result<()> {
    match cmd.command {
        ConfigSubcmd::Show => show(mode),
        ConfigSubcmd::Path => path(mode),
        ConfigSubcmd::Set { output, encode } => set(mode, output, encode),
        ConfigSubcmd::Reset => reset(mode),
    }
}

fn show(mode: OutputMode) -> anyhow::Result<()> {
    let cfg = load_stored_config()?;
    let shown = json!({
        "output": cfg.output.map(OutputMode::as_str),
        "encode": cfg.encode,
    });
    print_value(mode, &shown)
}

fn path(mode: OutputMode) -> anyhow::Result<()> {
    print_value(mode, &json!({"path": config_path()?.display().to_string()}))
}

fn set(mode: OutputMode, output: Option<OutputMode>, encode: Option<bool>) -> anyhow::Result<()> {
    let mut cfg = load_stored_config()?;
    if output.is_none() && encode.is_none() {
        anyhow::bail!("nothing to set; pass --output and/or --encode");
    }
    cfg.output = output.or(cfg.output);
    cfg.encode = encode.or(cfg.encode);

    let path = save_config(&cfg)?;
    print_value(mode, &json!({"ok": true, "path": path.display().to_string()}))
}

fn reset(mode: OutputMode) -> anyhow::Result<()> {
    let deleted = delete_config()?;
    print_value(mode, &json!({"deleted": deleted}))
}
