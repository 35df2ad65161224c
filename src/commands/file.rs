use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Args;
use odata_query::QueryOptions;

use crate::{output::print_params, AppContext};

/// Renders options stored as a JSON array of
/// `{"kind": "$filter", "values": [...], "raw": false}` objects.
#[derive(Debug, Clone, Args)]
pub struct FileCmd {
    pub(crate) file: PathBuf,
    /// Resource path to prefix in query output, e.g. `/People`.
    #[arg(long)]
    pub(crate) path: Option<String>,
}

pub fn run(ctx: &AppContext, cmd: FileCmd) -> anyhow::Result<()> {
    let options = load_options(&cmd.file)?;
    tracing::info!(file = %cmd.file.display(), options = options.len(), "loaded query options");

    let params = options.to_map(ctx.runtime.encode);
    print_params(ctx.runtime.output, &params, cmd.path.as_deref())
}

fn load_options(path: &std::path::Path) -> anyhow::Result<QueryOptions> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}
