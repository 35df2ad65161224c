use clap::Args;
use odata_query::{kind_name, OptionKind};
use serde_json::{json, Value};

use crate::{output::print_rows, AppContext};

#[derive(Debug, Clone, Args)]
pub struct KindsCmd {
    /// Render the name for a single ordinal instead of listing all kinds.
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) ordinal: Option<i64>,
}

pub fn run(ctx: &AppContext, cmd: KindsCmd) -> anyhow::Result<()> {
    let rows = rows_for(cmd.ordinal);
    print_rows(ctx.runtime.output, &rows, &["ordinal", "variant", "name"])
}

/// One row per known kind, or a single row for `ordinal`. Unknown ordinals
/// get a null variant and the placeholder name.
fn rows_for(ordinal: Option<i64>) -> Vec<Value> {
    match ordinal {
        Some(ordinal) => vec![json!({
            "ordinal": ordinal,
            "variant": OptionKind::try_from(ordinal).map(|k| format!("{k:?}")).ok(),
            "name": kind_name(ordinal),
        })],
        None => OptionKind::ALL.iter().map(|k| kind_row(*k)).collect(),
    }
}

fn kind_row(kind: OptionKind) -> Value {
    json!({
        "ordinal": kind.ordinal(),
        "variant": format!("{kind:?}"),
        "name": kind.name(),
    })
}
