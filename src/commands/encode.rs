use clap::Args;
use odata_query::encode_value;

use crate::{output::print_encoded, AppContext};

/// Percent-encodes each value. The global `--no-encode` flag has no effect
/// here: showing the encoded form is the whole point of the command.
#[derive(Debug, Clone, Args)]
pub struct EncodeCmd {
    #[arg(required = true)]
    pub(crate) values: Vec<String>,
}

pub fn run(ctx: &AppContext, cmd: EncodeCmd) -> anyhow::Result<()> {
    if !ctx.runtime.encode {
        tracing::debug!("encode always encodes; ignoring disabled encoding");
    }
    print_encoded(ctx.runtime.output, &encoded_pairs(cmd.values))
}

/// Pairs each input with its encoded form, keeping input order.
fn encoded_pairs(values: Vec<String>) -> Vec<(String, String)> {
    values
        .into_iter()
        .map(|value| {
            let encoded = encode_value(&value);
            (value, encoded)
        })
        .collect()
}
