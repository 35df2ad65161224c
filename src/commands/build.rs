use clap::Args;
use odata_query::{OptionKind, QueryOptions};

use crate::{output::print_params, AppContext};

#[derive(Debug, Clone, Args)]
pub struct BuildCmd {
    #[arg(long)]
    expand: Vec<String>,
    #[arg(long)]
    filter: Vec<String>,
    #[arg(long)]
    select: Vec<String>,
    /// `$expand` value passed through without encoding.
    #[arg(long)]
    raw_expand: Vec<String>,
    /// `$filter` value passed through without encoding.
    #[arg(long)]
    raw_filter: Vec<String>,
    /// `$select` value passed through without encoding.
    #[arg(long)]
    raw_select: Vec<String>,
    /// Resource path to prefix in query output, e.g. `/People`.
    #[arg(long)]
    path: Option<String>,
}

pub fn run(ctx: &AppContext, cmd: BuildCmd) -> anyhow::Result<()> {
    let options = options_from(cmd.clone());
    tracing::info!(options = options.len(), encode = ctx.runtime.encode, "built query options");

    let params = options.to_map(ctx.runtime.encode);
    print_params(ctx.runtime.output, &params, cmd.path.as_deref())
}

/// Repeated flags of one kind gather into a single option.
fn options_from(cmd: BuildCmd) -> QueryOptions {
    let mut options = QueryOptions::new()
        .optional(OptionKind::Expand, non_empty(cmd.expand))
        .optional(OptionKind::Filter, non_empty(cmd.filter))
        .optional(OptionKind::Select, non_empty(cmd.select));

    for (kind, values) in [
        (OptionKind::Expand, cmd.raw_expand),
        (OptionKind::Filter, cmd.raw_filter),
        (OptionKind::Select, cmd.raw_select),
    ] {
        if let Some(values) = non_empty(values) {
            options = options.raw(kind, values);
        }
    }

    options.build_always()
}

fn non_empty(values: Vec<String>) -> Option<Vec<String>> {
    (!values.is_empty()).then_some(values)
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use odata_query::{OptionKind, QueryOption};

    use super::{options_from, BuildCmd};

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        cmd: BuildCmd,
    }

    fn parse(args: &[&str]) -> BuildCmd {
        let argv = std::iter::once("build").chain(args.iter().copied());
        Harness::try_parse_from(argv).unwrap().cmd
    }

    #[test]
    fn gathers_repeated_flags_in_kind_order() {
        let cmd = parse(&["--select", "a", "--expand", "foo", "--select", "b"]);
        let options = options_from(cmd);
        assert_eq!(
            options.as_slice(),
            &[
                QueryOption::new(OptionKind::Expand, ["foo"]),
                QueryOption::new(OptionKind::Select, ["a", "b"]),
            ]
        );
    }

    #[test]
    fn raw_flags_follow_encoded_ones() {
        let cmd = parse(&["--raw-filter", "Age gt 3", "--filter", "Name eq 'x y'"]);
        let params = options_from(cmd).to_map(true);
        assert_eq!(params["$filter"], vec!["Name%20eq%20%27x%20y%27", "Age gt 3"]);
    }

    #[test]
    fn no_flags_build_nothing() {
        assert!(options_from(parse(&[])).is_empty());
    }
}
