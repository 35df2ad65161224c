mod commands;
mod config;
mod output;

use clap::{ArgAction, Args, Parser, Subcommand};
use commands::{build, config_cmd, encode, file, kinds, shell};
use config::{resolve_runtime_config, RuntimeConfig};
use output::OutputMode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Args)]
struct GlobalOpts {
    #[arg(short = 'o', long = "output", value_enum, global = true)]
    output: Option<OutputMode>,

    /// Pass every value through without percent-encoding.
    #[arg(long = "no-encode", global = true)]
    no_encode: bool,

    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Parser)]
#[command(name = "odq", version, about = "Build and encode OData query options")]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Build(build::BuildCmd),
    Encode(encode::EncodeCmd),
    Kinds(kinds::KindsCmd),
    File(file::FileCmd),
    Config(config_cmd::ConfigCmd),
    Shell,
}

#[derive(Clone)]
pub struct AppContext {
    pub runtime: RuntimeConfig,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose);
    dispatch(cli)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore the error from a subscriber that is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

pub(crate) fn dispatch(cli: Cli) -> anyhow::Result<()> {
    if let Commands::Config(cmd) = cli.command {
        return config_cmd::run(cmd, cli.global.output.unwrap_or(OutputMode::Table));
    }

    let runtime = resolve_runtime_config(cli.global.output, cli.global.no_encode)?;
    let ctx = AppContext { runtime };

    match cli.command {
        Commands::Build(cmd) => build::run(&ctx, cmd),
        Commands::Encode(cmd) => encode::run(&ctx, cmd),
        Commands::Kinds(cmd) => kinds::run(&ctx, cmd),
        Commands::File(cmd) => file::run(&ctx, cmd),
        Commands::Shell => shell::run(&shell_base_args(&cli.global)),
        Commands::Config(_) => unreachable!(),
    }
}

/// Global flags from the outer invocation, re-applied to every shell line.
fn shell_base_args(global: &GlobalOpts) -> Vec<String> {
    let mut args = Vec::new();
    if let Some(output) = global.output {
        args.extend(["-o".to_string(), output.as_str().to_string()]);
    }
    if global.no_encode {
        args.push("--no-encode".to_string());
    }
    args
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{shell_base_args, Cli, Commands};
    use crate::output::OutputMode;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["odq", "build", "--select", "a", "-o", "json", "-vv"]).unwrap();
        assert_eq!(cli.global.output, Some(OutputMode::Json));
        assert_eq!(cli.global.verbose, 2);
        assert!(matches!(cli.command, Commands::Build(_)));
    }

    #[test]
    fn kinds_accepts_negative_ordinal() {
        let cli = Cli::try_parse_from(["odq", "kinds", "--ordinal", "-3"]).unwrap();
        match cli.command {
            Commands::Kinds(cmd) => assert_eq!(cmd.ordinal, Some(-3)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn encode_takes_values_and_requires_one() {
        let cli = Cli::try_parse_from(["odq", "encode", "a b", "c"]).unwrap();
        match cli.command {
            Commands::Encode(cmd) => assert_eq!(cmd.values, vec!["a b", "c"]),
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["odq", "encode"]).is_err());
    }

    #[test]
    fn file_and_build_share_path_flag() {
        let cli = Cli::try_parse_from(["odq", "file", "opts.json", "--path", "/People"]).unwrap();
        match cli.command {
            Commands::File(cmd) => {
                assert_eq!(cmd.file, std::path::PathBuf::from("opts.json"));
                assert_eq!(cmd.path.as_deref(), Some("/People"));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["odq", "build", "--path", "/People"]).is_ok());
        assert!(Cli::try_parse_from(["odq", "file", "opts.json", "--path-prefix", "/People"]).is_err());
    }

    #[test]
    fn shell_keeps_outer_flags() {
        let cli = Cli::try_parse_from(["odq", "--no-encode", "-o", "query", "shell"]).unwrap();
        assert_eq!(
            shell_base_args(&cli.global),
            vec!["-o", "query", "--no-encode"]
        );
    }
}
