use clap::Parser;
use rustyline::DefaultEditor;

use crate::{dispatch, Cli, Commands};

pub fn run(base_args: &[String]) -> anyhow::Result<()> {
    let mut rl = DefaultEditor::new()?;

    println!("OData query shell. Type 'help' for commands, 'exit' to quit.");

    loop {
        let line = rl.readline("odq> ");
        match line {
            Ok(raw) => {
                let input = raw.trim();
                if input.is_empty() {
                    continue;
                }
                if matches!(input, "exit" | "quit") {
                    break;
                }
                if input == "help" {
                    print_shell_help();
                    continue;
                }

                let _ = rl.add_history_entry(input);
                let tokens = match shell_words::split(input) {
                    Ok(t) => t,
                    Err(e) => {
                        eprintln!("parse error: {e}");
                        continue;
                    }
                };

                let mut argv = vec!["odq".to_string()];
                argv.extend(base_args.iter().cloned());
                argv.extend(tokens);

                match Cli::try_parse_from(argv) {
                    Ok(cli) => {
                        if matches!(&cli.command, Commands::Shell) {
                            eprintln!("already in shell mode");
                            continue;
                        }
                        if let Err(err) = dispatch(cli) {
                            eprintln!("error: {err:#}");
                        }
                    }
                    Err(e) => {
                        eprintln!("{e}");
                    }
                }
            }
            Err(_) => break,
        }
    }

    Ok(())
}

fn print_shell_help() {
    println!("Commands:");
    println!("  build --expand V --filter V --select V [--raw-filter V] [--path P]");
    println!("  encode VALUE...");
    println!("  kinds [--ordinal N]");
    println!("  file FILE [--path P]");
    println!("  config show|path|set|reset");
    println!("  help    Show this help");
    println!("  exit    Quit the shell");
}
