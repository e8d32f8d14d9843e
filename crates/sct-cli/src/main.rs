use clap::Parser;
use clap_complete::generate;
use sct_cli::cli::{build_cli_command, Cli, Commands};
use std::fs;
use std::io::{self, Write};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

mod commands;

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("a global tracing subscriber is already installed");
    }

    commands::util::configure_threads(&cli.threads);

    let result = match &cli.command {
        Some(Commands::Steel { command }) => commands::steel::handle(command),
        Some(Commands::Graph { command }) => commands::graph::handle(command),
        Some(Commands::Completions { shell, out }) => {
            let mut cmd = build_cli_command();
            let mut buffer = Vec::new();
            generate(*shell, &mut cmd, "sct", &mut buffer);
            match out {
                Some(path) => fs::write(path, &buffer).map_err(anyhow::Error::from),
                None => io::stdout().write_all(&buffer).map_err(anyhow::Error::from),
            }
        }
        None => build_cli_command().print_help().map_err(anyhow::Error::from),
    };

    if let Err(e) = result {
        error!("{e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
