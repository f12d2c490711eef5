//! Main entry point for the kmap-rs CLI

mod cli;
mod commands;
mod utils;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, generate};
use log::LevelFilter;
use std::io;

use crate::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Map(command) => commands::map::execute(command),

        Commands::Completions { shell } => {
            print_completions(shell, &mut Cli::command());
            Ok(())
        }
    }
}

/// Log level selected by `-v`/`-q`, `None` to defer to `RUST_LOG`
fn requested_level(verbose: u8, quiet: bool) -> Option<LevelFilter> {
    match (verbose, quiet) {
        (0, false) => None,
        (0, true) => Some(LevelFilter::Error),
        (1, _) => Some(LevelFilter::Info),
        (2, _) => Some(LevelFilter::Debug),
        _ => Some(LevelFilter::Trace),
    }
}

/// `RUST_LOG` applies unless a flag asks for a level; the default is `warn`
fn init_logging(verbose: u8, quiet: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(level) = requested_level(verbose, quiet) {
        builder.filter_level(level);
    }
    builder.init();
}

fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}
