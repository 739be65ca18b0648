//! vizlink CLI - inspect, filter and chart JSON records from the terminal.

mod cli;
mod commands;
mod config;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Inspect { source, json } => {
            commands::inspect::run(source, json, cli.config.as_deref())
        }

        Commands::Filter {
            source,
            include,
            range,
            select,
            multi,
            json,
        } => commands::filter::run(
            source,
            commands::filter::FilterArgs {
                include,
                range,
                select,
                multi,
            },
            json,
            cli.config.as_deref(),
        ),

        Commands::Charts {
            source,
            select,
            json,
        } => commands::charts::run(source, select, json, cli.config.as_deref()),

        Commands::Samples => commands::samples::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
