mod cli;
mod commands;
mod pipeline;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = if cli.command.is_none() && cli.analyze.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match cli.command {
        Some(Commands::Report { file }) => commands::report::run(&file),
        Some(Commands::Setup { interactive }) => commands::setup::run(interactive),
        Some(Commands::Check) => commands::check::run(),
        Some(Commands::Version) => commands::version::run(),
        None => commands::analyze::run(cli.analyze),
    }
}
