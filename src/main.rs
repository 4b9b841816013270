use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod settings;

use cli::{Cli, Command};
use commands::Session;
use error::CliError;
use settings::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(dir) = cli.input_dir {
        settings.network.input_dir = dir;
    }
    if let Some(threads) = cli.threads.or(settings.skim.threads) {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let session = Session::open(settings)?;

    match cli.command {
        Command::Skim {
            query,
            format,
            output,
        } => commands::skim(&session, &query, format, output),
        Command::Path {
            from,
            to,
            query,
            seq,
        } => commands::path(&session, &query, &from, &to, seq),
        Command::Tree { from, query, seq } => commands::tree(&session, &query, &from, seq),
        Command::Agents {
            demand,
            output,
            query,
        } => commands::agents(&session, &query, &demand, output),
        Command::Bench { query } => commands::bench(&session, &query),
    }
}
