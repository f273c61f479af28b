//! `wikicorpus`: crawl a MediaWiki site's page index and harvest every
//! article into numbered JSON batch files.

use std::process::ExitCode;

use clap::Parser;
use corpus_logging::{corpus_error, LogDestination};
use log::LevelFilter;

mod cli;
mod commands;
mod config;

use cli::{Cli, Command};
use commands::RunStatus;
use config::{AppConfig, Overrides};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    match dispatch(cli).await {
        Ok(status) => status.into(),
        Err(err) => {
            corpus_error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    corpus_logging::initialize(destination, level);
}

async fn dispatch(cli: Cli) -> anyhow::Result<RunStatus> {
    let file_config = AppConfig::load(cli.config.as_deref())?;
    match &cli.command {
        Command::Crawl(args) => {
            let config = file_config.apply(Overrides::from(args));
            commands::crawl(&config).await
        }
        Command::Harvest(args) => {
            let config = file_config.apply(Overrides::from(args));
            commands::harvest(&config).await
        }
        Command::Run(args) => {
            let config = file_config.apply(Overrides::from(args));
            commands::run(&config).await
        }
        Command::Stats(args) => {
            let config = file_config.apply(Overrides::from(args));
            commands::stats(&config)
        }
    }
}
