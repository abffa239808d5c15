//! Daytrip CLI entry point.

use clap::Parser;

use daytrip::cli::commands::{recommend, serve, session};
use daytrip::cli::{handle_error, Cli, Commands};
use daytrip::domain::models::Config;
use daytrip::infrastructure::config::ConfigLoader;
use daytrip::infrastructure::logging::{LogConfig, LoggerImpl};

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    match &cli.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => handle_error(&err, cli.json),
    };

    let _logger = match LogConfig::try_from(&config.logging).and_then(|c| LoggerImpl::init(&c)) {
        Ok(logger) => logger,
        Err(err) => handle_error(&err, cli.json),
    };

    let result = match cli.command {
        Commands::Serve(args) => serve::execute(args, &config).await,
        Commands::Recommend(args) => recommend::execute(args, &config, cli.json).await,
        Commands::Regenerate => session::regenerate(&config, cli.json),
        Commands::Select { index } => session::select(index, &config, cli.json),
        Commands::Show => session::show(&config, cli.json),
        Commands::Reset => session::reset(&config, cli.json),
    };

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
