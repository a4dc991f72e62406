use clap::Parser;
use slack_core::core::services::config_service::{ConfigService, Overrides};
use slack_core::error::AppError;
use slack_core::utils::logging::init_logging;
use std::env;
use tracing::debug;

mod cli;

use cli::dispatcher::Dispatcher;
use cli::main_types::Cli;

/// Set to any non-empty value to keep tokens out of the OS keyring.
const NO_KEYRING_ENV: &str = "SLACK_CLI_NO_KEYRING";

fn report(err: &AppError) -> ! {
    eprintln!("{} Error: {}", err.severity().emoji(), err);
    if let Some(hint) = err.troubleshooting_hint() {
        eprintln!("\n{}", hint);
    }
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let use_keyring = env::var(NO_KEYRING_ENV).map_or(true, |v| v.is_empty());
    let service = match ConfigService::load(cli.config_dir.as_deref(), use_keyring) {
        Ok(service) => service,
        Err(err) => report(&err),
    };
    debug!(config = %service.config_path().display(), use_keyring, "configuration loaded");

    let overrides = Overrides {
        token: cli.token.filter(|t| !t.is_empty()),
        base_url: cli.base_url.filter(|u| !u.is_empty()),
    };

    let dispatcher = Dispatcher::new(service, overrides, cli.output);
    if let Err(err) = dispatcher.dispatch(cli.command).await {
        report(&err);
    }
}
