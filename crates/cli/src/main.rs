use std::process::ExitCode;

use bridge_core::{config::Config, telemetry};
use clap::Parser as _;
use cli::Cli;
use tokio::{
    select,
    signal::unix::{SignalKind, signal},
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

mod cli;
mod clipboard;
mod convert;
mod session;
mod status;
mod tokens;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load_from(&cli.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Failed to load configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let subscriber = telemetry::get_subscriber("info");
    if let Err(err) = subscriber.and_then(|subscriber| telemetry::init_subscriber(subscriber)) {
        eprintln!("Failed to set up logging: {err}");
        return ExitCode::FAILURE;
    }

    info!(config = %config.summary(), "starting");

    let shutdown_token = CancellationToken::new();
    let command_jh = tokio::spawn(cli.run(config, shutdown_token.clone()));

    // Set up signal handlers for graceful shutdown
    let mut sigterm = signal(SignalKind::terminate())
        .expect("setting sigterm listener on unix should always work");
    let mut sigint = signal(SignalKind::interrupt())
        .expect("setting sigint listener on unix should always work");

    // Wait for either command completion or interrupt signal
    let result = select! {
        res = command_jh => {
            res.map(|command_result| match command_result {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    error!(error = ?e, "command failed");
                    ExitCode::FAILURE
                }
            })
        }
        _ = sigterm.recv() => {
            info!("received SIGTERM signal");
            shutdown_token.cancel();
            Ok(ExitCode::FAILURE)
        }
        _ = sigint.recv() => {
            info!("received SIGINT signal");
            shutdown_token.cancel();
            Ok(ExitCode::FAILURE)
        }
    };

    match result {
        Ok(exit_code) => {
            info!("command completed");
            exit_code
        }
        Err(e) => {
            error!(%e, "command exited unexpectedly");
            ExitCode::FAILURE
        }
    }
}
