use std::{process::ExitCode, sync::Arc};

use archiver::Archiver;
use clap::Parser;
use cli::{Cli, Mode};
use error::AppResult;
use runtime::RunSummary;
use service::http::HttpService;

extern crate pretty_env_logger;
#[macro_use]
extern crate log;

mod archiver;
mod cli;
mod config;
mod error;
mod platform;
mod runtime;
mod service;

#[tokio::main]
async fn main() -> ExitCode {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    let _ = pretty_env_logger::try_init_timed();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(summary) => {
            if summary.failed > 0 {
                warn!("{} downloads failed, see the error log", summary.failed);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", service::journal::error_trace(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> AppResult<RunSummary> {
    let config = config::build_config(&cli)?;

    info!("Initializing HttpService...");
    let http = Arc::new(HttpService::new(&config.instagram)?);

    let archiver = Archiver::new(config, http);
    match cli.mode {
        Mode::Live { profile } => archiver.run_live(&profile).await,
        Mode::Offline => archiver.run_offline().await,
    }
}
