#![forbid(unsafe_code)]

//! `task-server`: HTTP API and browser page for the JSON task list.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use task_tracker::init_tracing;
use task_tracker::server::{serve, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("info");
    let config = ServerConfig::parse();

    match serve(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
