mod assistant;
mod chat;
mod classify;
mod cli;
mod config;
mod extract;
mod http;
mod location;
mod marine;
mod model;
mod scan;
mod shops;
mod storage;
mod weather;

use std::{io, process};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

/// Log filter directive, e.g. `FISHID_LOG=fishid=debug`.
const LOG_ENV: &str = "FISHID_LOG";

fn main() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
