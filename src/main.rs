//! Pokedex CLI - Browse Pokemon location areas from the terminal
//!
//! A line-oriented REPL that pages through PokeAPI location areas and lists the
//! Pokemon found in each, caching raw responses in memory for a fixed TTL.

use std::io;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pokedex::cache::Cache;
use pokedex::cli::{Cli, StartupConfig};
use pokedex::commands::Session;
use pokedex::data::PokeApiClient;
use pokedex::repl;

/// Initializes logging on stderr so log lines never mix with REPL output
fn init_tracing(config: &StartupConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    init_tracing(&config);
    info!(base_url = %config.base_url, ttl = ?config.cache_ttl, "Starting Pokedex");

    let cache = Cache::new(config.cache_ttl);
    let client = PokeApiClient::with_base_url(cache.clone(), config.base_url.as_str());
    let mut session = Session::new(client, config.page_size);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    repl::run(&mut session, stdin.lock(), &mut stdout).await?;

    cache.shutdown();
    Ok(())
}
