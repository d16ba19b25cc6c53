//! Command-line interface parsing for the Pokedex CLI
//!
//! This module handles parsing of CLI arguments using clap and turns them into a
//! validated `StartupConfig` for the API client, the response cache, and logging.

use std::time::Duration;

use clap::Parser;
use thiserror::Error;

use crate::data::POKEAPI_BASE_URL;

/// Default cache TTL in seconds (also the sweep period)
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

/// Default number of location areas per `map` page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The base URL is not an http(s) URL
    #[error("Invalid base URL: '{0}'. Expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Pokedex CLI - Browse Pokemon location areas from the terminal
#[derive(Parser, Debug)]
#[command(name = "pokedex")]
#[command(about = "Browse Pokemon location areas with a cached PokeAPI client")]
#[command(version)]
pub struct Cli {
    /// Base URL of the PokeAPI
    #[arg(long, value_name = "URL", default_value = POKEAPI_BASE_URL)]
    pub base_url: String,

    /// Seconds a cached response stays fresh; also how often the cache is swept
    #[arg(
        long,
        value_name = "SECONDS",
        default_value_t = DEFAULT_CACHE_TTL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub cache_ttl: u64,

    /// Number of location areas shown per page
    #[arg(
        long,
        value_name = "N",
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=100)
    )]
    pub page_size: u32,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub base_url: String,
    pub cache_ttl: Duration,
    pub page_size: u32,
    pub verbose: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            base_url: POKEAPI_BASE_URL.to_string(),
            cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            page_size: DEFAULT_PAGE_SIZE,
            verbose: false,
        }
    }
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with appropriate settings
    /// * `Err(CliError)` if the base URL is not http(s)
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let base_url = cli.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CliError::InvalidBaseUrl(cli.base_url.clone()));
        }

        Ok(StartupConfig {
            base_url: base_url.to_string(),
            cache_ttl: Duration::from_secs(cli.cache_ttl),
            page_size: cli.page_size,
            verbose: cli.verbose,
        })
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "pokedex=debug"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args_uses_defaults() {
        let cli = Cli::parse_from(["pokedex"]);
        assert_eq!(cli.base_url, POKEAPI_BASE_URL);
        assert_eq!(cli.cache_ttl, 60);
        assert_eq!(cli.page_size, 20);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_all_options() {
        let cli = Cli::parse_from([
            "pokedex",
            "--base-url",
            "http://localhost:8080/api/v2",
            "--cache-ttl",
            "15",
            "--page-size",
            "5",
            "-v",
        ]);
        assert_eq!(cli.base_url, "http://localhost:8080/api/v2");
        assert_eq!(cli.cache_ttl, 15);
        assert_eq!(cli.page_size, 5);
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_zero_ttl() {
        let result = Cli::try_parse_from(["pokedex", "--cache-ttl", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_out_of_range_page_size() {
        assert!(Cli::try_parse_from(["pokedex", "--page-size", "0"]).is_err());
        assert!(Cli::try_parse_from(["pokedex", "--page-size", "101"]).is_err());
    }

    #[test]
    fn test_startup_config_default_matches_cli_defaults() {
        let cli = Cli::parse_from(["pokedex"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config, StartupConfig::default());
    }

    #[test]
    fn test_startup_config_from_cli_converts_ttl() {
        let cli = Cli::parse_from(["pokedex", "--cache-ttl", "300"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn test_startup_config_from_cli_invalid_base_url() {
        let cli = Cli::parse_from(["pokedex", "--base-url", "ftp://example.com"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Invalid base URL"));
        assert!(err.to_string().contains("ftp://example.com"));
    }

    #[test]
    fn test_default_log_filter_follows_verbose() {
        let mut config = StartupConfig::default();
        assert_eq!(config.default_log_filter(), "warn");
        config.verbose = true;
        assert_eq!(config.default_log_filter(), "pokedex=debug");
    }
}
