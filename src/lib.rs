pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::core::Scanner;
use crate::core::config::{API_KEY_ENV, AppConfig};
use crate::providers::alpha_vantage::AlphaVantageProvider;
use crate::server::AppState;

/// Wires the Alpha Vantage provider into a [`Scanner`] using `config`.
pub fn build_scanner(config: &AppConfig, api_key: &str) -> Result<Scanner> {
    debug!("Loaded config: {config:#?}");
    let provider = AlphaVantageProvider::new(
        &config.providers.alpha_vantage.base_url,
        config.request_timeout(),
    )?;
    Ok(Scanner::new(
        Arc::new(provider),
        api_key,
        config.request_delay(),
    ))
}

/// Builds the shared server state. Without a credential every request answers 500.
pub fn build_state(config: &AppConfig, api_key: Option<String>) -> Result<Arc<AppState>> {
    let scanner = match api_key {
        Some(key) => Some(build_scanner(config, &key)?),
        None => {
            warn!("{API_KEY_ENV} is not set, /api/forex will answer 500");
            None
        }
    };

    Ok(Arc::new(AppState {
        scanner,
        default_pairs: config.default_pairs.clone(),
    }))
}

/// Runs the command line flow for `pairs` and returns the process exit status.
pub async fn run(pairs: &[String], config_path: Option<&str>, api_key: &str) -> Result<u8> {
    let config = AppConfig::load_or_default(config_path)?;
    let scanner = build_scanner(&config, api_key)?;
    cli::scan::run(&scanner, pairs).await
}
