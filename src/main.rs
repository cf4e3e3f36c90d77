use clap::Parser;
use fxscan::core::config::{API_KEY_ENV, AppConfig};
use fxscan::core::log::init_logging;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,

    /// Currency pairs, e.g. EUR/USD gbp-jpy USDCHF
    pairs: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if cli.pairs.is_empty() {
        eprintln!("Usage: fxscan EUR/USD GBPJPY ...");
        return ExitCode::from(1);
    }

    let Some(api_key) = AppConfig::api_key_from_env() else {
        eprintln!("Error: {API_KEY_ENV} environment variable is not set.");
        return ExitCode::from(1);
    };

    match fxscan::run(&cli.pairs, cli.config_path.as_deref(), &api_key).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
