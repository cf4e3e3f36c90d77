use anyhow::{Context, Result};
use clap::Parser;
use fxscan::core::config::AppConfig;
use fxscan::core::log::init_server_logging;
use fxscan::server::app_router;

#[derive(Parser)]
#[command(version, about = "Serve live forex quotes over HTTP")]
struct Args {
    /// Path to optional configuration file
    #[arg(short, long)]
    config_path: Option<String>,

    /// Address to listen on, overrides `server.listen_addr`
    #[arg(short, long)]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_server_logging();

    let config = AppConfig::load_or_default(args.config_path.as_deref())?;
    let state = fxscan::build_state(&config, AppConfig::api_key_from_env())?;
    let router = app_router(state);

    let listen_addr = args.listen.unwrap_or(config.server.listen_addr);
    let listener = tokio::net::TcpListener::bind(&listen_addr)
        .await
        .with_context(|| format!("Failed to bind {listen_addr}"))?;
    tracing::info!("Listening on {}", listen_addr);
    axum::serve(listener, router).await?;
    Ok(())
}
