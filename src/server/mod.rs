//! HTTP transport: `GET /api/forex?pairs=EUR/USD,GBP-USD&pairs=usd_jpy`.

pub mod error;

use axum::{
    Json, Router,
    extract::{RawQuery, State},
    http::StatusCode,
    routing::get,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::core::config::API_KEY_ENV;
use crate::core::{FetchResult, Scanner};
use error::{ApiError, ApiResult};

pub struct AppState {
    /// `None` when the credential was not configured at startup.
    pub scanner: Option<Scanner>,
    pub default_pairs: Vec<String>,
}

/// Collects `pairs` values from a raw query string. Values may be repeated and
/// comma separated; blanks are dropped.
pub fn parse_pairs(query: Option<&str>) -> Vec<String> {
    let params: Vec<(String, String)> = query
        .and_then(|q| serde_urlencoded::from_str(q).ok())
        .unwrap_or_default();

    params
        .into_iter()
        .filter(|(key, _)| key == "pairs")
        .flat_map(|(_, value)| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect()
}

async fn get_forex(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<FetchResult>> {
    let scanner = state.scanner.as_ref().ok_or_else(|| {
        ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Missing {API_KEY_ENV} environment variable."),
        )
    })?;

    let mut pairs = parse_pairs(query.as_deref());
    if pairs.is_empty() {
        pairs = state.default_pairs.clone();
    }
    debug!(?pairs, "Scanning requested pairs");

    let result = scanner.fetch_exchange_rates(&pairs).await?;
    Ok(Json(result))
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/forex", get(get_forex))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pairs_handles_commas_and_repeats() {
        assert_eq!(
            parse_pairs(Some("pairs=EUR/USD,GBP-USD&pairs=usd_jpy")),
            vec!["EUR/USD", "GBP-USD", "usd_jpy"]
        );
        assert_eq!(
            parse_pairs(Some("pairs=EUR%2FUSD%2C+%2C&other=x&pairs=")),
            vec!["EUR/USD"]
        );
    }

    #[test]
    fn test_parse_pairs_empty() {
        assert!(parse_pairs(None).is_empty());
        assert!(parse_pairs(Some("")).is_empty());
        assert!(parse_pairs(Some("pairs=,,")).is_empty());
        assert!(parse_pairs(Some("symbols=EURUSD")).is_empty());
    }
}
