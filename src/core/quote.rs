//! Quote types and the provider abstraction

use async_trait::async_trait;
use serde::Serialize;

use super::error::ScanResult;
use super::pair::CurrencyPair;

/// One point-in-time exchange rate observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub pair: String,
    pub exchange_rate: f64,
    pub bid_price: Option<f64>,
    pub ask_price: Option<f64>,
    pub last_refreshed: String,
    pub timezone: String,
    pub from_currency: String,
    pub to_currency: String,
}

/// Outcome of one batch: quotes in request order plus one message per failed pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FetchResult {
    #[serde(rename = "data")]
    pub quotes: Vec<Quote>,
    pub errors: Vec<String>,
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Performs exactly one upstream call for `pair`.
    async fn fetch_quote(&self, pair: &CurrencyPair, api_key: &str) -> ScanResult<Quote>;
}
