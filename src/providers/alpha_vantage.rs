//! Alpha Vantage `CURRENCY_EXCHANGE_RATE` provider.
//!
//! Free tier keys are limited to a handful of calls per minute, which is why the
//! scanner pauses between successful fetches.

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::{debug, error, instrument};

use crate::core::error::{ScanError, ScanResult};
use crate::core::pair::CurrencyPair;
use crate::core::quote::{Quote, QuoteProvider};

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co";

pub struct AlphaVantageProvider {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl AlphaVantageProvider {
    /// Every request made by this provider gives up after `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let endpoint = format!("{}/query", base_url.trim_end_matches('/'));
        let endpoint = reqwest::Url::parse(&endpoint)
            .with_context(|| format!("Invalid Alpha Vantage base URL: {base_url}"))?;
        let client = reqwest::Client::builder()
            .user_agent("fxscan/0.1")
            .timeout(timeout)
            .build()?;

        Ok(AlphaVantageProvider { endpoint, client })
    }

    fn request_url(&self, pair: &CurrencyPair, api_key: &str) -> reqwest::Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("function", "CURRENCY_EXCHANGE_RATE")
            .append_pair("from_currency", pair.base())
            .append_pair("to_currency", pair.quote())
            .append_pair("apikey", api_key);
        url
    }
}

const QUOTE_BLOCK: &str = "Realtime Currency Exchange Rate";
const ERROR_FIELDS: [&str; 3] = ["Error Message", "Note", "Information"];

fn message_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn number_field(block: &Map<String, Value>, key: &str) -> Option<f64> {
    let value = match block.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    value.filter(|v| v.is_finite())
}

fn text_field(block: &Map<String, Value>, key: &str, fallback: &str) -> String {
    block
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}

/// Translates a raw `CURRENCY_EXCHANGE_RATE` payload into a [`Quote`].
///
/// Upstream errors win over data: `Error Message`, then `Note` (throttling), then
/// `Information`. Missing or malformed numbers never fail the parse; the rate
/// falls back to `0.0` and bid/ask become `None`.
pub fn parse_quote(pair: &CurrencyPair, payload: &Value) -> ScanResult<Quote> {
    let unexpected = || ScanError::UnexpectedResponse(pair.to_string());
    let response = payload.as_object().ok_or_else(unexpected)?;

    // A present key counts even when its value is null.
    if let Some(message) = ERROR_FIELDS.iter().find_map(|field| response.get(*field)) {
        return Err(ScanError::Upstream(message_text(message)));
    }

    let block = match response.get(QUOTE_BLOCK) {
        Some(Value::Object(block)) if !block.is_empty() => block,
        _ => return Err(unexpected()),
    };

    Ok(Quote {
        pair: pair.to_string(),
        exchange_rate: number_field(block, "5. Exchange Rate").unwrap_or(0.0),
        bid_price: number_field(block, "8. Bid Price"),
        ask_price: number_field(block, "9. Ask Price"),
        last_refreshed: text_field(block, "6. Last Refreshed", "Unknown"),
        timezone: text_field(block, "7. Time Zone", "UTC"),
        from_currency: text_field(block, "2. From_Currency Name", pair.base()),
        to_currency: text_field(block, "4. To_Currency Name", pair.quote()),
    })
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    #[instrument(
        name = "AlphaVantageFetch",
        skip_all,
        fields(pair = %pair)
    )]
    async fn fetch_quote(&self, pair: &CurrencyPair, api_key: &str) -> ScanResult<Quote> {
        let network_error = |e: reqwest::Error| ScanError::network(pair.to_string(), e);

        debug!(
            "Requesting exchange rate from {}",
            self.request_url(pair, "***")
        );

        let response = self
            .client
            .get(self.request_url(pair, api_key))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(network_error)?;

        let text = response.text().await.map_err(network_error)?;

        let payload: Value = match serde_json::from_str(&text) {
            Ok(payload) => payload,
            Err(e) => {
                error!(
                    error = ?e,
                    response = %text,
                    "Failed to parse exchange rate response"
                );
                return Err(ScanError::UnexpectedResponse(pair.to_string()));
            }
        };

        parse_quote(pair, &payload)
    }
}
