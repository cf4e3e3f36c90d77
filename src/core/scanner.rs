//! Sequential batch fetching of quotes.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::{ScanError, ScanResult};
use super::pair::normalize_pair;
use super::quote::{FetchResult, QuoteProvider};

/// Runs batches of pair tokens against a [`QuoteProvider`], one call at a time.
pub struct Scanner {
    provider: Arc<dyn QuoteProvider>,
    api_key: String,
    delay: Duration,
}

impl Scanner {
    /// `delay` is the courtesy pause taken after every successful fetch.
    pub fn new(provider: Arc<dyn QuoteProvider>, api_key: impl Into<String>, delay: Duration) -> Self {
        Scanner {
            provider,
            api_key: api_key.into(),
            delay,
        }
    }

    /// Fetches quotes for `pairs` in order.
    ///
    /// Blank tokens are skipped. A failing pair contributes its message to
    /// [`FetchResult::errors`] and the batch moves on. The only hard failure is
    /// [`ScanError::MissingCredential`], raised before any pair is touched.
    pub async fn fetch_exchange_rates<I, S>(&self, pairs: I) -> ScanResult<FetchResult>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.api_key.is_empty() {
            return Err(ScanError::MissingCredential);
        }

        let mut result = FetchResult::default();

        for raw_pair in pairs {
            let raw_pair = raw_pair.as_ref();
            if raw_pair.trim().is_empty() {
                continue;
            }

            let fetched = match normalize_pair(raw_pair) {
                Ok(pair) => self.provider.fetch_quote(&pair, &self.api_key).await,
                Err(e) => Err(e),
            };

            match fetched {
                Ok(quote) => {
                    debug!(pair = %quote.pair, rate = quote.exchange_rate, "Fetched quote");
                    result.quotes.push(quote);
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => {
                    warn!(pair = raw_pair, error = %e, "Failed to fetch quote");
                    result.errors.push(e.to_string());
                }
            }
        }

        info!(
            quotes = result.quotes.len(),
            errors = result.errors.len(),
            "Batch finished"
        );
        Ok(result)
    }
}
