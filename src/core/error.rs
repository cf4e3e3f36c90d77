//! Error taxonomy for scanning quotes.

use thiserror::Error;

/// Errors raised while normalizing, fetching or batching quotes.
///
/// Everything except [`ScanError::MissingCredential`] is scoped to a single pair and
/// is turned into a message string by the scanner instead of aborting the batch.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Token had no separator and was not six characters long.
    #[error("Invalid currency pair format: '{0}'")]
    InvalidFormat(String),

    /// One of the halves is not a three letter alphabetic code.
    #[error("Invalid currency codes in pair '{0}'")]
    InvalidCodes(String),

    /// Timeout, transport failure or non-success HTTP status.
    #[error("Network error while fetching {pair}: {cause}")]
    Network {
        pair: String,
        /// The whole source chain, flattened into one line.
        cause: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with its own error or throttling message.
    #[error("{0}")]
    Upstream(String),

    /// The payload did not contain a quote block we understand.
    #[error("Unexpected response for {0}")]
    UnexpectedResponse(String),

    /// No API key was supplied at all.
    #[error("Alpha Vantage API key is missing.")]
    MissingCredential,
}

impl ScanError {
    /// Wraps a transport failure for `pair`. The request URL is dropped from the
    /// error so the credential never ends up in a message.
    pub fn network(pair: impl Into<String>, err: reqwest::Error) -> Self {
        let source = err.without_url();
        let mut parts = vec![source.to_string()];
        let mut next = std::error::Error::source(&source);
        while let Some(inner) = next {
            let text = inner.to_string();
            if parts.last() != Some(&text) {
                parts.push(text);
            }
            next = inner.source();
        }
        if source.is_timeout() && !parts.iter().any(|p| p.contains("timed out")) {
            parts.push("operation timed out".to_string());
        }

        ScanError::Network {
            pair: pair.into(),
            cause: parts.join(": "),
            source,
        }
    }
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;
