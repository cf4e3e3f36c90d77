//! Currency pair parsing

use std::fmt::Display;
use std::str::FromStr;

use super::error::{ScanError, ScanResult};

const SEPARATORS: [char; 3] = ['/', '-', '_'];

/// An ordered (base, quote) pair of three letter ISO style codes, e.g. `EUR/USD`.
///
/// The only way to build one is through [`FromStr`], so both codes are always
/// three uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyPair {
    base: String,
    quote: String,
}

impl CurrencyPair {
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn quote(&self) -> &str {
        &self.quote
    }
}

impl Display for CurrencyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

fn is_currency_code(code: &str) -> bool {
    code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic())
}

impl FromStr for CurrencyPair {
    type Err = ScanError;

    /// Accepts `EUR/USD`, `eur-usd`, `EUR_USD` or a bare `EURUSD`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let sanitized = raw.trim();

        let (base, quote) = match sanitized.split_once(SEPARATORS) {
            Some(halves) => halves,
            None if sanitized.chars().count() == 6 => {
                let (mid, _) = sanitized
                    .char_indices()
                    .nth(3)
                    .ok_or_else(|| ScanError::InvalidFormat(raw.to_string()))?;
                sanitized.split_at(mid)
            }
            None => return Err(ScanError::InvalidFormat(raw.to_string())),
        };

        let base = base.trim().to_uppercase();
        let quote = quote.trim().to_uppercase();

        if !(is_currency_code(&base) && is_currency_code(&quote)) {
            return Err(ScanError::InvalidCodes(raw.to_string()));
        }

        Ok(CurrencyPair { base, quote })
    }
}

/// Normalizes a free-text token into a [`CurrencyPair`].
pub fn normalize_pair(raw: &str) -> ScanResult<CurrencyPair> {
    raw.parse()
}
