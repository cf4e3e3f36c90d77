//! Command line rendering of a batch.

use super::ui;
use crate::core::{FetchResult, Quote, Scanner};
use anyhow::Result;
use std::io::Write;

fn format_optional_price(value: Option<f64>) -> String {
    value.map_or("N/A".to_string(), |v| format!("{v:.6}"))
}

/// One quote per line, e.g.
/// `EUR/USD | Rate: 1.085000 | Bid: N/A | Ask: N/A | Updated: 2024-01-01 00:00:00 (UTC)`.
pub fn format_quote_line(quote: &Quote) -> String {
    format!(
        "{} | Rate: {:.6} | Bid: {} | Ask: {} | Updated: {} ({})",
        quote.pair,
        quote.exchange_rate,
        format_optional_price(quote.bid_price),
        format_optional_price(quote.ask_price),
        quote.last_refreshed,
        quote.timezone
    )
}

/// Exit status for a finished batch.
///
/// A mix of successes and failures exits with 2. A batch where every pair failed
/// still exits with 0, which is how the tool has always behaved.
pub fn exit_code(result: &FetchResult) -> u8 {
    if !result.errors.is_empty() && !result.quotes.is_empty() {
        2
    } else {
        0
    }
}

/// Writes quotes to `out` and the error summary to `err`, returning the exit status.
pub fn render(result: &FetchResult, out: &mut impl Write, err: &mut impl Write) -> Result<u8> {
    for quote in &result.quotes {
        writeln!(out, "{}", format_quote_line(quote))?;
    }

    if !result.errors.is_empty() {
        writeln!(err, "\n{}", ui::style_error("Errors:"))?;
        for message in &result.errors {
            writeln!(err, "- {message}")?;
        }
    }

    Ok(exit_code(result))
}

/// Fetches `pairs` with a spinner on stderr, then prints the results.
pub async fn run(scanner: &Scanner, pairs: &[String]) -> Result<u8> {
    let pb = ui::new_spinner(format!("Fetching {} pair(s)...", pairs.len()));
    let result = scanner.fetch_exchange_rates(pairs).await;
    pb.finish_and_clear();

    render(&result?, &mut std::io::stdout(), &mut std::io::stderr())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quote(pair: &str, bid: Option<f64>, ask: Option<f64>) -> Quote {
        Quote {
            pair: pair.to_string(),
            exchange_rate: 1.085,
            bid_price: bid,
            ask_price: ask,
            last_refreshed: "2024-01-01 00:00:00".to_string(),
            timezone: "UTC".to_string(),
            from_currency: "Euro".to_string(),
            to_currency: "United States Dollar".to_string(),
        }
    }

    #[test]
    fn test_format_quote_line() {
        assert_eq!(
            format_quote_line(&quote("EUR/USD", None, None)),
            "EUR/USD | Rate: 1.085000 | Bid: N/A | Ask: N/A | Updated: 2024-01-01 00:00:00 (UTC)"
        );
        assert_eq!(
            format_quote_line(&quote("EUR/USD", Some(1.0849), Some(1.08512345))),
            "EUR/USD | Rate: 1.085000 | Bid: 1.084900 | Ask: 1.085123 | Updated: 2024-01-01 00:00:00 (UTC)"
        );
    }

    #[test]
    fn test_exit_codes() {
        let ok = quote("EUR/USD", None, None);
        let cases = [
            (vec![ok.clone()], vec![], 0),
            (vec![ok.clone()], vec!["boom".to_string()], 2),
            (vec![], vec!["boom".to_string()], 0),
            (vec![], vec![], 0),
        ];
        for (quotes, errors, expected) in cases {
            let result = FetchResult { quotes, errors };
            assert_eq!(exit_code(&result), expected, "{result:?}");
        }
    }

    #[test]
    fn test_render_splits_streams() -> Result<()> {
        let result = FetchResult {
            quotes: vec![quote("EUR/USD", None, None)],
            errors: vec!["Invalid currency pair format: '???'".to_string()],
        };
        let mut out = Vec::new();
        let mut err = Vec::new();

        let code = render(&result, &mut out, &mut err)?;

        assert_eq!(code, 2);
        assert_eq!(
            String::from_utf8(out)?,
            "EUR/USD | Rate: 1.085000 | Bid: N/A | Ask: N/A | Updated: 2024-01-01 00:00:00 (UTC)\n"
        );
        let err = String::from_utf8(err)?;
        assert!(err.starts_with('\n'));
        assert!(err.contains("Errors:"));
        assert!(err.ends_with("- Invalid currency pair format: '???'\n"));
        Ok(())
    }
}
