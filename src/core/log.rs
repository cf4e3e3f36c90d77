use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// `RUST_LOG` wins when set; otherwise `--verbose` turns on this crate's debug output.
fn cli_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let default = if verbose { "fxscan=debug" } else { "off" };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Request traces from `tower_http` are emitted at debug, so they are enabled
/// explicitly next to the `info` default.
fn server_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("info,tower_http=debug"))
}

fn rust_log() -> Option<String> {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|v| !v.is_empty())
}

/// Logging for the command line tool, always on stderr so quote lines on stdout
/// stay clean.
pub fn init_logging(verbose: bool) {
    let filter = cli_filter(verbose, rust_log().as_deref());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Logging for the HTTP server: `info` by default, JSON lines when
/// `FXSCAN_LOG_FORMAT=json`.
pub fn init_server_logging() {
    let log_format = std::env::var("FXSCAN_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let registry = tracing_subscriber::registry().with(server_filter(rust_log().as_deref()));

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_cli_is_silent_by_default() {
        assert_eq!(cli_filter(false, None).max_level_hint(), Some(LevelFilter::OFF));
    }

    #[test]
    fn test_cli_verbose_enables_debug() {
        assert_eq!(cli_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_cli_honours_rust_log_without_verbose() {
        assert_eq!(
            cli_filter(false, Some("fxscan=trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(
            cli_filter(false, Some("info")).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn test_server_default_keeps_request_traces() {
        let filter = server_filter(None);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
        assert!(filter.to_string().contains("tower_http=debug"));
    }
}
