use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Styles an error heading for stderr. Colors are only emitted on a terminal.
pub fn style_error(text: &str) -> String {
    style(text).red().bold().for_stderr().to_string()
}

/// Creates a ticking spinner on stderr. It draws nothing when stderr is not a terminal.
pub fn new_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} [{elapsed_precise}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
