//! Core quote scanning logic

pub mod config;
pub mod error;
pub mod log;
pub mod pair;
pub mod quote;
pub mod scanner;

// Re-export main types for cleaner imports
pub use error::{ScanError, ScanResult};
pub use pair::{CurrencyPair, normalize_pair};
pub use quote::{FetchResult, Quote, QuoteProvider};
pub use scanner::Scanner;
