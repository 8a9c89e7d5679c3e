//! Core rate table and conversion logic

pub mod config;
pub mod convert;
pub mod error;
pub mod log;
pub mod rates;

// Re-export main types for cleaner imports
pub use convert::{ConversionRequest, ConversionResult, convert};
pub use error::{ExchangeError, Result};
pub use rates::{RateTable, RateTableProvider};
