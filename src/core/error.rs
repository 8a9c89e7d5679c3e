//! Error types for rate loading and conversion

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExchangeError {
    #[error("Failed to fetch rates: {0}")]
    Fetch(String),

    #[error("Failed to parse rates: {0}")]
    Parse(String),

    #[error("Unknown currency {code}. Known currencies: {}", known.join(" "))]
    UnknownCurrency { code: String, known: Vec<String> },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unexpected argument: {0}")]
    UnexpectedArgument(String),
}

pub type Result<T> = std::result::Result<T, ExchangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_currency_lists_known_codes() {
        let err = ExchangeError::UnknownCurrency {
            code: "XXX".to_string(),
            known: vec!["EUR".to_string(), "JPY".to_string(), "USD".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unknown currency XXX. Known currencies: EUR JPY USD"
        );
    }
}
