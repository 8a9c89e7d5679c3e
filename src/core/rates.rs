//! Reference rate table abstractions

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::error::Result;

/// Rates of each currency expressed as units per one unit of the base currency.
#[derive(Debug, Clone, PartialEq)]
pub struct RateTable {
    base: String,
    date: Option<NaiveDate>,
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    /// Builds a table from feed entries. Codes are stored uppercase and the
    /// base currency is always present with a rate of exactly 1.0.
    pub fn new<I, S>(base: &str, date: Option<NaiveDate>, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        let mut rates: BTreeMap<String, f64> = entries
            .into_iter()
            .map(|(code, rate)| (code.as_ref().to_uppercase(), rate))
            .collect();

        let base = base.to_uppercase();
        rates.insert(base.clone(), 1.0);

        RateTable { base, date, rates }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Date of the published snapshot, if the feed carried one.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(&code.to_uppercase()).copied()
    }

    /// Known currency codes in sorted order.
    pub fn currencies(&self) -> Vec<String> {
        self.rates.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.rates.iter().map(|(code, rate)| (code.as_str(), *rate))
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[async_trait]
pub trait RateTableProvider: Send + Sync {
    async fn load(&self) -> Result<RateTable>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_currency_is_injected() {
        let table = RateTable::new("EUR", None, [("USD", 1.4349), ("JPY", 152.30)]);

        assert_eq!(table.len(), 3);
        assert_eq!(table.base(), "EUR");
        assert_eq!(table.rate("EUR"), Some(1.0));
        assert_eq!(table.rate("USD"), Some(1.4349));
    }

    #[test]
    fn test_codes_are_case_normalized() {
        let table = RateTable::new("EUR", None, [("usd", 1.4349), ("Jpy", 152.30)]);

        assert_eq!(table.rate("USD"), Some(1.4349));
        assert_eq!(table.rate("usd"), Some(1.4349));
        assert_eq!(table.rate("jPy"), Some(152.30));
        assert_eq!(table.currencies(), vec!["EUR", "JPY", "USD"]);
    }

    #[test]
    fn test_duplicate_entry_last_write_wins() {
        let table = RateTable::new("EUR", None, [("USD", 1.0), ("USD", 1.5)]);
        assert_eq!(table.rate("USD"), Some(1.5));
    }

    #[test]
    fn test_missing_code() {
        let table = RateTable::new("EUR", None, Vec::<(String, f64)>::new());
        assert!(table.rate("GBP").is_none());
        assert!(!table.is_empty());
    }

    #[test]
    fn test_date_is_kept() {
        let date = NaiveDate::from_ymd_opt(2008, 9, 29);
        let table = RateTable::new("EUR", date, [("USD", 1.4349)]);
        assert_eq!(table.date(), date);
    }
}
