//! Currency conversion over a loaded rate table

use chrono::NaiveDate;

use super::error::{ExchangeError, Result};
use super::rates::RateTable;

/// Converts `amount` of `from` into `to` using the cross rate of both
/// base-relative rates.
pub fn convert(table: &RateTable, amount: f64, from: &str, to: &str) -> Result<f64> {
    let rate_from = lookup(table, from)?;
    let rate_to = lookup(table, to)?;
    Ok(amount * rate_to / rate_from)
}

fn lookup(table: &RateTable, code: &str) -> Result<f64> {
    table
        .rate(code)
        .ok_or_else(|| ExchangeError::UnknownCurrency {
            code: code.to_uppercase(),
            known: table.currencies(),
        })
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

impl ConversionRequest {
    /// Interprets positional words as `[AMOUNT] [TO] [FROM]`.
    ///
    /// The first word is taken as the amount when it parses as a number. Words
    /// that look numeric but do not parse, and negative or non-finite amounts,
    /// are rejected.
    pub fn from_args<S: AsRef<str>>(
        args: &[S],
        default_from: &str,
        default_to: &str,
    ) -> Result<Self> {
        let mut words = args.iter().map(AsRef::<str>::as_ref).peekable();

        let amount = match words.peek().copied() {
            Some(first) if looks_numeric(first) => {
                let amount = parse_amount(first)?;
                words.next();
                amount
            }
            _ => 1.0,
        };

        let to = words.next().unwrap_or(default_to).to_uppercase();
        let from = words.next().unwrap_or(default_from).to_uppercase();

        if let Some(extra) = words.next() {
            return Err(ExchangeError::UnexpectedArgument(extra.to_string()));
        }

        Ok(ConversionRequest { amount, from, to })
    }

    pub fn execute(&self, table: &RateTable) -> Result<ConversionResult> {
        let converted = convert(table, self.amount, &self.from, &self.to)?;
        Ok(ConversionResult {
            amount: self.amount,
            from: self.from.clone(),
            to: self.to.clone(),
            converted,
            date: table.date(),
        })
    }
}

fn looks_numeric(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit()) || word.parse::<f64>().is_ok()
}

fn parse_amount(word: &str) -> Result<f64> {
    let amount: f64 = word
        .parse()
        .map_err(|_| ExchangeError::InvalidAmount(format!("'{word}' is not a number")))?;

    if !amount.is_finite() {
        return Err(ExchangeError::InvalidAmount(format!(
            "'{word}' is not a finite number"
        )));
    }
    if amount < 0.0 {
        return Err(ExchangeError::InvalidAmount(format!("'{word}' is negative")));
    }
    Ok(amount)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversionResult {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub converted: f64,
    /// Snapshot date of the rates used
    pub date: Option<NaiveDate>,
}

impl ConversionResult {
    /// Formats as `<amount> <from> = <converted> <to>`. Without a precision the
    /// converted value is printed at full precision.
    pub fn render(&self, precision: Option<usize>) -> String {
        let converted = match precision {
            Some(places) => format!("{:.*}", places, self.converted),
            None => self.converted.to_string(),
        };
        format!("{} {} = {} {}", self.amount, self.from, converted, self.to)
    }
}
