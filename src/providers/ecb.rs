use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{debug, instrument, trace};
use xml::attribute::OwnedAttribute;
use xml::reader::{EventReader, XmlEvent};

use crate::core::error::{ExchangeError, Result};
use crate::core::rates::{RateTable, RateTableProvider};

pub const DEFAULT_SOURCE_URL: &str =
    "https://www.ecb.europa.eu/stats/eurofxref/eurofxref-daily.xml";
/// Currency every ECB reference rate is quoted against; the feed never lists it.
pub const BASE_CURRENCY: &str = "EUR";

const USER_AGENT: &str = concat!("exrate/", env!("CARGO_PKG_VERSION"));
const CUBE: &str = "Cube";

/// Loads the daily euro foreign exchange reference rates published by the ECB.
pub struct EcbProvider {
    url: String,
}

impl EcbProvider {
    pub fn new(url: &str) -> Self {
        EcbProvider {
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl RateTableProvider for EcbProvider {
    #[instrument(name = "EcbRateFetch", skip(self), fields(url = %self.url))]
    async fn load(&self) -> Result<RateTable> {
        debug!("Requesting reference rates from {}", self.url);

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ExchangeError::Fetch(format!("Failed to build HTTP client: {e}")))?;

        let response = client.get(&self.url).send().await.map_err(|e| {
            ExchangeError::Fetch(format!("Request error: {} for URL: {}", e, self.url))
        })?;

        debug!(status = %response.status(), "Received ECB response");

        if !response.status().is_success() {
            return Err(ExchangeError::Fetch(format!(
                "HTTP error: {} for URL: {}",
                response.status(),
                self.url
            )));
        }

        let body = response.text().await.map_err(|e| {
            ExchangeError::Fetch(format!("Failed to read response body: {e}"))
        })?;

        let table = parse_rate_table(&body)?;
        debug!(
            currencies = table.len(),
            date = ?table.date(),
            "Loaded reference rates"
        );
        Ok(table)
    }
}

/// Parses an ECB `eurofxref` document into a rate table.
///
/// The first `Cube` element carrying a `time` attribute is the snapshot; each
/// of its direct `Cube` children contributes one `currency`/`rate` entry. The
/// whole document must be well-formed even past the snapshot. The euro is
/// added with a rate of 1.0; a feed entry for it is rejected.
pub fn parse_rate_table(xml: &str) -> Result<RateTable> {
    let parser = EventReader::new(xml.as_bytes());

    let mut depth = 0usize;
    let mut snapshot_depth: Option<usize> = None;
    let mut snapshot_closed = false;
    let mut date = None;
    let mut entries = Vec::new();

    for event in parser {
        let event = event.map_err(|e| ExchangeError::Parse(format!("Malformed XML: {e}")))?;
        match event {
            XmlEvent::StartElement {
                name, attributes, ..
            } => {
                depth += 1;
                if snapshot_closed || name.local_name != CUBE {
                    continue;
                }
                match snapshot_depth {
                    None => {
                        if let Some(time) = attribute(&attributes, "time") {
                            trace!(time, "Found rate snapshot");
                            date = Some(parse_date(time)?);
                            snapshot_depth = Some(depth);
                        }
                    }
                    Some(outer) if depth == outer + 1 => {
                        let (code, rate) = parse_entry(&attributes)?;
                        if code == BASE_CURRENCY {
                            return Err(ExchangeError::Parse(format!(
                                "Feed lists base currency {BASE_CURRENCY} with rate {rate}"
                            )));
                        }
                        entries.push((code, rate));
                    }
                    Some(_) => {}
                }
            }
            XmlEvent::EndElement { .. } => {
                if snapshot_depth == Some(depth) {
                    snapshot_closed = true;
                }
                depth = depth.saturating_sub(1);
            }
            _ => {}
        }
    }

    if snapshot_depth.is_none() {
        return Err(ExchangeError::Parse(
            "No dated rate snapshot found in document".to_string(),
        ));
    }
    if entries.is_empty() {
        return Err(ExchangeError::Parse(
            "Rate snapshot contains no currency entries".to_string(),
        ));
    }

    Ok(RateTable::new(BASE_CURRENCY, date, entries))
}

fn attribute<'a>(attributes: &'a [OwnedAttribute], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|attr| attr.name.local_name == name)
        .map(|attr| attr.value.as_str())
}

fn parse_date(time: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(time, "%Y-%m-%d")
        .map_err(|e| ExchangeError::Parse(format!("Invalid snapshot date '{time}': {e}")))
}

fn parse_entry(attributes: &[OwnedAttribute]) -> Result<(String, f64)> {
    let code = attribute(attributes, "currency")
        .ok_or_else(|| ExchangeError::Parse("Rate entry without currency".to_string()))?;
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ExchangeError::Parse(format!("Invalid currency code '{code}'")));
    }

    let raw_rate = attribute(attributes, "rate")
        .ok_or_else(|| ExchangeError::Parse(format!("Rate entry for {code} without rate")))?;
    let rate: f64 = raw_rate
        .trim()
        .parse()
        .map_err(|_| ExchangeError::Parse(format!("Invalid rate '{raw_rate}' for {code}")))?;
    if !rate.is_finite() || rate <= 0.0 {
        return Err(ExchangeError::Parse(format!(
            "Rate for {code} must be positive, got {raw_rate}"
        )));
    }

    Ok((code.to_uppercase(), rate))
}
