use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::info;

use crate::api::AlphaVantageClient;
use crate::models::price::{PriceRecord, PriceSeries};
use crate::models::query::{Query, SeriesKind};
use crate::utils::errors::{AppError, ExtractError};

pub const OPEN_KEY: &str = "1. open";
pub const HIGH_KEY: &str = "2. high";
pub const LOW_KEY: &str = "3. low";
pub const CLOSE_KEY: &str = "4. close";

/// Fetch the series for `query` and keep the entries inside its date range
pub async fn fetch_series(client: &AlphaVantageClient, query: &Query) -> Result<PriceSeries, AppError> {
    let payload = client.fetch_payload(query).await?;
    let series = extract_series(&payload, query.series_kind, query.start_date, query.end_date)?;

    info!(
        "Extracted {} {} records for {} between {} and {}",
        series.len(),
        query.series_kind.label(),
        query.symbol,
        query.start_date,
        query.end_date
    );
    Ok(series)
}

/// Walk the collection for `kind` and collect every entry dated within
/// `[start, end]` (inclusive, by calendar day), in payload order.
///
/// Every key must parse with the kind's timestamp format, even out-of-range
/// ones. Price fields are only read for entries that are kept.
pub fn extract_series(
    payload: &Value,
    kind: SeriesKind,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceSeries, ExtractError> {
    let collection_key = kind.collection_key();
    let collection = payload
        .get(collection_key)
        .and_then(Value::as_object)
        .ok_or_else(|| ExtractError::MissingField(collection_key.to_string()))?;

    let mut series = PriceSeries::new();
    for (key, entry) in collection {
        let timestamp = parse_timestamp(key, kind)?;
        let day = timestamp.date();
        if day < start || day > end {
            continue;
        }

        series.push(PriceRecord {
            timestamp,
            open: price_field(entry, OPEN_KEY)?,
            high: price_field(entry, HIGH_KEY)?,
            low: price_field(entry, LOW_KEY)?,
            close: price_field(entry, CLOSE_KEY)?,
        });
    }

    Ok(series)
}

/// Parse an entry key. Intraday keys carry seconds; the rest are plain dates at midnight.
pub fn parse_timestamp(key: &str, kind: SeriesKind) -> Result<NaiveDateTime, ExtractError> {
    let format = kind.key_format();
    let parsed = match kind {
        SeriesKind::Intraday => NaiveDateTime::parse_from_str(key, format).ok(),
        _ => NaiveDate::parse_from_str(key, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0)),
    };

    parsed.ok_or_else(|| ExtractError::InvalidTimestamp {
        value: key.to_string(),
        format,
    })
}

fn price_field(entry: &Value, field: &'static str) -> Result<f64, ExtractError> {
    let value = entry
        .get(field)
        .ok_or_else(|| ExtractError::MissingField(field.to_string()))?;

    // The provider quotes decimals as strings; accept bare numbers too.
    let (parsed, shown) = match value {
        Value::String(raw) => (raw.trim().parse::<f64>().ok(), raw.clone()),
        Value::Number(n) => (n.as_f64(), n.to_string()),
        other => (None, other.to_string()),
    };

    // "inf" and "NaN" parse as f64 but cannot be charted.
    match parsed {
        Some(price) if price.is_finite() => Ok(price),
        _ => Err(ExtractError::InvalidNumber { field, value: shown }),
    }
}
