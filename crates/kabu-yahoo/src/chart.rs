use crate::error::YahooError;
use chrono::DateTime;
use kabu_core::{PriceRow, PriceSeries};
use serde::Deserialize;
use tracing::{error, trace, warn};

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Prices from Yahoo Finance, per ticker
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

pub(crate) fn url(base: &str, ticker: &str, interval: &str, range: &str) -> String {
    let tckr = ticker.to_uppercase();
    format!("{base}/v8/finance/chart/{tckr}?symbol={tckr}&interval={interval}&range={range}")
}

/// Decode a chart payload into price rows.
///
/// Bars with a null open, high, low or close are skipped (Yahoo pads intraday gaps with
/// nulls). A "Not Found" error, or a missing `chart.result`, decodes to an empty series.
pub(crate) fn parse(bytes: &[u8], ticker: &str) -> Result<PriceSeries, YahooError> {
    trace!("Deserializing price data for {ticker}");
    let de = serde_json::from_slice::<PriceHistory>(bytes).map_err(|e| {
        error!("{ticker} price deserialization error: {e}");
        e
    })?;

    if let Some(err) = de.chart.error {
        if err.code == "Not Found" {
            warn!("{ticker}: {}", err.description);
            return Ok(vec![]);
        }
        return Err(YahooError::Provider {
            code: err.code,
            description: err.description,
        });
    }

    let Some(base) = de.chart.result.and_then(|result| result.into_iter().next()) else {
        warn!("{ticker} contained no \"chart.result\" object; returning an empty series");
        return Ok(vec![]);
    };
    let Some(price) = base.indicators.quote.into_iter().next() else {
        return Ok(vec![]);
    };

    trace!("Transforming price data for {ticker}");
    let series = base
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(i, timestamp)| {
            let at = |column: &Vec<Option<f64>>| column.get(i).copied().flatten();
            Some(PriceRow {
                time: DateTime::from_timestamp(*timestamp, 0)?,
                open: at(&price.open)?,
                high: at(&price.high)?,
                low: at(&price.low)?,
                close: at(&price.close)?,
                volume: price.volume.get(i).copied().flatten().unwrap_or(0),
            })
        })
        .collect::<PriceSeries>();

    trace!("{ticker}: {} of {} bars kept", series.len(), base.timestamp.len());
    Ok(series)
}

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Deserialize, Debug)]
struct PriceHistory {
    chart: PriceResponse,
}

#[derive(Deserialize, Debug)]
struct PriceResponse {
    result: Option<Vec<PriceCategories>>,
    error: Option<ProviderError>,
}

#[derive(Deserialize, Debug)]
pub(crate) struct ProviderError {
    pub code: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize, Debug)]
struct PriceCategories {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}
