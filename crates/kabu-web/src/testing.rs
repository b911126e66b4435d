use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use kabu_core::{FetchWindow, Fundamentals, MarketData, PriceRow, PriceSeries};
use serde_json::json;

/// Canned provider for handler tests.
pub struct Stub {
    closes: Vec<f64>,
    fail: bool,
}

impl Stub {
    pub fn with_closes(closes: &[f64]) -> Self {
        Stub {
            closes: closes.to_vec(),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Stub {
            closes: vec![],
            fail: true,
        }
    }
}

#[async_trait]
impl MarketData for Stub {
    async fn history(&self, _symbol: &str, _window: &FetchWindow) -> anyhow::Result<PriceSeries> {
        if self.fail {
            return Err(anyhow!("upstream timed out"));
        }
        Ok(self
            .closes
            .iter()
            .enumerate()
            .map(|(i, close)| PriceRow {
                time: Utc.timestamp_opt(1_714_570_200 + i as i64 * 300, 0).unwrap(),
                open: *close,
                high: *close + 1.0,
                low: *close - 1.0,
                close: *close,
                volume: 100,
            })
            .collect())
    }

    async fn fundamentals(&self, _symbol: &str) -> anyhow::Result<Fundamentals> {
        if self.fail {
            return Err(anyhow!("upstream timed out"));
        }
        Ok(serde_json::from_value(json!({
            "longName": "Apple Inc.",
            "marketCap": 2_950_000_000_000.0_f64,
            "trailingPE": 28.4
        }))?)
    }
}
