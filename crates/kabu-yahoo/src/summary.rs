use crate::chart::ProviderError;
use crate::error::YahooError;
use kabu_core::Fundamentals;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, trace};

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Fundamentals from Yahoo Finance's quoteSummary, per ticker
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// Modules requested from quoteSummary; earlier modules win when a key appears twice.
const MODULES: [&str; 4] = ["price", "summaryProfile", "summaryDetail", "defaultKeyStatistics"];

/// The crumb is appended separately, as a url-encoded query pair.
pub(crate) fn url(base: &str, ticker: &str) -> String {
    let tckr = ticker.to_uppercase();
    let modules = MODULES.join(",");
    format!("{base}/v10/finance/quoteSummary/{tckr}?modules={modules}")
}

/// Flatten the requested modules into a single key-value record.
///
/// ```json
/// { "price": { "marketCap": { "raw": 2.9e12, "fmt": "2.9T" } } }
/// ```
/// becomes `{ "marketCap": 2.9e12 }`.
pub(crate) fn parse(bytes: &[u8], ticker: &str) -> Result<Fundamentals, YahooError> {
    trace!("Deserializing quoteSummary for {ticker}");
    let de = serde_json::from_slice::<SummaryHistory>(bytes).map_err(|e| {
        error!("{ticker} quoteSummary deserialization error: {e}");
        e
    })?;

    if let Some(err) = de.quote_summary.error {
        return Err(YahooError::Provider {
            code: err.code,
            description: err.description,
        });
    }

    let mut info = Fundamentals::new();
    let result = de.quote_summary.result.unwrap_or_default();
    for module in result.iter().flat_map(|modules| {
        MODULES.iter().filter_map(move |name| modules.get(*name).and_then(Value::as_object))
    }) {
        for (key, value) in module {
            if info.0.contains_key(key) {
                continue;
            }
            if let Some(value) = scalar(value) {
                info.insert(key.clone(), value);
            }
        }
    }

    trace!("{ticker}: {} fundamentals collected", info.len());
    Ok(info)
}

/// `{raw, fmt}` collapses to `raw`; empty objects, nulls, arrays & nested objects are dropped.
fn scalar(value: &Value) -> Option<Value> {
    match value {
        Value::Null | Value::Array(_) => None,
        Value::Object(obj) => obj.get("raw").filter(|raw| !raw.is_null()).cloned(),
        other => Some(other.clone()),
    }
}

///////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
///////////////////////////////////////////////////////////////////////////////////////////////////////

/// A rejected crumb comes back under `finance` rather than `quoteSummary`.
#[derive(Deserialize, Debug)]
struct SummaryHistory {
    #[serde(rename = "quoteSummary", alias = "finance")]
    quote_summary: SummaryResponse,
}

#[derive(Deserialize, Debug)]
struct SummaryResponse {
    result: Option<Vec<Map<String, Value>>>,
    error: Option<ProviderError>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_lists_modules() {
        assert_eq!(
            url("https://query1.finance.yahoo.com", "msft"),
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/MSFT\
             ?modules=price,summaryProfile,summaryDetail,defaultKeyStatistics"
        );
    }

    #[test]
    fn modules_flatten_to_raw_values() {
        let body = r#"{
            "quoteSummary": {
                "result": [{
                    "price": {
                        "longName": "Apple Inc.",
                        "marketCap": { "raw": 2950000000000, "fmt": "2.95T", "longFmt": "2,950,000,000,000" },
                        "currency": "USD"
                    },
                    "summaryProfile": {
                        "sector": "Technology",
                        "industry": "Consumer Electronics",
                        "fullTimeEmployees": 161000,
                        "website": "https://www.apple.com",
                        "companyOfficers": []
                    },
                    "summaryDetail": {
                        "marketCap": { "raw": 1, "fmt": "1" },
                        "trailingPE": { "raw": 28.4, "fmt": "28.40" },
                        "dividendYield": { "raw": 0.0052, "fmt": "0.52%" },
                        "forwardPE": {}
                    },
                    "defaultKeyStatistics": {
                        "ytdReturn": { "raw": null, "fmt": null }
                    }
                }],
                "error": null
            }
        }"#;

        let info = parse(body.as_bytes(), "AAPL").unwrap();
        assert_eq!(info.text("longName").as_deref(), Some("Apple Inc."));
        assert_eq!(info.text("industry").as_deref(), Some("Consumer Electronics"));
        assert_eq!(info.number("marketCap"), Some(2_950_000_000_000.0));
        assert_eq!(info.number("trailingPE"), Some(28.4));
        assert_eq!(info.number("dividendYield"), Some(0.0052));
        assert_eq!(info.number("fullTimeEmployees"), Some(161000.0));
        assert_eq!(info.number("ytdReturn"), None);
        assert!(!info.0.contains_key("forwardPE"));
        assert!(!info.0.contains_key("companyOfficers"));
    }

    #[test]
    fn provider_error() {
        let body = r#"{
            "quoteSummary": {
                "result": null,
                "error": { "code": "Unauthorized", "description": "Invalid Crumb" }
            }
        }"#;
        let err = parse(body.as_bytes(), "AAPL").unwrap_err();
        assert_eq!(err.to_string(), "Invalid Crumb (Unauthorized)");
    }

    #[test]
    fn rejected_crumb_envelope() {
        let body = r#"{"finance":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#;
        match parse(body.as_bytes(), "AAPL") {
            Err(YahooError::Provider { code, description }) => {
                assert_eq!(code, "Unauthorized");
                assert_eq!(description, "Invalid Crumb");
            }
            other => panic!("expected a provider error, got {other:?}"),
        }
    }
}
