mod chart;
pub mod error;
mod summary;

pub use error::YahooError;

use async_trait::async_trait;
use kabu_core::{FetchWindow, Fundamentals, MarketData, PriceSeries};
use reqwest::{Client, StatusCode};
use tokio::sync::Mutex;
use tracing::{debug, error, trace, warn};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Visiting this sets the consent cookie that `getcrumb` requires.
const CONSENT_URL: &str = "https://fc.yahoo.com";

/// Connection settings, read from the environment (`.env` included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YahooConfig {
    pub user_agent: String,
    pub base_url: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        YahooConfig {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl YahooConfig {
    /// `USER_AGENT` & `YAHOO_BASE_URL`, falling back to the defaults.
    pub fn from_env() -> Self {
        let default = Self::default();
        YahooConfig {
            user_agent: dotenv::var("USER_AGENT").unwrap_or(default.user_agent),
            base_url: dotenv::var("YAHOO_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(default.base_url),
        }
    }
}

// -------------------------------------------------------------------------------------------------

/// Yahoo! Finance client: chart prices & quoteSummary fundamentals.
pub struct Yahoo {
    client: Client,
    base_url: String,
    crumb: Mutex<Option<String>>,
}

impl Yahoo {
    pub fn new(config: &YahooConfig) -> Result<Self, YahooError> {
        let client = reqwest::ClientBuilder::new()
            .user_agent(&config.user_agent)
            .cookie_store(true)
            .build()?;
        Ok(Yahoo {
            client,
            base_url: config.base_url.clone(),
            crumb: Mutex::new(None),
        })
    }

    /// Price bars for `ticker` over the given range & interval.
    pub async fn prices(&self, ticker: &str, window: &FetchWindow) -> Result<PriceSeries, YahooError> {
        let url = chart::url(&self.base_url, ticker, window.interval, window.range);
        trace!("Fetching price data for {ticker} from Yahoo Finance");

        // Yahoo sends its `error` object with a 4xx status, so the body is decoded regardless
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| {
                error!("{ticker} price fetching error: {e}\nURL: {url}");
                e
            })?
            .bytes()
            .await
            .map_err(|e| {
                error!("{ticker} byte transformation error: {e}\nURL: {url}");
                e
            })?;

        chart::parse(&response, ticker)
    }

    /// Flat fundamentals record for `ticker`.
    pub async fn summary(&self, ticker: &str) -> Result<Fundamentals, YahooError> {
        let crumb = self.crumb().await?;
        let url = summary::url(&self.base_url, ticker);
        trace!("Fetching quoteSummary for {ticker} from Yahoo Finance");

        let response = self
            .client
            .get(&url)
            .query(&[("crumb", crumb.as_str())])
            .send()
            .await
            .map_err(|e| {
                error!("{ticker} quoteSummary fetching error: {e}\nURL: {url}");
                e
            })?;
        let status = response.status();
        let body = response.bytes().await?;

        let parsed = summary::parse(&body, ticker);
        if crumb_rejected(status, &parsed) {
            warn!("Yahoo rejected the cached crumb; it will be refreshed on the next request");
            *self.crumb.lock().await = None;
        }
        parsed
    }

    /// The cached crumb, performing the cookie handshake on first use.
    async fn crumb(&self) -> Result<String, YahooError> {
        let mut cached = self.crumb.lock().await;
        if let Some(crumb) = cached.as_ref() {
            return Ok(crumb.clone());
        }

        debug!("Requesting a Yahoo Finance crumb");
        // the consent page answers 404, but still sets the cookie
        let _consent = self.client.get(CONSENT_URL).send().await?;
        let crumb = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .send()
            .await?
            .text()
            .await?;

        let crumb = crumb.trim().to_string();
        if crumb.is_empty() || crumb.contains(char::is_whitespace) || crumb.starts_with('<') {
            return Err(YahooError::Crumb(crumb));
        }

        *cached = Some(crumb.clone());
        Ok(crumb)
    }
}

/// A 401, or an `Unauthorized` error object under any status, means the crumb went stale.
fn crumb_rejected<T>(status: StatusCode, parsed: &Result<T, YahooError>) -> bool {
    status == StatusCode::UNAUTHORIZED
        || matches!(parsed, Err(YahooError::Provider { code, .. }) if code == "Unauthorized")
}

#[async_trait]
impl MarketData for Yahoo {
    async fn history(&self, symbol: &str, window: &FetchWindow) -> anyhow::Result<PriceSeries> {
        Ok(self.prices(symbol, window).await?)
    }

    async fn fundamentals(&self, symbol: &str) -> anyhow::Result<Fundamentals> {
        Ok(self.summary(symbol).await?)
    }
}
