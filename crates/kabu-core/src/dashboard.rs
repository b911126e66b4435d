use crate::chart;
use crate::error::{Error, Result};
use crate::fundamentals::Fundamentals;
use crate::kpi::{self, KpiCard, ProfileRow};
use crate::metrics::{self, DerivedMetrics};
use crate::schema::{ChartKind, DisplayMode, FetchWindow, Period, PriceSeries};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use utoipa::ToSchema;

/// Source of prices & fundamentals (e.g., Yahoo! Finance).
#[async_trait]
pub trait MarketData: Send + Sync {
    async fn history(&self, symbol: &str, window: &FetchWindow) -> anyhow::Result<PriceSeries>;

    async fn fundamentals(&self, symbol: &str) -> anyhow::Result<Fundamentals>;
}

/// The three dashboard inputs: ticker box, period dropdown & mode toggle.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DashboardQuery {
    pub ticker: String,
    #[serde(default)]
    pub period: Period,
    #[serde(default)]
    pub mode: DisplayMode,
}

/// Everything the dashboard needs to draw one refresh.
#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct DashboardView {
    pub ticker: String,
    pub mode: DisplayMode,
    pub chart_kind: ChartKind,
    pub metrics: DerivedMetrics,
    pub kpis: Vec<KpiCard>,

    /// Plotly figure description.
    #[schema(value_type = Object)]
    pub figure: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct ProfileView {
    pub ticker: String,
    pub rows: Vec<ProfileRow>,
}

/// Trim & upper-case the ticker box contents.
///
/// Yahoo symbols only use letters, digits & `.-^=` (e.g., `BRK-B`, `^GSPC`, `EURUSD=X`).
pub fn normalise_ticker(raw: &str) -> Result<String> {
    let ticker = raw.trim().to_uppercase();
    let valid = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '^' | '=');
    if ticker.is_empty() || ticker.len() > 16 || !ticker.chars().all(valid) {
        return Err(Error::InvalidTicker);
    }
    Ok(ticker)
}

// -------------------------------------------------------------------------------------------------

/// One fetch-then-render cycle for the dashboard page.
pub async fn build(provider: &dyn MarketData, query: &DashboardQuery) -> Result<DashboardView> {
    let ticker = normalise_ticker(&query.ticker)?;
    let window = query.mode.window(query.period);

    trace!("Fetching {} prices for {ticker} ({window:?})", query.mode);
    let series = provider.history(&ticker, &window).await?;
    debug!("{ticker}: {} price rows", series.len());

    let metrics = metrics::derive(&series)?;
    let mut kpis = kpi::price_cards(&metrics);

    // fundamentals only decorate the page; a failure here drops the cards, not the chart
    match provider.fundamentals(&ticker).await {
        Ok(info) => kpis.extend(kpi::fundamental_cards(&info)),
        Err(e) => warn!("{ticker}: fundamentals unavailable: {e:#}"),
    }

    Ok(DashboardView {
        figure: chart::figure(&ticker, query.mode, &series),
        chart_kind: metrics::select_chart_kind(query.mode),
        mode: query.mode,
        ticker,
        metrics,
        kpis,
    })
}

/// Company profile for the fundamentals page.
pub async fn profile(provider: &dyn MarketData, ticker: &str) -> Result<ProfileView> {
    let ticker = normalise_ticker(ticker)?;
    trace!("Fetching fundamentals for {ticker}");
    let info = provider.fundamentals(&ticker).await?;
    Ok(ProfileView {
        rows: kpi::profile_rows(&info),
        ticker,
    })
}
