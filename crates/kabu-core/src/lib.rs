pub mod chart;
pub mod dashboard;
pub mod error;
pub mod fundamentals;
pub mod kpi;
pub mod metrics;
pub mod schema;
pub mod theme;

pub use dashboard::{DashboardQuery, DashboardView, MarketData, ProfileView};
pub use error::{Error, Result};
pub use fundamentals::Fundamentals;
pub use metrics::{derive, select_chart_kind, DerivedMetrics};
pub use schema::{ChartKind, DisplayMode, FetchWindow, Period, PriceRow, PriceSeries};
