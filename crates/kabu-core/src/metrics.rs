use crate::error::{Error, Result};
use crate::schema::{ChartKind, DisplayMode, PriceRow};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Display scalars derived from the tail of a price series.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, ToSchema)]
pub struct DerivedMetrics {
    pub last_close: f64,
    pub change: f64,

    /// `None` when the prior close was zero.
    pub percent_change: Option<f64>,
}

/// Derive the last close, change & percent change from the final two rows.
///
/// A single row yields zero change; an empty series is [`Error::NoDataFound`].
pub fn derive(series: &[PriceRow]) -> Result<DerivedMetrics> {
    match series {
        [] => Err(Error::NoDataFound),
        [last] => Ok(DerivedMetrics {
            last_close: last.close,
            change: 0.0,
            percent_change: Some(0.0),
        }),
        [.., prior, last] => {
            let change = last.close - prior.close;
            let percent_change = (prior.close != 0.0).then(|| change / prior.close * 100.0);
            Ok(DerivedMetrics {
                last_close: last.close,
                change,
                percent_change,
            })
        }
    }
}

/// Intraday draws a line; historical draws candlesticks.
pub fn select_chart_kind(mode: DisplayMode) -> ChartKind {
    match mode {
        DisplayMode::Intraday => ChartKind::Line,
        DisplayMode::Historical => ChartKind::Candlestick,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    pub(crate) fn rows(closes: &[f64]) -> Vec<PriceRow> {
        closes
            .iter()
            .enumerate()
            .map(|(i, close)| PriceRow {
                time: Utc.timestamp_opt(1_700_000_000 + i as i64 * 86_400, 0).unwrap(),
                open: *close,
                high: *close,
                low: *close,
                close: *close,
                volume: 1_000,
            })
            .collect()
    }

    #[test]
    fn empty_series_is_no_data() {
        assert!(matches!(derive(&[]), Err(Error::NoDataFound)));
    }

    #[test]
    fn single_row_has_zero_change() {
        let metrics = derive(&rows(&[100.0])).unwrap();
        assert_eq!(metrics.last_close, 100.0);
        assert_eq!(metrics.change, 0.0);
        assert_eq!(metrics.percent_change, Some(0.0));
    }

    #[test]
    fn two_rows() {
        let metrics = derive(&rows(&[100.0, 110.0])).unwrap();
        assert_eq!(metrics.last_close, 110.0);
        assert!((metrics.change - 10.0).abs() < 1e-10);
        assert!((metrics.percent_change.unwrap() - 10.0).abs() < 1e-10);
    }

    #[test]
    fn only_the_last_two_rows_count() {
        let metrics = derive(&rows(&[1.0, 50.0, 200.0, 150.0])).unwrap();
        assert_eq!(metrics.last_close, 150.0);
        assert!((metrics.change + 50.0).abs() < 1e-10);
        assert!((metrics.percent_change.unwrap() + 25.0).abs() < 1e-10);
    }

    #[test]
    fn zero_prior_close_guards_percent() {
        let metrics = derive(&rows(&[0.0, 5.0])).unwrap();
        assert_eq!(metrics.last_close, 5.0);
        assert_eq!(metrics.change, 5.0);
        assert_eq!(metrics.percent_change, None);
    }

    #[test]
    fn chart_kind_per_mode() {
        assert_eq!(select_chart_kind(DisplayMode::Intraday), ChartKind::Line);
        assert_eq!(select_chart_kind(DisplayMode::Historical), ChartKind::Candlestick);
    }
}
