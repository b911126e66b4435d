use crate::metrics::select_chart_kind;
use crate::schema::{ChartKind, DisplayMode, PriceRow};
use crate::theme::*;
use serde_json::{json, Value};

/// Build a Plotly figure (`{ "data": [...], "layout": {...} }`) for the price series.
///
/// Intraday renders a close-price line; historical renders OHLC candlesticks.
pub fn figure(ticker: &str, mode: DisplayMode, series: &[PriceRow]) -> Value {
    let x: Vec<String> = series.iter().map(|row| row.time.to_rfc3339()).collect();
    let close: Vec<f64> = series.iter().map(|row| row.close).collect();

    let trace = match select_chart_kind(mode) {
        ChartKind::Line => json!({
            "type": "scatter",
            "mode": "lines",
            "name": format!("{ticker} Intraday"),
            "x": x,
            "y": close,
            "line": { "color": ACCENT_COLOR, "width": 2 },
        }),
        ChartKind::Candlestick => json!({
            "type": "candlestick",
            "name": format!("{ticker} Historical"),
            "x": x,
            "open": series.iter().map(|row| row.open).collect::<Vec<_>>(),
            "high": series.iter().map(|row| row.high).collect::<Vec<_>>(),
            "low": series.iter().map(|row| row.low).collect::<Vec<_>>(),
            "close": close,
            "increasing": { "line": { "color": GAIN_COLOR } },
            "decreasing": { "line": { "color": ERROR_COLOR } },
        }),
    };

    json!({
        "data": [trace],
        "layout": {
            "title": { "text": format!("{ticker} {} Price Chart", mode.label()) },
            "plot_bgcolor": BG_COLOR,
            "paper_bgcolor": BG_COLOR,
            "font": { "color": TEXT_COLOR },
            "xaxis": { "title": { "text": "Date/Time" } },
            "yaxis": { "title": { "text": "Price (USD)" } },
            "margin": { "l": 40, "r": 40, "t": 40, "b": 20 },
            "height": 600,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::tests::rows;

    #[test]
    fn intraday_is_a_line() {
        let fig = figure("AAPL", DisplayMode::Intraday, &rows(&[1.0, 2.0, 3.0]));
        let trace = &fig["data"][0];
        assert_eq!(trace["type"], "scatter");
        assert_eq!(trace["mode"], "lines");
        assert_eq!(trace["name"], "AAPL Intraday");
        assert_eq!(trace["y"], json!([1.0, 2.0, 3.0]));
        assert_eq!(fig["layout"]["title"]["text"], "AAPL Intraday Price Chart");
    }

    #[test]
    fn historical_is_a_candlestick() {
        let fig = figure("MSFT", DisplayMode::Historical, &rows(&[10.0, 11.0]));
        let trace = &fig["data"][0];
        assert_eq!(trace["type"], "candlestick");
        assert_eq!(trace["close"], json!([10.0, 11.0]));
        assert_eq!(trace["x"].as_array().map(Vec::len), Some(2));
        assert_eq!(trace["increasing"]["line"]["color"], GAIN_COLOR);
        assert_eq!(fig["layout"]["height"], 600);
    }
}
