use crate::app::AppState;
use actix_web::{get, http::StatusCode, web, HttpResponse, Responder, ResponseError};
use kabu_core::{DashboardQuery, DashboardView, Error, ProfileView};
use serde_json::json;
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A dashboard error, answered as `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    ticker: String,
    source: Error,
}

impl ApiError {
    fn new(ticker: &str, source: Error) -> Self {
        ApiError {
            ticker: ticker.to_string(),
            source,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source.user_message(&self.ticker))
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self.source {
            Error::NoDataFound => StatusCode::NOT_FOUND,
            Error::InvalidTicker => StatusCode::BAD_REQUEST,
            Error::FetchFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Chart, metrics & KPI cards for one ticker
///
/// ```json
/// {
///     "ticker": "AAPL",
///     "mode": "historical",
///     "chart_kind": "Candlestick",
///     "metrics": { "last_close": 110.0, "change": 10.0, "percent_change": 10.0 },
///     "kpis": [{ "title": "Last Price", "value": "$110.00", "tone": "neutral" }],
///     "figure": { "data": [...], "layout": {...} }
/// }
/// ```
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard for the ticker", body = DashboardView, content_type = "application/json"),
        (status = 400, description = "Blank or malformed ticker symbol"),
        (status = 404, description = "No price data for the ticker & period"),
        (status = 502, description = "The market-data provider failed")
    ),
    params(
        ("ticker" = String, Query, description = "Stock ticker symbol"),
        ("period" = Option<String>, Query, description = "One of 5d, 1mo, 6mo, 1y, 5y (default 6mo)"),
        ("mode" = Option<String>, Query, description = "historical or intraday (default historical)")
    )
)]
#[get("/api/dashboard")]
pub async fn dashboard(
    query: web::Query<DashboardQuery>,
    state: web::Data<AppState>,
) -> Result<web::Json<DashboardView>, ApiError> {
    let query = query.into_inner();
    let view = kabu_core::dashboard::build(state.provider.as_ref(), &query)
        .await
        .map_err(|e| ApiError::new(&query.ticker, e))?;
    Ok(web::Json(view))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Company profile for one ticker
///
/// ```json
/// {
///     "ticker": "AAPL",
///     "rows": [
///         { "label": "Company Name", "value": "Apple Inc." },
///         { "label": "Sector", "value": "Technology" },
///         // ...
///     ]
/// }
/// ```
#[utoipa::path(
    get,
    path = "/api/fundamentals/{ticker}",
    responses(
        (status = 200, description = "Company profile", body = ProfileView, content_type = "application/json"),
        (status = 400, description = "Blank or malformed ticker symbol"),
        (status = 502, description = "The market-data provider failed")
    ),
    params(
        ("ticker", description = "Stock ticker symbol")
    )
)]
#[get("/api/fundamentals/{ticker}")]
pub async fn fundamentals(path: web::Path<String>, state: web::Data<AppState>) -> impl Responder {
    let ticker = path.into_inner();
    match kabu_core::dashboard::profile(state.provider.as_ref(), &ticker).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => ApiError::new(&ticker, e).error_response(),
    }
}

#[cfg(test)]
mod tests {
    use crate::app;
    use crate::testing::Stub;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn dashboard_json() {
        let state = app::state(Stub::with_closes(&[100.0, 110.0])).unwrap();
        let app = test::init_service(App::new().app_data(state).configure(app::routes)).await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard?ticker=aapl&period=1y&mode=intraday")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["ticker"], "AAPL");
        assert_eq!(body["mode"], "intraday");
        assert_eq!(body["chart_kind"], "Line");
        assert_eq!(body["metrics"]["last_close"], 110.0);
        assert_eq!(body["kpis"][1]["value"], "+10.00 (+10.00%)");
        assert_eq!(body["figure"]["data"][0]["type"], "scatter");
    }

    #[actix_web::test]
    async fn dashboard_status_codes() {
        let cases = [
            (Stub::with_closes(&[]), "/api/dashboard?ticker=zzzz", StatusCode::NOT_FOUND),
            (Stub::with_closes(&[1.0]), "/api/dashboard?ticker=%20", StatusCode::BAD_REQUEST),
            (Stub::failing(), "/api/dashboard?ticker=aapl", StatusCode::BAD_GATEWAY),
            (Stub::with_closes(&[1.0]), "/api/dashboard?ticker=aapl&period=2w", StatusCode::BAD_REQUEST),
        ];

        for (stub, uri, status) in cases {
            let state = app::state(stub).unwrap();
            let app = test::init_service(App::new().app_data(state).configure(app::routes)).await;
            let resp = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
            assert_eq!(resp.status(), status, "{uri}");
        }
    }

    #[actix_web::test]
    async fn no_data_message() {
        let state = app::state(Stub::with_closes(&[])).unwrap();
        let app = test::init_service(App::new().app_data(state).configure(app::routes)).await;
        let req = test::TestRequest::get().uri("/api/dashboard?ticker=zzzz").to_request();
        let body: Value = test::read_body_json(test::call_service(&app, req).await).await;
        assert_eq!(body["error"], "No data found for ZZZZ.");
    }

    #[actix_web::test]
    async fn fundamentals_json() {
        let state = app::state(Stub::with_closes(&[1.0])).unwrap();
        let app = test::init_service(App::new().app_data(state).configure(app::routes)).await;

        let req = test::TestRequest::get().uri("/api/fundamentals/aapl").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["ticker"], "AAPL");
        assert_eq!(body["rows"][0]["label"], "Company Name");
        assert_eq!(body["rows"][0]["value"], "Apple Inc.");
        assert_eq!(body["rows"][2]["value"], "N/A");
    }
}
