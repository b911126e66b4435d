use crate::app::AppState;
use actix_web::{get, web, HttpResponse, Responder};
use kabu_core::{theme::PALETTE, DashboardQuery, DisplayMode, Period};
use serde::{Deserialize, Serialize};
use tera::{Context, Tera};

const DEFAULT_TICKER: &str = "AAPL";

/// Compile the embedded page templates.
pub fn templates() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        ("base.html", include_str!("../templates/base.html")),
        ("dashboard.html", include_str!("../templates/dashboard.html")),
        ("fundamentals.html", include_str!("../templates/fundamentals.html")),
    ])?;
    Ok(tera)
}

/// Raw widget values; anything unparseable falls back to its default.
#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    ticker: Option<String>,
    period: Option<String>,
    mode: Option<String>,
}

impl PageQuery {
    fn ticker(&self) -> &str {
        self.ticker.as_deref().unwrap_or(DEFAULT_TICKER)
    }

    fn to_dashboard(&self) -> DashboardQuery {
        DashboardQuery {
            ticker: self.ticker().to_string(),
            period: self
                .period
                .as_deref()
                .and_then(|p| p.parse().ok())
                .unwrap_or_default(),
            mode: self
                .mode
                .as_deref()
                .and_then(|m| m.parse().ok())
                .unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
struct Choice {
    value: String,
    label: &'static str,
    selected: bool,
}

fn render(templates: &Tera, name: &str, context: &Context) -> HttpResponse {
    match templates.render(name, context) {
        Ok(html) => HttpResponse::Ok().content_type("text/html; charset=utf-8").body(html),
        Err(e) => {
            log::error!("failed to render {name}: {e:?}");
            HttpResponse::InternalServerError().body("Template rendering failed")
        }
    }
}

// -------------------------------------------------------------------------------------------------

// home
#[get("/")]
pub async fn dashboard(query: web::Query<PageQuery>, state: web::Data<AppState>) -> impl Responder {
    let input = query.to_dashboard();

    let periods: Vec<Choice> = Period::ALL
        .into_iter()
        .map(|period| Choice {
            value: period.to_string(),
            label: period.label(),
            selected: period == input.period,
        })
        .collect();
    let modes: Vec<Choice> = [DisplayMode::Historical, DisplayMode::Intraday]
        .into_iter()
        .map(|mode| Choice {
            value: mode.to_string(),
            label: mode.label(),
            selected: mode == input.mode,
        })
        .collect();

    let mut context = Context::new();
    context.insert("theme", &PALETTE);
    context.insert("ticker", &input.ticker);
    context.insert("periods", &periods);
    context.insert("modes", &modes);

    match kabu_core::dashboard::build(state.provider.as_ref(), &input).await {
        Ok(view) => {
            context.insert("kpis", &view.kpis);
            context.insert("figure", &view.figure);
        }
        Err(e) => {
            log::debug!("dashboard for {:?} failed: {e:#}", input.ticker);
            context.insert("error", &e.user_message(&input.ticker));
        }
    }

    render(&state.templates, "dashboard.html", &context)
}

// fundamentals
#[get("/fundamentals")]
pub async fn fundamentals(query: web::Query<PageQuery>, state: web::Data<AppState>) -> impl Responder {
    let ticker = query.ticker().trim().to_uppercase();

    let mut context = Context::new();
    context.insert("theme", &PALETTE);
    context.insert("ticker", &ticker);

    match kabu_core::dashboard::profile(state.provider.as_ref(), &ticker).await {
        Ok(view) => context.insert("rows", &view.rows),
        Err(e) => context.insert("error", &format!("Error loading data for {ticker}: {e}")),
    }

    render(&state.templates, "fundamentals.html", &context)
}
