use crate::{api, pages};
use actix_web::web;
use anyhow::Result;
use kabu_core::MarketData;
use std::sync::Arc;
use tera::Tera;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

/// Shared by every worker: the market-data provider & the compiled page templates.
pub struct AppState {
    pub provider: Arc<dyn MarketData>,
    pub templates: Tera,
}

#[derive(OpenApi)]
#[openapi(paths(api::dashboard, api::fundamentals))]
pub struct ApiDoc;

pub fn state(provider: impl MarketData + 'static) -> Result<web::Data<AppState>> {
    Ok(web::Data::new(AppState {
        provider: Arc::new(provider),
        templates: pages::templates()?,
    }))
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg
        // pages
        .service(pages::dashboard)
        .service(pages::fundamentals)
        // api endpoints
        .service(api::dashboard)
        .service(api::fundamentals)
        // api documentation
        .service(Redoc::with_url("/redoc", ApiDoc::openapi()));
}
