use actix_web::{middleware::Logger, App, HttpServer};
use anyhow::Result;
use dotenv::dotenv;
use kabu_yahoo::Yahoo;

mod api;
mod app;
mod config;
mod pages;
#[cfg(test)]
mod testing;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info,actix_web=debug"))
        .init();

    let config = config::Config::from_env()?;
    log::debug!("Configuration loaded: {config:#?}");

    let state = app::state(Yahoo::new(&config.yahoo)?)?;

    // run server
    log::info!("Serving the dashboard on http://{}:{}", config.bind_addr, config.port);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(app::routes)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await?;

    Ok(())
}
