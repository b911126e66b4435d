use anyhow::{Context, Result};
use kabu_yahoo::YahooConfig;

/// Server settings from the environment (`.env` included).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub yahoo: YahooConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match dotenv::var("PORT") {
            Ok(port) => port
                .parse()
                .with_context(|| format!("PORT must be a port number, got \"{port}\""))?,
            Err(_) => 8080,
        };

        Ok(Config {
            bind_addr: dotenv::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port,
            yahoo: YahooConfig::from_env(),
        })
    }
}
