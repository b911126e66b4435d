use thiserror::Error;

#[derive(Debug, Error)]
pub enum YahooError {
    #[error("request to Yahoo! Finance failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected Yahoo! Finance payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// Yahoo answered with an `error` object, e.g. `{"code": "Not Found", "description": "..."}`.
    #[error("{description} ({code})")]
    Provider { code: String, description: String },

    #[error("failed to obtain a Yahoo! Finance crumb: {0}")]
    Crumb(String),
}
