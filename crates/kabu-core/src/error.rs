use thiserror::Error;

/// Everything the dashboard cycle can surface to a user.
#[derive(Debug, Error)]
pub enum Error {
    /// The provider returned an empty price series.
    #[error("No data found.")]
    NoDataFound,

    /// The ticker box was blank, or held characters no symbol uses.
    #[error("Please enter a valid ticker symbol.")]
    InvalidTicker,

    /// Any failure raised by the market-data provider.
    #[error(transparent)]
    FetchFailure(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// The single line shown to a user in place of the chart & cards.
    pub fn user_message(&self, ticker: &str) -> String {
        match self {
            Error::NoDataFound => format!("No data found for {}.", ticker.trim().to_uppercase()),
            Error::InvalidTicker => self.to_string(),
            Error::FetchFailure(e) => format!("Error: {e}"),
        }
    }
}
