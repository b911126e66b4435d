use clap::{Parser, Subcommand, ValueEnum};
use kabu_core::{DisplayMode, Period};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Sets the level of tracing
    #[arg(long, global = true, default_value = "warn", ignore_case = true)]
    pub trace: TraceLevel,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the KPI cards for a ticker.
    Quote {
        ticker: String,

        /// Lookback for historical mode: 5d, 1mo, 6mo, 1y or 5y.
        #[arg(long, default_value = "6mo")]
        period: Period,

        /// historical (daily bars) or intraday (5-minute bars over one day).
        #[arg(long, default_value = "historical")]
        mode: DisplayMode,
    },

    /// Print the company profile for a ticker.
    Fundamentals { ticker: String },
}

#[derive(ValueEnum, Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraceLevel {
    DEBUG,
    INFO,
    WARN,
    ERROR,
}
