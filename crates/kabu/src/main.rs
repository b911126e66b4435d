use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands::*, TraceLevel};
use colored::{ColoredString, Colorize};
use dotenv::dotenv;
use kabu_core::{dashboard, kpi::Tone, DashboardQuery, DisplayMode};
use kabu_yahoo::{Yahoo, YahooConfig};
use tracing::{subscriber, trace, Level};
use tracing_subscriber::FmtSubscriber;

mod cli;

fn preprocess(trace_level: Level) {
    dotenv().ok();
    let my_subscriber = FmtSubscriber::builder()
        .with_max_level(trace_level)
        .with_writer(std::io::stderr)
        .finish();
    subscriber::set_global_default(my_subscriber).expect("Set subscriber");
}

fn paint(value: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Neutral => value.bold(),
        Tone::Positive => value.green().bold(),
        Tone::Negative => value.red().bold(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.trace {
        TraceLevel::DEBUG => Level::DEBUG,
        TraceLevel::INFO => Level::INFO,
        TraceLevel::WARN => Level::WARN,
        TraceLevel::ERROR => Level::ERROR,
    };

    preprocess(log_level);
    trace!("Command line input recorded: {cli:#?}");

    let yahoo = Yahoo::new(&YahooConfig::from_env())?;

    // cli framework:
    // "> kabu <COMMAND>"
    match cli.command {
        // "> kabu quote AAPL --period 1y --mode historical"
        Quote { ticker, period, mode } => {
            let query = DashboardQuery {
                ticker: ticker.clone(),
                period,
                mode,
            };
            match dashboard::build(&yahoo, &query).await {
                Ok(view) => {
                    let span = match mode {
                        DisplayMode::Historical => period.label(),
                        DisplayMode::Intraday => "Today",
                    };
                    println!("{} {} ({span})", view.ticker.cyan().bold(), mode.label());
                    for card in &view.kpis {
                        println!("  {:<16}{}", card.title, paint(&card.value, card.tone));
                    }
                }
                Err(e) => {
                    eprintln!("{}", e.user_message(&ticker).red().bold());
                    std::process::exit(1);
                }
            }
        }

        // "> kabu fundamentals AAPL"
        Fundamentals { ticker } => match dashboard::profile(&yahoo, &ticker).await {
            Ok(view) => {
                println!("{}", format!("Fundamentals: {}", view.ticker).cyan().bold());
                for row in &view.rows {
                    println!("  {:<16}{}", row.label, row.value.bold());
                }
            }
            Err(e) => {
                let ticker = ticker.trim().to_uppercase();
                eprintln!("{}", format!("Error loading data for {ticker}: {e}").red().bold());
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
