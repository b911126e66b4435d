use crate::fundamentals::Fundamentals;
use crate::metrics::DerivedMetrics;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Neutral,
    Positive,
    Negative,
}

/// One named metric, ready for display.
///
/// ```json
/// { "title": "Last Price", "value": "$189.84", "tone": "neutral" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
    pub tone: Tone,
}

impl KpiCard {
    fn new(title: &str, value: String, tone: Tone) -> Self {
        KpiCard {
            title: title.to_string(),
            value,
            tone,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, ToSchema)]
pub struct ProfileRow {
    pub label: String,
    pub value: String,
}

const NOT_AVAILABLE: &str = "N/A";

// -------------------------------------------------------------------------------------------------

/// "Last Price" & "Change" cards.
pub fn price_cards(metrics: &DerivedMetrics) -> Vec<KpiCard> {
    let percent = match metrics.percent_change {
        Some(pct) => format!("{pct:+.2}%"),
        None => "n/a".to_string(),
    };
    let tone = if metrics.change > 0.0 {
        Tone::Positive
    } else {
        Tone::Negative
    };

    vec![
        KpiCard::new("Last Price", dollars(metrics.last_close), Tone::Neutral),
        KpiCard::new("Change", format!("{:+.2} ({percent})", metrics.change), tone),
    ]
}

/// Cards for whichever fundamentals the provider returned; absent ones are skipped.
pub fn fundamental_cards(info: &Fundamentals) -> Vec<KpiCard> {
    let mut cards = Vec::new();
    if let Some(cap) = info.number("marketCap") {
        cards.push(KpiCard::new("Market Cap", billions(cap), Tone::Neutral));
    }
    if let Some(pe) = info.number("trailingPE") {
        cards.push(KpiCard::new("P/E Ratio", format!("{pe:.2}"), Tone::Neutral));
    }
    if let Some(yield_) = info.number("dividendYield") {
        cards.push(KpiCard::new("Dividend Yield", format!("{:.2}%", yield_ * 100.0), Tone::Neutral));
    }
    if let Some(ytd) = info.number("ytdReturn") {
        cards.push(KpiCard::new("YTD Return", format!("{:.2}%", ytd * 100.0), Tone::Neutral));
    }
    cards
}

/// Company profile, as listed on the fundamentals page.
pub fn profile_rows(info: &Fundamentals) -> Vec<ProfileRow> {
    let text = |key: &str| info.text(key).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let rows = [
        ("Company Name", text("longName")),
        ("Sector", text("sector")),
        ("Industry", text("industry")),
        (
            "Market Cap",
            info.number("marketCap")
                .map(billions)
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        ("Employees", text("fullTimeEmployees")),
        ("Website", text("website")),
    ];

    rows.into_iter()
        .map(|(label, value)| ProfileRow {
            label: label.to_string(),
            value,
        })
        .collect()
}

// -------------------------------------------------------------------------------------------------

/// `1234.5` -> `$1,234.50`
pub fn dollars(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    // sign of the rounded value, so -0.001 is "$0.00"
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// `2.95e12` -> `$2950.00 B`
fn billions(value: f64) -> String {
    format!("${:.2} B", value / 1e9)
}
