// Dark palette shared by the chart figure & the web templates.
pub const BG_COLOR: &str = "#0d1117";
pub const CARD_COLOR: &str = "#161b22";
pub const TEXT_COLOR: &str = "#c9d1d9";
pub const ACCENT_COLOR: &str = "#58a6ff";
pub const ERROR_COLOR: &str = "#f85149";
pub const GAIN_COLOR: &str = "#16c784";

/// The palette, for templates.
#[derive(serde::Serialize, Debug, Clone, Copy)]
pub struct Palette {
    pub bg: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub accent: &'static str,
    pub error: &'static str,
    pub gain: &'static str,
}

pub const PALETTE: Palette = Palette {
    bg: BG_COLOR,
    card: CARD_COLOR,
    text: TEXT_COLOR,
    accent: ACCENT_COLOR,
    error: ERROR_COLOR,
    gain: GAIN_COLOR,
};
