//! Terminal highlighting for the text report.

use crossterm::style::Stylize;
use intraday_pnl::{Palette, Plain, Tone};

/// ANSI colours: profits green, losses red, instrument headings yellow.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ansi;

impl Palette for Ansi {
    fn paint(&self, text: &str, tone: Tone) -> String {
        match tone {
            Tone::Profit => text.green().to_string(),
            Tone::Loss => text.red().to_string(),
            Tone::Info => text.yellow().to_string(),
        }
    }
}

/// Palette for the chosen output mode.
pub fn palette(plain: bool) -> &'static dyn Palette {
    if plain { &Plain } else { &Ansi }
}
