//! End-of-day report: per-instrument results, day totals, and text rendering.

use std::fmt::{self, Write as _};

use rust_decimal::Decimal;

use crate::position::PositionAccumulator;
use crate::types::{Amount, Instrument, round_money};

/// How a figure should be highlighted.
///
/// Positive amounts are profits; zero and negative amounts are losses.
/// Headings are informational.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Tone {
    Loss,
    Profit,
    Info,
}

impl Tone {
    /// Classify an amount by sign, after rounding to paise.
    pub fn of(amount: Amount) -> Self {
        if round_money(amount) > Decimal::ZERO {
            Tone::Profit
        } else {
            Tone::Loss
        }
    }
}

/// Applies highlighting to report text.
pub trait Palette {
    fn paint(&self, text: &str, tone: Tone) -> String;
}

/// No highlighting.
#[derive(Clone, Copy, Debug, Default)]
pub struct Plain;

impl Palette for Plain {
    fn paint(&self, text: &str, _tone: Tone) -> String {
        text.to_string()
    }
}

/// Format an amount to paise with an explicit `+` on profits.
///
/// ```
/// use intraday_pnl::report::signed;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(signed(dec!(494.32)), "+494.32");
/// assert_eq!(signed(dec!(-5.671)), "-5.67");
/// assert_eq!(signed(dec!(0)), "0.00");
/// ```
pub fn signed(amount: Amount) -> String {
    let rounded = round_money(amount);
    if rounded.is_zero() {
        "0.00".to_string()
    } else if rounded > Decimal::ZERO {
        format!("+{rounded:.2}")
    } else {
        format!("{rounded:.2}")
    }
}

/// Realized result for one instrument.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InstrumentSummary {
    pub instrument: Instrument,
    /// Sell value minus buy value minus charges
    pub net_profit: Amount,
    /// Buy value plus sell value
    pub turnover: Amount,
    /// Turnover per trade * 20%, to the nearest rupee
    pub tax_reserve: Amount,
    pub charges: Amount,
    pub transactions: u32,
}

impl InstrumentSummary {
    pub(crate) fn from_position(position: &PositionAccumulator, net_profit: Amount) -> Self {
        Self {
            instrument: position.instrument().clone(),
            net_profit,
            turnover: position.turnover(),
            tax_reserve: position.tax_reserve(),
            charges: position.charges(),
            transactions: position.transactions(),
        }
    }

    pub fn tone(&self) -> Tone {
        Tone::of(self.net_profit)
    }
}

/// The day's report: every instrument in first-seen order plus totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DaySummary {
    pub positions: Vec<InstrumentSummary>,
    /// Sum of every instrument's charges, already included in the P&L figures
    pub total_charges: Amount,
    /// Sum of every instrument's net profit
    pub total_net_profit: Amount,
}

impl DaySummary {
    /// Render the text report, highlighting figures with `palette`.
    pub fn render(&self, palette: &dyn Palette) -> String {
        let mut out = String::new();

        for p in &self.positions {
            let _ = write!(
                out,
                "\n{}\n    Net P&L : {}\n    Turnover: {:.2}\n    ~20%: {}\n",
                palette.paint(p.instrument.as_str(), Tone::Info),
                palette.paint(&signed(p.net_profit), p.tone()),
                p.turnover,
                p.tax_reserve,
            );
        }

        let charges = -self.total_charges;
        let _ = write!(
            out,
            "\nCharges Paid (Included in above P&L calc): {}\n\nDay's P&L: {}\n",
            palette.paint(&signed(charges), Tone::of(charges)),
            palette.paint(&signed(self.total_net_profit), Tone::of(self.total_net_profit)),
        );

        out
    }
}

impl fmt::Display for DaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&Plain))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct Tagged;

    impl Palette for Tagged {
        fn paint(&self, text: &str, tone: Tone) -> String {
            format!("<{tone:?}>{text}")
        }
    }

    fn day() -> DaySummary {
        DaySummary {
            positions: vec![
                InstrumentSummary {
                    instrument: Instrument::new("X"),
                    net_profit: dec!(494.32),
                    turnover: dec!(10500),
                    tax_reserve: dec!(1050),
                    charges: dec!(5.68),
                    transactions: 2,
                },
                InstrumentSummary {
                    instrument: Instrument::new("Y"),
                    net_profit: dec!(-104.1),
                    turnover: dec!(4100),
                    tax_reserve: dec!(410),
                    charges: dec!(4.1),
                    transactions: 2,
                },
            ],
            total_charges: dec!(9.78),
            total_net_profit: dec!(390.22),
        }
    }

    #[test]
    fn tone_by_sign() {
        assert_eq!(Tone::of(dec!(0.01)), Tone::Profit);
        assert_eq!(Tone::of(dec!(0)), Tone::Loss);
        assert_eq!(Tone::of(dec!(0.004)), Tone::Loss);
        assert_eq!(Tone::of(dec!(-3)), Tone::Loss);
    }

    #[test]
    fn signed_formatting() {
        assert_eq!(signed(dec!(500)), "+500.00");
        assert_eq!(signed(dec!(-0.001)), "0.00");
        assert_eq!(signed(dec!(-12.3)), "-12.30");
    }

    #[test]
    fn plain_render() {
        let expected = "\nX\n    Net P&L : +494.32\n    Turnover: 10500.00\n    ~20%: 1050\n\
                        \nY\n    Net P&L : -104.10\n    Turnover: 4100.00\n    ~20%: 410\n\
                        \nCharges Paid (Included in above P&L calc): -9.78\n\nDay's P&L: +390.22\n";
        assert_eq!(day().to_string(), expected);
    }

    #[test]
    fn palette_sees_tones() {
        let text = day().render(&Tagged);
        assert!(text.contains("<Info>X"));
        assert!(text.contains("<Profit>+494.32"));
        assert!(text.contains("<Loss>-104.10"));
        assert!(text.contains("calc): <Loss>-9.78"));
        assert!(text.contains("Day's P&L: <Profit>+390.22"));
    }

    #[test]
    fn empty_day() {
        let text = DaySummary::default().to_string();
        assert_eq!(
            text,
            "\nCharges Paid (Included in above P&L calc): 0.00\n\nDay's P&L: 0.00\n"
        );
    }
}
