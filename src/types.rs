//! Core types: Instrument, Amount, Quantity and the rounding helpers

use std::borrow::Borrow;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// Monetary amount in rupees. Exact decimal, never binary floating point.
pub type Amount = Decimal;

/// Executed quantity. Decimal because broker exports are not guaranteed to be integral.
pub type Quantity = Decimal;

/// Decimal places kept for every monetary value.
pub const MONEY_DP: u32 = 2;

/// Largest notional (`price * quantity`) or quantity accepted for a single trade.
///
/// Keeps every charge and running total far inside `Decimal`'s range.
pub const MAX_NOTIONAL: Amount = dec!(1000000000000000);

/// Round a monetary value to paise, midpoints away from zero.
///
/// A charge of exactly half a paisa (0.005) is billed as 0.01. Every
/// accumulation step calls this, not only the final sum.
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Trading symbol as it appears in the order log (e.g. `RELIANCE`, `NIFTY24JUNFUT`).
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Instrument(String);

impl Instrument {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self(symbol.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Instrument {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Instrument {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for Instrument {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Instrument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
