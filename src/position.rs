//! Intraday position accumulator for a single instrument.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::charges::{ChargeBreakdown, ChargeSchedule};
use crate::error::ValidationError;
use crate::side::Side;
use crate::types::{Amount, Instrument, MAX_NOTIONAL, Quantity, round_money};

/// Share of turnover-per-trade set aside by the tax-reserve heuristic.
pub const TAX_RESERVE_FRACTION: Decimal = dec!(0.2);

/// Running totals for one instrument over a trading day.
///
/// Buy and sell values are summed trade by trade, each trade's notional
/// rounded to paise before it is added. Charges are summed the same way.
/// Quantity does not affect P&L beyond the netting check: ten fills of 100
/// are equivalent to one fill of 1000 at the same price.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PositionAccumulator {
    instrument: Instrument,
    buy_value: Amount,
    sell_value: Amount,
    charges: Amount,
    transactions: u32,
    net_quantity: Quantity,
    net_profit: Option<Amount>,
}

impl PositionAccumulator {
    /// Create an empty accumulator for the given instrument.
    pub fn new(instrument: Instrument) -> Self {
        Self {
            instrument,
            buy_value: Decimal::ZERO,
            sell_value: Decimal::ZERO,
            charges: Decimal::ZERO,
            transactions: 0,
            net_quantity: Decimal::ZERO,
            net_profit: None,
        }
    }

    /// Record a buy of `quantity` at `price`. Returns the charges levied on it.
    pub fn record_buy(
        &mut self,
        price: Amount,
        quantity: Quantity,
        schedule: &ChargeSchedule,
    ) -> Result<ChargeBreakdown, ValidationError> {
        self.record(Side::Buy, price, quantity, schedule)
    }

    /// Record a sell of `quantity` at `price`. Returns the charges levied on it.
    pub fn record_sell(
        &mut self,
        price: Amount,
        quantity: Quantity,
        schedule: &ChargeSchedule,
    ) -> Result<ChargeBreakdown, ValidationError> {
        self.record(Side::Sell, price, quantity, schedule)
    }

    /// Apply one executed trade.
    ///
    /// Charges are computed on the unrounded notional; the notional itself
    /// is rounded before it joins the side total. Any previously finalized
    /// net profit is discarded.
    ///
    /// `schedule` must pass [`ChargeSchedule::validate`]. A trade whose
    /// notional or quantity exceeds [`MAX_NOTIONAL`], or that would push a
    /// running total out of range, is rejected and leaves the position unchanged.
    pub fn record(
        &mut self,
        side: Side,
        price: Amount,
        quantity: Quantity,
        schedule: &ChargeSchedule,
    ) -> Result<ChargeBreakdown, ValidationError> {
        let out_of_range = || ValidationError::OutOfRange {
            instrument: self.instrument.clone(),
            price,
            quantity,
        };
        let value = price
            .checked_mul(quantity)
            .filter(|v| v.abs() <= MAX_NOTIONAL && quantity.abs() <= MAX_NOTIONAL)
            .ok_or_else(out_of_range)?;
        let breakdown = schedule.breakdown(side, value);

        let net_quantity = self
            .net_quantity
            .checked_add(quantity * Decimal::from(side.sign()))
            .ok_or_else(out_of_range)?;
        let (buy_value, sell_value) = match side {
            Side::Buy => (self.buy_value.checked_add(round_money(value)), Some(self.sell_value)),
            Side::Sell => (Some(self.buy_value), self.sell_value.checked_add(round_money(value))),
        };
        let charges = self.charges.checked_add(round_money(breakdown.total));
        let (Some(buy_value), Some(sell_value), Some(charges)) = (buy_value, sell_value, charges) else {
            return Err(out_of_range());
        };

        self.buy_value = buy_value;
        self.sell_value = sell_value;
        self.charges = charges;
        self.net_quantity = net_quantity;
        self.transactions += 1;
        self.net_profit = None;

        Ok(breakdown)
    }

    /// Compute and store realized net profit.
    ///
    /// Fails unless the position is flat: a price-based P&L cannot be
    /// attributed to a partially closed position.
    pub fn finalize_net_profit(&mut self) -> Result<Amount, ValidationError> {
        if !self.is_flat() {
            return Err(ValidationError::UnclosedPosition {
                instrument: self.instrument.clone(),
                net_quantity: self.net_quantity,
            });
        }
        let profit = round_money((self.sell_value - self.buy_value) - self.charges);
        self.net_profit = Some(profit);
        Ok(profit)
    }

    #[inline]
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Sum of rounded buy notionals.
    #[inline]
    pub fn buy_value(&self) -> Amount {
        self.buy_value
    }

    /// Sum of rounded sell notionals.
    #[inline]
    pub fn sell_value(&self) -> Amount {
        self.sell_value
    }

    /// Sum of per-trade charges.
    #[inline]
    pub fn charges(&self) -> Amount {
        self.charges
    }

    /// Number of buys plus sells applied.
    #[inline]
    pub fn transactions(&self) -> u32 {
        self.transactions
    }

    /// Bought minus sold quantity.
    #[inline]
    pub fn net_quantity(&self) -> Quantity {
        self.net_quantity
    }

    /// Realized net profit, if the position has been finalized since its last trade.
    #[inline]
    pub fn net_profit(&self) -> Option<Amount> {
        self.net_profit
    }

    /// Returns true if bought and sold quantities cancel out.
    #[inline]
    pub fn is_flat(&self) -> bool {
        self.net_quantity.is_zero()
    }

    /// Buy value plus sell value.
    #[inline]
    pub fn turnover(&self) -> Amount {
        self.buy_value + self.sell_value
    }

    /// Rough amount to set aside: 20% of turnover per trade, to the nearest rupee.
    ///
    /// A budgeting heuristic, not a tax computation.
    pub fn tax_reserve(&self) -> Amount {
        if self.transactions == 0 {
            return Decimal::ZERO;
        }
        (self.turnover() / Decimal::from(self.transactions) * TAX_RESERVE_FRACTION).round_dp(0)
    }
}

impl fmt::Display for PositionAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} bought for {} and sold for {}. Net Qt = {}",
            self.instrument, self.buy_value, self.sell_value, self.net_quantity
        )
    }
}
