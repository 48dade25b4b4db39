//! Transaction charge modeling for intraday equity trades.
//!
//! Every component is computed from the notional value of a single trade
//! (`price * quantity`, unrounded) and rounded to paise on its own before it
//! is combined. The rounding points are part of the contract: moving them
//! changes the totals a broker contract note shows.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::ValidationError;
use crate::side::Side;
use crate::types::{Amount, round_money};

/// Brokerage per trade as a fraction of notional (0.03%).
pub const BROKERAGE_RATE: Decimal = dec!(0.0003);
/// Flat cap on brokerage per executed order, before GST.
pub const BROKERAGE_CAP: Decimal = dec!(20);
/// GST levied on brokerage and exchange/SEBI charges (18%).
pub const GST_RATE: Decimal = dec!(0.18);
/// NSE exchange transaction charge (0.00325%).
pub const EXCHANGE_TXN_RATE: Decimal = dec!(0.0000325);
/// NSE investor protection fund levy (0.0001%).
pub const IPF_RATE: Decimal = dec!(0.000001);
/// SEBI turnover fee (Rs 10 per crore).
pub const SEBI_TURNOVER_RATE: Decimal = dec!(0.000001);
/// Stamp duty, buy side only (0.003%).
pub const STAMP_DUTY_RATE: Decimal = dec!(0.00003);
/// Securities transaction tax on intraday sells (0.025%).
pub const STT_RATE: Decimal = dec!(0.00025);

/// Fee schedule applied to every trade in a run.
///
/// A single schedule covers the whole order log: the export carries no
/// exchange column, so every row is charged as if it executed on NSE.
///
/// ```
/// use intraday_pnl::charges::ChargeSchedule;
/// use rust_decimal_macros::dec;
///
/// let nse = ChargeSchedule::nse();
/// // 0.03% of 5000 = 1.50, plus 18% GST = 1.77
/// assert_eq!(nse.brokerage(dec!(5000)), dec!(1.77));
/// // capped at 20 before GST
/// assert_eq!(nse.brokerage(dec!(1000000)), dec!(23.60));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ChargeSchedule {
    /// Brokerage as a fraction of notional
    pub brokerage_rate: Decimal,
    /// Maximum brokerage per order, before GST
    pub brokerage_cap: Decimal,
    /// GST rate on brokerage and exchange charges
    pub gst_rate: Decimal,
    /// Exchange transaction charge rate
    pub exchange_txn_rate: Decimal,
    /// Investor protection fund rate, charged with the exchange fee
    pub ipf_rate: Decimal,
    /// SEBI turnover fee rate
    pub sebi_rate: Decimal,
    /// Stamp duty rate (buy side)
    pub stamp_duty_rate: Decimal,
    /// Securities transaction tax rate (sell side)
    pub stt_rate: Decimal,
}

impl ChargeSchedule {
    /// The NSE intraday equity schedule.
    pub const fn nse() -> Self {
        Self {
            brokerage_rate: BROKERAGE_RATE,
            brokerage_cap: BROKERAGE_CAP,
            gst_rate: GST_RATE,
            exchange_txn_rate: EXCHANGE_TXN_RATE,
            ipf_rate: IPF_RATE,
            sebi_rate: SEBI_TURNOVER_RATE,
            stamp_duty_rate: STAMP_DUTY_RATE,
            stt_rate: STT_RATE,
        }
    }

    /// Reject schedules that could produce negative charges, or rates above 100%.
    ///
    /// A valid schedule charges at most a few times the notional, so charges on
    /// any trade up to [`MAX_NOTIONAL`](crate::MAX_NOTIONAL) cannot overflow.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.brokerage_cap < Decimal::ZERO {
            return Err(ValidationError::NegativeRate {
                name: "brokerage_cap",
                value: self.brokerage_cap,
            });
        }
        let rates = [
            ("brokerage_rate", self.brokerage_rate),
            ("gst_rate", self.gst_rate),
            ("exchange_txn_rate", self.exchange_txn_rate),
            ("ipf_rate", self.ipf_rate),
            ("sebi_rate", self.sebi_rate),
            ("stamp_duty_rate", self.stamp_duty_rate),
            ("stt_rate", self.stt_rate),
        ];
        for (name, value) in rates {
            if value < Decimal::ZERO {
                return Err(ValidationError::NegativeRate { name, value });
            }
            if value > Decimal::ONE {
                return Err(ValidationError::RateAboveOne { name, value });
            }
        }
        Ok(())
    }

    #[inline]
    fn with_gst(&self, amount: Amount) -> Amount {
        round_money(amount * (Decimal::ONE + self.gst_rate))
    }

    /// Brokerage including GST.
    ///
    /// The capped fee is rounded first, then GST is applied and the result
    /// rounded again.
    pub fn brokerage(&self, value: Amount) -> Amount {
        let fee = round_money((value * self.brokerage_rate).min(self.brokerage_cap));
        self.with_gst(fee)
    }

    /// Exchange transaction charge (including IPF) plus SEBI turnover fee, with GST.
    ///
    /// Charged identically on both sides.
    pub fn exchange_charges(&self, value: Amount) -> Amount {
        let exchange = round_money(value * (self.exchange_txn_rate + self.ipf_rate));
        let sebi = round_money(value * self.sebi_rate);
        self.with_gst(exchange + sebi)
    }

    pub fn stamp_duty(&self, value: Amount) -> Amount {
        round_money(value * self.stamp_duty_rate)
    }

    pub fn securities_transaction_tax(&self, value: Amount) -> Amount {
        round_money(value * self.stt_rate)
    }

    /// Total charges for a buy with the given notional value.
    pub fn charges_on_buy(&self, value: Amount) -> Amount {
        self.breakdown(Side::Buy, value).total
    }

    /// Total charges for a sell with the given notional value.
    pub fn charges_on_sell(&self, value: Amount) -> Amount {
        self.breakdown(Side::Sell, value).total
    }

    /// Total charges for a trade on either side.
    #[inline]
    pub fn charges(&self, side: Side, value: Amount) -> Amount {
        self.breakdown(side, value).total
    }

    /// Itemized charges for one trade.
    pub fn breakdown(&self, side: Side, value: Amount) -> ChargeBreakdown {
        let brokerage = self.brokerage(value);
        let exchange = self.exchange_charges(value);
        let (stamp_duty, stt) = match side {
            Side::Buy => (self.stamp_duty(value), Decimal::ZERO),
            Side::Sell => (Decimal::ZERO, self.securities_transaction_tax(value)),
        };
        ChargeBreakdown {
            brokerage,
            stamp_duty,
            stt,
            exchange,
            total: brokerage + stamp_duty + stt + exchange,
        }
    }
}

impl Default for ChargeSchedule {
    fn default() -> Self {
        Self::nse()
    }
}

/// Charges for a single trade, item by item. Every field is already in paise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ChargeBreakdown {
    /// Brokerage with GST
    pub brokerage: Amount,
    /// Stamp duty (zero on sells)
    pub stamp_duty: Amount,
    /// Securities transaction tax (zero on buys)
    pub stt: Amount,
    /// Exchange + SEBI charges with GST
    pub exchange: Amount,
    pub total: Amount,
}

/// [`ChargeSchedule::brokerage`] on the NSE schedule.
pub fn brokerage(value: Amount) -> Amount {
    ChargeSchedule::nse().brokerage(value)
}

/// [`ChargeSchedule::exchange_charges`] on the NSE schedule.
pub fn exchange_charges(value: Amount) -> Amount {
    ChargeSchedule::nse().exchange_charges(value)
}

/// [`ChargeSchedule::charges_on_buy`] on the NSE schedule.
pub fn charges_on_buy(value: Amount) -> Amount {
    ChargeSchedule::nse().charges_on_buy(value)
}

/// [`ChargeSchedule::charges_on_sell`] on the NSE schedule.
pub fn charges_on_sell(value: Amount) -> Amount {
    ChargeSchedule::nse().charges_on_sell(value)
}
