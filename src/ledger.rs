//! The day's ledger: one [`PositionAccumulator`] per instrument, in first-seen order.

use log::{debug, error, info};
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;

use crate::charges::{ChargeBreakdown, ChargeSchedule};
use crate::error::{Result, ValidationError};
use crate::position::PositionAccumulator;
use crate::report::{DaySummary, InstrumentSummary};
use crate::side::Side;
use crate::trade_log::TradeEvent;
use crate::types::{Amount, Instrument, Quantity};

/// Charges levied on one recorded trade, or why it could not be recorded.
pub type TradeResult = std::result::Result<ChargeBreakdown, ValidationError>;

/// Accumulates executed trades per instrument for a single trading day.
///
/// Positions are created lazily on the first trade for an instrument and
/// reported in the order instruments were first seen.
///
/// ```
/// use intraday_pnl::Ledger;
/// use rust_decimal_macros::dec;
///
/// let mut ledger = Ledger::new();
/// ledger.record_buy("X", dec!(50), dec!(100)).unwrap();
/// ledger.record_sell("X", dec!(55), dec!(100)).unwrap();
///
/// let day = ledger.close_day().unwrap();
/// assert_eq!(day.positions[0].net_profit, dec!(494.32));
/// assert_eq!(day.total_charges, dec!(5.68));
/// ```
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    schedule: ChargeSchedule,
    positions: Vec<PositionAccumulator>,
    index: FxHashMap<Instrument, usize>,
}

impl Ledger {
    /// Create an empty ledger charging the NSE schedule.
    pub fn new() -> Self {
        Self {
            schedule: ChargeSchedule::nse(),
            positions: Vec::new(),
            index: FxHashMap::default(),
        }
    }

    /// Create an empty ledger with a custom charge schedule.
    pub fn with_schedule(schedule: ChargeSchedule) -> std::result::Result<Self, ValidationError> {
        schedule.validate()?;
        Ok(Self {
            schedule,
            ..Self::new()
        })
    }

    pub fn schedule(&self) -> &ChargeSchedule {
        &self.schedule
    }

    /// Record a buy, creating the position if this is its first trade.
    pub fn record_buy(&mut self, instrument: &str, price: Amount, quantity: Quantity) -> TradeResult {
        self.record(instrument, Side::Buy, price, quantity)
    }

    /// Record a sell, creating the position if this is its first trade.
    pub fn record_sell(&mut self, instrument: &str, price: Amount, quantity: Quantity) -> TradeResult {
        self.record(instrument, Side::Sell, price, quantity)
    }

    fn record(&mut self, instrument: &str, side: Side, price: Amount, quantity: Quantity) -> TradeResult {
        // a rejected first trade must not leave an empty position behind
        let breakdown = match self.index.get(instrument) {
            Some(&idx) => self.positions[idx].record(side, price, quantity, &self.schedule)?,
            None => {
                let mut position = PositionAccumulator::new(Instrument::new(instrument));
                let breakdown = position.record(side, price, quantity, &self.schedule)?;
                self.index.insert(position.instrument().clone(), self.positions.len());
                self.positions.push(position);
                breakdown
            }
        };
        debug!(
            "{side} {instrument} {quantity} @ {price}: brokerage={} stamp={} stt={} exchange={} total={}",
            breakdown.brokerage, breakdown.stamp_duty, breakdown.stt, breakdown.exchange, breakdown.total
        );
        Ok(breakdown)
    }

    /// Apply one trade from the order log.
    pub fn apply(&mut self, event: &TradeEvent) -> TradeResult {
        self.record(event.instrument.as_str(), event.side, event.price, event.quantity)
    }

    /// Apply every trade from a stream, stopping at the first error.
    ///
    /// Returns the number of trades applied.
    pub fn ingest<I>(&mut self, events: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<TradeEvent>>,
    {
        let mut applied = 0;
        for event in events {
            self.apply(&event?)?;
            applied += 1;
        }
        info!(
            "Ingested {applied} trades across {} instruments",
            self.positions.len()
        );
        Ok(applied)
    }

    /// Finalize one instrument's net profit.
    pub fn finalize_net_profit(&mut self, instrument: &str) -> std::result::Result<Amount, ValidationError> {
        match self.index.get(instrument) {
            Some(&idx) => self.positions[idx].finalize_net_profit(),
            None => Err(ValidationError::UnknownInstrument(Instrument::new(instrument))),
        }
    }

    /// Look up a position.
    pub fn get(&self, instrument: &str) -> Option<&PositionAccumulator> {
        self.index.get(instrument).map(|&idx| &self.positions[idx])
    }

    /// All positions in first-seen order.
    pub fn positions(&self) -> &[PositionAccumulator] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Finalize every position and summarize the day.
    ///
    /// Any position that is not flat aborts the whole summary: a partial
    /// report would understate the day's total.
    pub fn close_day(mut self) -> std::result::Result<DaySummary, ValidationError> {
        for position in &mut self.positions {
            if let Err(e) = position.finalize_net_profit() {
                error!("Unclosed position: {position}");
                return Err(e);
            }
        }
        Ok(self.summary())
    }

    /// Per-instrument report lines plus day totals, for positions already finalized.
    ///
    /// Positions without a finalized net profit are left out of the lines and
    /// the P&L total; their charges still count toward charges paid.
    pub fn summary(&self) -> DaySummary {
        let mut positions = Vec::with_capacity(self.positions.len());
        let mut total_net_profit = Decimal::ZERO;
        let mut total_charges = Decimal::ZERO;

        for position in &self.positions {
            total_charges += position.charges();
            if let Some(net_profit) = position.net_profit() {
                total_net_profit += net_profit;
                positions.push(InstrumentSummary::from_position(position, net_profit));
            }
        }

        DaySummary {
            positions,
            total_charges,
            total_net_profit,
        }
    }
}
