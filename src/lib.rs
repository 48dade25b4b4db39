//! # intraday-pnl
//!
//! Realized intraday profit and loss from a broker's order log, after
//! brokerage, exchange, regulatory and tax charges.
//!
//! ## Features
//!
//! - **Charge schedule**: brokerage (capped), exchange transaction charge, SEBI
//!   turnover fee, stamp duty, securities transaction tax, and GST, each
//!   rounded to paise at the point a contract note rounds it
//! - **Per-instrument ledger**: buy value, sell value, charges and net quantity
//!   accumulated trade by trade, in first-seen order
//! - **Flat-position check**: an instrument whose net quantity is not zero at
//!   end of day has no realized P&L, and says so instead of reporting zero
//! - **Exact decimals**: every figure is a [`rust_decimal::Decimal`]
//!
//! ## Quick Start
//!
//! ```
//! use intraday_pnl::{Ledger, RowFilter, TradeLog};
//! use rust_decimal_macros::dec;
//!
//! let csv = "\
//! Time,Type,Instrument,Product,Qty.,Avg. price,Status
//! 09:20,BUY,X,MIS,100/100,50,COMPLETE
//! 09:45,SELL,X,MIS,100,55,COMPLETE
//! 10:00,BUY,Y,CNC,10,100,COMPLETE
//! ";
//!
//! let mut ledger = Ledger::new();
//! ledger.ingest(TradeLog::from_reader(csv.as_bytes(), RowFilter::default())).unwrap();
//!
//! let day = ledger.close_day().unwrap();
//! assert_eq!(day.positions.len(), 1);
//! assert_eq!(day.positions[0].net_profit, dec!(494.32));
//! assert_eq!(day.total_net_profit, dec!(494.32));
//! ```
//!
//! ## Charges
//!
//! | Component | Rate | Side |
//! |-----------|------|------|
//! | Brokerage | 0.03%, max 20 per order, + 18% GST | both |
//! | Exchange transaction + IPF | 0.00335% | both |
//! | SEBI turnover fee | 0.0001% | both |
//! | GST on exchange + SEBI | 18% | both |
//! | Stamp duty | 0.003% | buy |
//! | STT | 0.025% | sell |
//!
//! Rates live in [`ChargeSchedule`]; [`ChargeSchedule::nse`] is the default.
//!
//! ## Unclosed positions
//!
//! ```
//! use intraday_pnl::{Ledger, ValidationError};
//! use rust_decimal_macros::dec;
//!
//! let mut ledger = Ledger::new();
//! ledger.record_buy("X", dec!(50), dec!(100)).unwrap();
//! ledger.record_sell("X", dec!(55), dec!(60)).unwrap();
//!
//! assert!(matches!(
//!     ledger.close_day(),
//!     Err(ValidationError::UnclosedPosition { .. })
//! ));
//! ```

pub mod charges;
mod error;
mod ledger;
mod position;
pub mod report;
mod side;
pub mod trade_log;
mod types;

// Re-export public API
pub use charges::{ChargeBreakdown, ChargeSchedule};
pub use error::{Error, Result, RowError, ValidationError};
pub use ledger::{Ledger, TradeResult};
pub use position::{PositionAccumulator, TAX_RESERVE_FRACTION};
pub use report::{DaySummary, InstrumentSummary, Palette, Plain, Tone};
pub use side::{ParseSideError, Side};
pub use trade_log::{RowFilter, TradeEvent, TradeLog};
pub use rust_decimal::Decimal;
pub use types::{Amount, Instrument, MAX_NOTIONAL, MONEY_DP, Quantity, round_money};
