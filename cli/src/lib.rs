//! intraday-pnl-cli: end-of-day P&L report for a broker order log.
//!
//! Locates the day's `orders.csv`, feeds completed intraday rows through the
//! `intraday-pnl` ledger, and prints a per-instrument report with day totals.

pub mod config;
pub mod error;
pub mod locate;
pub mod render;
pub mod run;
