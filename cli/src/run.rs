//! Report pipeline: read the order log, settle the ledger, write the report.

use std::io::Write;
use std::path::Path;

use log::info;

use intraday_pnl::{DaySummary, Ledger, TradeLog};

use crate::config::Config;
use crate::error::Result;
use crate::render;

/// Options for a single report run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Write the summary as JSON instead of text
    pub json: bool,
    /// Text report without colour
    pub plain: bool,
}

/// Ingest the whole order log, then finalize every instrument.
///
/// Nothing is reported until the log has been read to the end; an open
/// position anywhere fails the run.
pub fn summarize(config: &Config, orders: &Path) -> Result<DaySummary> {
    info!("Reading orders from {}", orders.display());

    let mut log = TradeLog::from_path(orders, config.filter.clone())?;
    let mut ledger = Ledger::with_schedule(config.charges.clone())?;
    ledger.ingest(log.by_ref())?;
    info!("Skipped {} rows outside {}/{}", log.skipped(), config.filter.product, config.filter.status);

    Ok(ledger.close_day()?)
}

/// Write the summary in the requested format.
pub fn write_report(summary: &DaySummary, opts: &RunOptions, out: &mut dyn Write) -> Result<()> {
    if opts.json {
        serde_json::to_writer_pretty(&mut *out, summary)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", summary.render(render::palette(opts.plain)))?;
    }
    out.flush()?;
    Ok(())
}

/// Summarize `orders` and write the report to `out`.
pub fn run(config: &Config, orders: &Path, opts: &RunOptions, out: &mut dyn Write) -> Result<DaySummary> {
    let summary = summarize(config, orders)?;
    write_report(&summary, opts, out)?;
    Ok(summary)
}
