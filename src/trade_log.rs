//! Order log reading.
//!
//! Brokers export the day's orders as CSV, one row per order, with a header
//! row. Only completed intraday orders carry realized P&L; every other row
//! (delivery orders, rejected or cancelled orders) is skipped without error.
//!
//! Columns are positional:
//!
//! | index | field |
//! |-------|-------|
//! | 0 | order time (unused) |
//! | 1 | side, `BUY` or `SELL` |
//! | 2 | instrument |
//! | 3 | product, e.g. `MIS` (intraday) or `CNC` |
//! | 4 | quantity, `executed` or `executed/ordered` |
//! | 5 | average execution price |
//! | 6 | order status, e.g. `COMPLETE` or `REJECTED` |

use std::fs::File;
use std::io;
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use rust_decimal::Decimal;

use crate::error::{Result, RowError};
use crate::side::Side;
use crate::types::{Amount, Instrument, MAX_NOTIONAL, Quantity};

/// Column positions in the order log.
pub mod columns {
    pub const SIDE: usize = 1;
    pub const INSTRUMENT: usize = 2;
    pub const PRODUCT: usize = 3;
    pub const QUANTITY: usize = 4;
    pub const PRICE: usize = 5;
    pub const STATUS: usize = 6;
}

/// Product code for intraday (margin intraday square-off) orders.
pub const INTRADAY_PRODUCT: &str = "MIS";
/// Status of a fully executed order.
pub const COMPLETE_STATUS: &str = "COMPLETE";

/// One executed order, as read from a single row.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeEvent {
    pub instrument: Instrument,
    pub side: Side,
    pub price: Amount,
    pub quantity: Quantity,
    pub product: String,
    pub status: String,
}

/// Selects the rows that become trades.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RowFilter {
    /// Required product code
    pub product: String,
    /// Required order status
    pub status: String,
}

impl RowFilter {
    /// Returns true if the row is a completed order with the configured product.
    pub fn accepts(&self, record: &StringRecord) -> bool {
        record.get(columns::PRODUCT) == Some(self.product.as_str())
            && record.get(columns::STATUS) == Some(self.status.as_str())
    }
}

impl Default for RowFilter {
    fn default() -> Self {
        Self {
            product: INTRADAY_PRODUCT.to_string(),
            status: COMPLETE_STATUS.to_string(),
        }
    }
}

/// Parse a plain (`830.10`) or exponent (`8.301e2`) decimal.
fn parse_decimal(field: &str) -> Option<Decimal> {
    let field = field.trim();
    Decimal::from_str(field)
        .or_else(|_| Decimal::from_scientific(field))
        .ok()
}

/// Parse the executed quantity. `"75/150"` (executed/ordered) yields 75.
pub fn parse_quantity(field: &str) -> Option<Quantity> {
    parse_decimal(field.split('/').next()?)
}

fn field<'r>(record: &'r StringRecord, column: usize, line: u64) -> std::result::Result<&'r str, RowError> {
    record
        .get(column)
        .ok_or(RowError::MissingField { line, column })
}

/// Turn an accepted row into a trade.
pub fn parse_row(record: &StringRecord) -> std::result::Result<TradeEvent, RowError> {
    let line = record.position().map_or(0, |p| p.line());

    let side_field = field(record, columns::SIDE, line)?;
    let side = side_field.parse::<Side>().map_err(|e| RowError::UnknownSide {
        line,
        value: e.0,
    })?;

    let instrument = Instrument::new(field(record, columns::INSTRUMENT, line)?);

    let qty_field = field(record, columns::QUANTITY, line)?;
    let quantity = parse_quantity(qty_field).ok_or_else(|| RowError::InvalidQuantity {
        line,
        value: qty_field.to_string(),
    })?;

    let price_field = field(record, columns::PRICE, line)?;
    let price = parse_decimal(price_field).ok_or_else(|| RowError::InvalidPrice {
        line,
        value: price_field.to_string(),
    })?;

    let in_range = price
        .checked_mul(quantity)
        .is_some_and(|v| v.abs() <= MAX_NOTIONAL && quantity.abs() <= MAX_NOTIONAL);
    if !in_range {
        return Err(RowError::ValueOutOfRange { line, price, quantity });
    }

    Ok(TradeEvent {
        instrument,
        side,
        price,
        quantity,
        product: field(record, columns::PRODUCT, line)?.to_string(),
        status: field(record, columns::STATUS, line)?.to_string(),
    })
}

/// Streaming reader over an order log, yielding accepted trades in file order.
///
/// ```
/// use intraday_pnl::trade_log::{RowFilter, TradeLog};
///
/// let csv = "\
/// time,type,symbol,product,qty,price,status
/// 09:20,BUY,SBIN,MIS,75/150,600.5,COMPLETE
/// 09:21,BUY,SBIN,CNC,10,600,COMPLETE
/// ";
/// let trades: Vec<_> = TradeLog::from_reader(csv.as_bytes(), RowFilter::default())
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(trades.len(), 1);
/// assert_eq!(trades[0].quantity.to_string(), "75");
/// ```
pub struct TradeLog<R> {
    reader: csv::Reader<R>,
    filter: RowFilter,
    record: StringRecord,
    skipped: usize,
}

impl TradeLog<File> {
    /// Open an order log on disk.
    pub fn from_path(path: impl AsRef<Path>, filter: RowFilter) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::from_reader(file, filter))
    }
}

impl<R: io::Read> TradeLog<R> {
    /// Read an order log from any byte source. The first row is treated as a header.
    pub fn from_reader(rdr: R, filter: RowFilter) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(rdr);
        Self {
            reader,
            filter,
            record: StringRecord::new(),
            skipped: 0,
        }
    }

    /// Number of rows skipped by the filter so far.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R: io::Read> Iterator for TradeLog<R> {
    type Item = Result<TradeEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
                Ok(true) => {}
            }
            if self.filter.accepts(&self.record) {
                return Some(parse_row(&self.record).map_err(Into::into));
            }
            self.skipped += 1;
            debug!(
                "Skipping line {}: product={:?} status={:?}",
                self.record.position().map_or(0, |p| p.line()),
                self.record.get(columns::PRODUCT).unwrap_or(""),
                self.record.get(columns::STATUS).unwrap_or("")
            );
        }
    }
}
