//! Error types: ledger validation, malformed order-log rows, and the crate-level umbrella.

use rust_decimal::Decimal;

use crate::types::Instrument;

/// Errors raised when ledger state cannot support the requested figure.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Net quantity did not return to zero, so realized P&L is undefined.
    #[error("net quantity for {instrument} is {net_quantity}, not 0; cannot compute realized P&L for an open position")]
    UnclosedPosition {
        instrument: Instrument,
        net_quantity: Decimal,
    },

    /// No trade was ever recorded for this instrument.
    #[error("no trades recorded for {0}")]
    UnknownInstrument(Instrument),

    /// A charge schedule rate is negative.
    #[error("charge rate {name} must not be negative (got {value})")]
    NegativeRate { name: &'static str, value: Decimal },

    /// A charge schedule rate exceeds 100%.
    #[error("charge rate {name} must not exceed 1 (got {value})")]
    RateAboveOne { name: &'static str, value: Decimal },

    /// A trade's notional or quantity, or a running total, is too large to account for.
    #[error("trade in {instrument} of {quantity} @ {price} is out of range")]
    OutOfRange {
        instrument: Instrument,
        price: Decimal,
        quantity: Decimal,
    },
}

/// A row that passed the product/status filter but cannot be turned into a trade.
///
/// Line numbers are 1-based and count the header row.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("line {line}: missing column {column}")]
    MissingField { line: u64, column: usize },

    #[error("line {line}: unknown side '{value}' (expected BUY or SELL)")]
    UnknownSide { line: u64, value: String },

    #[error("line {line}: invalid quantity '{value}'")]
    InvalidQuantity { line: u64, value: String },

    #[error("line {line}: invalid price '{value}'")]
    InvalidPrice { line: u64, value: String },

    #[error("line {line}: trade value {quantity} x {price} is out of range")]
    ValueOutOfRange {
        line: u64,
        price: Decimal,
        quantity: Decimal,
    },
}

impl RowError {
    pub fn line(&self) -> u64 {
        match self {
            RowError::MissingField { line, .. }
            | RowError::UnknownSide { line, .. }
            | RowError::InvalidQuantity { line, .. }
            | RowError::InvalidPrice { line, .. }
            | RowError::ValueOutOfRange { line, .. } => *line,
        }
    }
}

/// All errors produced while reading an order log and settling the ledger.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read order log: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse order log: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed order row: {0}")]
    Row(#[from] RowError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn display_unclosed() {
        let err = ValidationError::UnclosedPosition {
            instrument: Instrument::new("INFY"),
            net_quantity: dec!(25),
        };
        assert_eq!(
            err.to_string(),
            "net quantity for INFY is 25, not 0; cannot compute realized P&L for an open position"
        );
    }

    #[test]
    fn display_row_error() {
        let err = RowError::InvalidPrice {
            line: 7,
            value: "abc".into(),
        };
        assert_eq!(err.to_string(), "line 7: invalid price 'abc'");
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn display_out_of_range() {
        let err = RowError::ValueOutOfRange {
            line: 4,
            price: Decimal::MAX,
            quantity: dec!(2),
        };
        assert_eq!(err.line(), 4);
        assert!(err.to_string().starts_with("line 4: trade value "));
    }

    #[test]
    fn umbrella_is_transparent_for_validation() {
        let err: Error = ValidationError::UnknownInstrument(Instrument::new("TCS")).into();
        assert_eq!(err.to_string(), "no trades recorded for TCS");
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn is_error() {
        let err: Box<dyn std::error::Error> = Box::new(RowError::MissingField { line: 2, column: 5 });
        assert!(err.to_string().contains("column 5"));
    }
}
