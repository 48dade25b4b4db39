//! Error types for the command-line report.

use std::path::PathBuf;

use intraday_pnl::ValidationError;

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// All errors that can occur while producing a report.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no order log found (looked in: {})", join_paths(.candidates))]
    InputNotFound { candidates: Vec<PathBuf> },

    #[error("config error: {0}")]
    Config(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Report(#[from] intraday_pnl::Error),

    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Report(e.into())
    }
}

impl Error {
    /// Process exit code: 2 when the order log itself is unusable for a report
    /// (malformed row, open position), 1 for everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Report(intraday_pnl::Error::Row(_) | intraday_pnl::Error::Validation(_)) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use intraday_pnl::{Instrument, RowError};

    #[test]
    fn input_not_found_lists_candidates() {
        let err = Error::InputNotFound {
            candidates: vec![PathBuf::from("/opt/bin/orders.csv"), PathBuf::from("/home/u/Downloads/orders.csv")],
        };
        assert_eq!(
            err.to_string(),
            "no order log found (looked in: /opt/bin/orders.csv, /home/u/Downloads/orders.csv)"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn ledger_failures_exit_2() {
        let unknown: Error = ValidationError::UnknownInstrument(Instrument::new("X")).into();
        assert_eq!(unknown.exit_code(), 2);
        let row: Error = intraday_pnl::Error::from(RowError::MissingField { line: 3, column: 5 }).into();
        assert_eq!(row.exit_code(), 2);
        assert_eq!(row.to_string(), "malformed order row: line 3: missing column 5");
    }
}
