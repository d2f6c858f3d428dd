use std::path::PathBuf;

use thiserror::Error;

use crate::domain::{Amount, LedgerError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}. Amount must be a positive number")]
    InvalidAmount(Amount),

    #[error("Malformed date '{value}' in record {record}, expected YYYY-MM-DD")]
    MalformedDate { record: usize, value: String },

    #[error("No expenses recorded")]
    EmptyLedger,

    #[error("Histogram needs at least one bin")]
    InvalidBinCount,

    #[error("Ledger file {} cannot be read", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("Ledger file {} cannot be written", path.display())]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::InvalidAmount(amount) => AppError::InvalidAmount(amount),
            LedgerError::MalformedDate { index, value } => AppError::MalformedDate {
                record: index + 1,
                value,
            },
            LedgerError::EmptyLedger => AppError::EmptyLedger,
            LedgerError::InvalidBinCount => AppError::InvalidBinCount,
        }
    }
}
