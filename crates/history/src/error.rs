//! Errors raised by key-value stores.
//!
//! These never escape [`crate::HistoryStore`]; it logs and swallows them.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Corrupt history payload: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid store key: {0}")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, HistoryError>;
