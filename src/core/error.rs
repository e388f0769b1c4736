//! Error types for box spread scanning

use chrono::NaiveDate;
use thiserror::Error;

use super::option::OptionType;

#[derive(Error, Debug)]
pub enum BoxSpreadError {
    /// An expiry has quotes on one side of the chain only.
    #[error("Expiry mismatch: {expiry} has no {missing:?} quotes")]
    ExpiryMismatch {
        expiry: NaiveDate,
        missing: OptionType,
    },

    /// Call and put strikes do not line up within one expiry.
    /// `None` means that side ran out of strikes first.
    #[error("Strike mismatch on {expiry}: call strike {call_strike:?}, put strike {put_strike:?}")]
    StrikeMismatch {
        expiry: NaiveDate,
        call_strike: Option<f64>,
        put_strike: Option<f64>,
    },

    #[error("Scan cancelled")]
    Cancelled,

    #[error("Data error: {0}")]
    Data(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type BoxSpreadResult<T> = Result<T, BoxSpreadError>;

impl BoxSpreadError {
    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True for call/put alignment errors (as opposed to I/O or parse failures)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            BoxSpreadError::ExpiryMismatch { .. } | BoxSpreadError::StrikeMismatch { .. }
        )
    }
}
