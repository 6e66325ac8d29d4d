//! Error types for economy construction and evaluation.

use thiserror::Error;
use wl_core::WlError;

/// Errors raised while building or evaluating an economy.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EconomyError {
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: &'static str },

    #[error("Sampling failed: {what}")]
    Sampling { what: String },

    #[error("Price vector has {actual} entries but the economy has {expected} goods")]
    PriceLength { expected: usize, actual: usize },

    #[error("Core error: {0}")]
    Core(#[from] WlError),
}

pub type EconomyResult<T> = Result<T, EconomyError>;
