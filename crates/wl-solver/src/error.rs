//! Error types for solver operations.

use thiserror::Error;
use wl_core::WlError;
use wl_economy::EconomyError;

/// Errors that can occur while setting up or running the solver.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid parameter: {what}")]
    InvalidParameter { what: String },

    #[error("Economy error: {0}")]
    Economy(EconomyError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type SolverResult<T> = Result<T, SolverError>;

impl From<EconomyError> for SolverError {
    fn from(e: EconomyError) -> Self {
        match e {
            EconomyError::InvalidParameter { what } => SolverError::InvalidParameter {
                what: what.to_string(),
            },
            other => SolverError::Economy(other),
        }
    }
}

impl From<WlError> for SolverError {
    fn from(e: WlError) -> Self {
        match e {
            WlError::InvalidArg { what } | WlError::NonFinite { what, .. } => {
                SolverError::InvalidParameter {
                    what: what.to_string(),
                }
            }
            other => SolverError::Economy(EconomyError::Core(other)),
        }
    }
}
