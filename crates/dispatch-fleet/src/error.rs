//! Fleet registry error types.

use thiserror::Error;

/// Registry-level failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FleetError {
    #[error("drone with serial number '{0}' already exists")]
    DuplicateSerialNumber(String),

    #[error("drone with serial number '{0}' was not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, FleetError>;
