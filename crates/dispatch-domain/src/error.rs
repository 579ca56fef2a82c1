//! Domain error types.
//!
//! All errors are returned as values; none of them are used for control
//! flow inside the crate. Transports map each variant onto a status code
//! and a user-visible message.

use thiserror::Error;

/// Descriptor validation failures.
///
/// Client-caused and non-retryable. The offending value travels with the
/// variant so callers can surface a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("'{0}' is not a valid medication name")]
    InvalidName(String),

    #[error("'{0}' is not a valid medication code")]
    InvalidCode(String),

    #[error("'{0}' is not a valid serial number")]
    InvalidSerialNumber(String),

    #[error("'{0}' is not a valid model")]
    InvalidModel(String),

    #[error("{0} is not a valid weight limit")]
    InvalidWeightLimit(u32),

    #[error("{0} is not a valid battery capacity")]
    InvalidBatteryCapacity(u8),

    #[error("'{0}' is not a valid state")]
    InvalidState(String),

    #[error("drone must not be LOADING when the battery level is below {threshold}%")]
    LoadingWithLowBattery { threshold: u8 },
}

/// Failures of the single-item loading operation.
///
/// The drone is left completely unchanged when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("battery level {battery_pct}% is below the {threshold}% required for loading")]
    BatteryTooLow { battery_pct: u8, threshold: u8 },

    #[error("loading {item_g}g on top of {current_g}g exceeds the {limit_g}g weight limit")]
    WeightExceeded {
        item_g: u32,
        current_g: u32,
        limit_g: u32,
    },
}

/// The failure that stopped a batch load.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Capacity(#[from] LoadError),
}

/// Outcome of a fail-fast batch operation.
///
/// `loaded` items were attached before `source` stopped the batch. There
/// is no rollback: items already loaded stay loaded, and callers needing
/// all-or-nothing semantics must pre-validate weight totals themselves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("successfully loaded medications: {loaded} of {total}")]
pub struct BatchLoadError {
    pub loaded: usize,
    pub total: usize,
    #[source]
    pub source: LoadFailure,
}

/// Failures of the validating drone constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("initial cargo could not be fully loaded: {0}")]
    InitialCargo(#[from] BatchLoadError),
}
