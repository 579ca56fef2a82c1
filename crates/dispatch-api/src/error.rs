//! # API Error Types
//!
//! Maps the domain and fleet error taxonomy onto HTTP status codes and
//! the uniform response envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use dispatch_domain::{BatchLoadError, RegistrationError};
use dispatch_fleet::FleetError;

use crate::response::Envelope;

/// API-level errors, each mapping to one status code and a user-visible
/// detail message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed request payload; not a business error.
    #[error("could not decode request body: {0}")]
    Encoding(String),

    #[error("request is missing parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("could not obtain drone from descriptor: {0}")]
    Registration(#[from] RegistrationError),

    #[error("error while loading medications on drone: {0}")]
    Load(#[from] BatchLoadError),

    #[error("drone with serial number '{0}' was not found")]
    DroneNotFound(String),

    #[error("drone with serial number '{0}' already exists")]
    DuplicateSerialNumber(String),

    #[error("drone with serial number '{0}' has no loaded medications")]
    NoCargo(String),

    #[error("there are no drones available for loading")]
    NoneAvailable,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Encoding(_)
            | Self::MissingParameter(_)
            | Self::Registration(_)
            | Self::Load(_)
            | Self::DuplicateSerialNumber(_) => StatusCode::BAD_REQUEST,
            Self::DroneNotFound(_) | Self::NoCargo(_) | Self::NoneAvailable => {
                StatusCode::NOT_FOUND
            }
        }
    }
}

impl From<FleetError> for ApiError {
    fn from(err: FleetError) -> Self {
        match err {
            FleetError::DuplicateSerialNumber(serial) => {
                Self::DuplicateSerialNumber(serial)
            }
            FleetError::NotFound(serial) => Self::DroneNotFound(serial),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::warn!(status = %status, "{self}");
        (status, axum::Json(Envelope::failure(self.to_string()))).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;
