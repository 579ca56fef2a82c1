//! Uniform response envelope.

use serde::{Deserialize, Serialize};

use dispatch_domain::DroneDescriptor;

/// Body shared by every endpoint: a success flag, an optional detail
/// message, and an optional list of drone views. Empty fields are
/// omitted, never emitted as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub ok: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drones: Option<Vec<DroneDescriptor>>,
}

impl Envelope {
    pub fn success(details: impl Into<String>) -> Self {
        Self {
            ok: true,
            details: Some(details.into()),
            drones: None,
        }
    }

    pub fn success_with_drones(
        details: impl Into<String>,
        drones: Vec<DroneDescriptor>,
    ) -> Self {
        Self {
            drones: Some(drones),
            ..Self::success(details)
        }
    }

    pub fn failure(details: impl Into<String>) -> Self {
        Self {
            ok: false,
            details: Some(details.into()),
            drones: None,
        }
    }
}
