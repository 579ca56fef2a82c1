//! # Drone Dispatch - Fleet Registry
//!
//! The process-wide collection of registered drones, keyed by serial
//! number, plus the periodic battery-level reporter.
//!
//! The registry is created once at process start and handed by reference
//! to whichever component serves requests; there is no hidden global and
//! no persistence. Its lock covers only structural changes to the map -
//! each drone synchronizes its own cargo mutation internally, so loading
//! one drone never serializes against loading another.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod registry;
pub mod reporter;

pub use error::FleetError;
pub use registry::FleetRegistry;
pub use reporter::{battery_report, run_battery_reporter};
