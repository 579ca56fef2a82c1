//! # Drone Dispatch - Domain Model
//!
//! Core entities for the medication-delivery dispatch controller: the
//! [`Medication`] payload item, the [`Drone`] loading state machine, and
//! the wire descriptors their views project into.
//!
//! Nothing in this crate performs I/O; transports (HTTP, RPC, CLI) call
//! these plain operations and serialize whatever comes back. Each drone
//! carries its own lock, so the crate is safe to share across request
//! workers without any fleet-wide synchronization.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod drone;
pub mod error;
pub mod medication;

pub use drone::{Drone, DroneDescriptor, DroneModel, DroneState};
pub use error::{
    BatchLoadError, LoadError, LoadFailure, RegistrationError, ValidationError,
};
pub use medication::{Medication, MedicationDescriptor};
