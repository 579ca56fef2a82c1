//! The drone entity: validation, loading state machine, and view
//! projections.

use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::error::{
    BatchLoadError, LoadError, LoadFailure, RegistrationError, ValidationError,
};
use crate::medication::{Medication, MedicationDescriptor};

/// Maximum serial number length, in characters.
pub const MAX_SERIAL_NUMBER_CHARS: usize = 100;

/// Maximum drone weight limit, in grams.
pub const MAX_WEIGHT_LIMIT_G: u32 = 500;

/// Maximum battery capacity, in percent.
pub const MAX_BATTERY_CAPACITY_PCT: u8 = 100;

/// Battery percentage below which a drone must never be observed in the
/// LOADING state.
pub const MIN_LOADING_BATTERY_PCT: u8 = 25;

// =============================================================================
// ENUMS
// =============================================================================

/// Drone build classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DroneModel {
    Lightweight,
    Middleweight,
    Cruiserweight,
    Heavyweight,
}

impl DroneModel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lightweight => "Lightweight",
            Self::Middleweight => "Middleweight",
            Self::Cruiserweight => "Cruiserweight",
            Self::Heavyweight => "Heavyweight",
        }
    }
}

impl FromStr for DroneModel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lightweight" => Ok(Self::Lightweight),
            "Middleweight" => Ok(Self::Middleweight),
            "Cruiserweight" => Ok(Self::Cruiserweight),
            "Heavyweight" => Ok(Self::Heavyweight),
            other => Err(ValidationError::InvalidModel(other.to_owned())),
        }
    }
}

/// Drone lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DroneState {
    Idle,
    Loading,
    Loaded,
    Delivering,
    Delivered,
    Returning,
}

impl DroneState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "IDLE",
            Self::Loading => "LOADING",
            Self::Loaded => "LOADED",
            Self::Delivering => "DELIVERING",
            Self::Delivered => "DELIVERED",
            Self::Returning => "RETURNING",
        }
    }
}

impl FromStr for DroneState {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDLE" => Ok(Self::Idle),
            "LOADING" => Ok(Self::Loading),
            "LOADED" => Ok(Self::Loaded),
            "DELIVERING" => Ok(Self::Delivering),
            "DELIVERED" => Ok(Self::Delivered),
            "RETURNING" => Ok(Self::Returning),
            other => Err(ValidationError::InvalidState(other.to_owned())),
        }
    }
}

// =============================================================================
// DESCRIPTOR
// =============================================================================

/// Wire descriptor for a drone, doubling as registration input and view
/// output.
///
/// Model and state travel as plain strings and are parsed by the
/// validating constructor, so a malformed value surfaces as the documented
/// [`ValidationError`] rather than a body-decoding failure. Optional
/// fields are omitted from JSON when empty, never emitted as null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroneDescriptor {
    /// 1-100 characters, unique across the fleet.
    pub serial_number: String,

    /// Lightweight, Middleweight, Cruiserweight, or Heavyweight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Grams, 500 max.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_limit: Option<u32>,

    /// Percent, 1-100.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub battery_capacity: Option<u8>,

    /// IDLE, LOADING, LOADED, DELIVERING, DELIVERED, or RETURNING.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medications: Option<Vec<MedicationDescriptor>>,
}

// =============================================================================
// DRONE
// =============================================================================

/// A fleet drone carrying medication payloads.
///
/// Serial number, model, and weight limit are fixed at construction and
/// read lock-free. Battery, state, and cargo live behind the drone's own
/// mutex, so concurrent loaders of the same drone serialize on the
/// check-then-append sequence while unrelated drones stay independent.
#[derive(Debug)]
pub struct Drone {
    serial_number: String,
    model: DroneModel,
    weight_limit: u32,
    inner: Mutex<DroneInner>,
}

#[derive(Debug)]
struct DroneInner {
    battery_capacity: u8,
    state: DroneState,
    cargo: Vec<Medication>,
}

impl Drone {
    /// Validate a descriptor and construct a drone, loading any initial
    /// cargo through the regular loading operation.
    ///
    /// Checks run in a fixed order and the first failure wins; callers
    /// rely on which error surfaces for a given malformed descriptor:
    /// serial number, model, weight limit, battery capacity, state,
    /// LOADING-with-low-battery, then the initial cargo.
    ///
    /// # Errors
    ///
    /// [`RegistrationError::Invalid`] for a failed field check. A drone
    /// whose initial cargo fails mid-batch is discarded along with the
    /// [`RegistrationError::InitialCargo`] error, which reports how many
    /// items were attached before the failure.
    pub fn from_descriptor(dto: &DroneDescriptor) -> Result<Self, RegistrationError> {
        if dto.serial_number.is_empty()
            || dto.serial_number.chars().count() > MAX_SERIAL_NUMBER_CHARS
        {
            return Err(
                ValidationError::InvalidSerialNumber(dto.serial_number.clone()).into(),
            );
        }

        let model: DroneModel = dto.model.as_deref().unwrap_or("").parse()?;

        let weight_limit = dto.weight_limit.unwrap_or(0);
        if weight_limit > MAX_WEIGHT_LIMIT_G {
            return Err(ValidationError::InvalidWeightLimit(weight_limit).into());
        }

        let battery_capacity = dto.battery_capacity.unwrap_or(0);
        if battery_capacity == 0 || battery_capacity > MAX_BATTERY_CAPACITY_PCT {
            return Err(ValidationError::InvalidBatteryCapacity(battery_capacity).into());
        }

        let state: DroneState = dto.state.as_deref().unwrap_or("").parse()?;

        if state == DroneState::Loading && battery_capacity < MIN_LOADING_BATTERY_PCT {
            return Err(ValidationError::LoadingWithLowBattery {
                threshold: MIN_LOADING_BATTERY_PCT,
            }
            .into());
        }

        let drone = Self {
            serial_number: dto.serial_number.clone(),
            model,
            weight_limit,
            inner: Mutex::new(DroneInner {
                battery_capacity,
                state,
                cargo: Vec::new(),
            }),
        };

        drone.load_descriptors(dto.medications.as_deref().unwrap_or_default())?;

        Ok(drone)
    }

    /// Load a single medication onto the drone.
    ///
    /// The whole check-then-append sequence runs under the drone's lock,
    /// so two concurrent loaders can never both pass the weight check
    /// against a stale cargo weight and jointly exceed the limit.
    ///
    /// # Errors
    ///
    /// [`LoadError::BatteryTooLow`] or [`LoadError::WeightExceeded`]; the
    /// drone is left unchanged in either case.
    pub fn load_one(&self, medication: Medication) -> Result<(), LoadError> {
        let mut inner = self.lock_inner();

        if inner.battery_capacity < MIN_LOADING_BATTERY_PCT {
            return Err(LoadError::BatteryTooLow {
                battery_pct: inner.battery_capacity,
                threshold: MIN_LOADING_BATTERY_PCT,
            });
        }

        let current_g: u32 = inner.cargo.iter().map(Medication::weight).sum();
        let item_g = medication.weight();
        // Compare against the remaining capacity instead of summing, so
        // an item weight near u32::MAX cannot overflow the check.
        if item_g > self.weight_limit.saturating_sub(current_g) {
            return Err(LoadError::WeightExceeded {
                item_g,
                current_g,
                limit_g: self.weight_limit,
            });
        }

        // Two observable state writes: anyone polling concurrently may
        // see LOADING mid-append but no other intermediate value.
        inner.state = DroneState::Loading;
        inner.cargo.push(medication);
        inner.state = DroneState::Loaded;

        Ok(())
    }

    /// Load medications one at a time, in input order, stopping at the
    /// first failure.
    ///
    /// # Errors
    ///
    /// Fail-fast with partial effect: items appended before the failing
    /// one stay loaded, and [`BatchLoadError`] carries the count.
    pub fn load_many(&self, medications: Vec<Medication>) -> Result<usize, BatchLoadError> {
        let total = medications.len();

        for (loaded, medication) in medications.into_iter().enumerate() {
            self.load_one(medication).map_err(|err| BatchLoadError {
                loaded,
                total,
                source: LoadFailure::Capacity(err),
            })?;
        }

        Ok(total)
    }

    /// Convert and load wire descriptors one at a time, in input order.
    ///
    /// # Errors
    ///
    /// Same fail-fast contract as [`Drone::load_many`]; a descriptor that
    /// fails validation stops the batch exactly like a capacity failure.
    pub fn load_descriptors(
        &self,
        dtos: &[MedicationDescriptor],
    ) -> Result<usize, BatchLoadError> {
        let total = dtos.len();

        for (loaded, dto) in dtos.iter().enumerate() {
            let medication =
                Medication::from_descriptor(dto).map_err(|err| BatchLoadError {
                    loaded,
                    total,
                    source: LoadFailure::Invalid(err),
                })?;

            self.load_one(medication).map_err(|err| BatchLoadError {
                loaded,
                total,
                source: LoadFailure::Capacity(err),
            })?;
        }

        Ok(total)
    }

    /// Total weight of the loaded cargo, in grams.
    pub fn current_weight(&self) -> u32 {
        self.lock_inner().cargo.iter().map(Medication::weight).sum()
    }

    /// Whether the drone can accept cargo: IDLE with enough battery.
    pub fn is_available_for_loading(&self) -> bool {
        let inner = self.lock_inner();
        inner.state == DroneState::Idle
            && inner.battery_capacity >= MIN_LOADING_BATTERY_PCT
    }

    pub fn has_cargo(&self) -> bool {
        !self.lock_inner().cargo.is_empty()
    }

    pub fn serial_number(&self) -> &str {
        &self.serial_number
    }

    pub fn model(&self) -> DroneModel {
        self.model
    }

    pub fn weight_limit(&self) -> u32 {
        self.weight_limit
    }

    pub fn state(&self) -> DroneState {
        self.lock_inner().state
    }

    pub fn battery_capacity(&self) -> u8 {
        self.lock_inner().battery_capacity
    }

    /// Full view: every field, cargo with images.
    pub fn view(&self) -> DroneDescriptor {
        let inner = self.lock_inner();
        DroneDescriptor {
            serial_number: self.serial_number.clone(),
            model: Some(self.model.as_str().to_owned()),
            weight_limit: Some(self.weight_limit),
            battery_capacity: Some(inner.battery_capacity),
            state: Some(inner.state.as_str().to_owned()),
            medications: cargo_descriptors(&inner.cargo, Medication::descriptor_with_image),
        }
    }

    /// Summary view: serial number only.
    pub fn summary_view(&self) -> DroneDescriptor {
        DroneDescriptor {
            serial_number: self.serial_number.clone(),
            ..DroneDescriptor::default()
        }
    }

    /// Battery view: serial number and battery level.
    pub fn battery_view(&self) -> DroneDescriptor {
        DroneDescriptor {
            serial_number: self.serial_number.clone(),
            battery_capacity: Some(self.lock_inner().battery_capacity),
            ..DroneDescriptor::default()
        }
    }

    /// Cargo view: serial number and cargo with images stripped, keeping
    /// the payload small where the full view would carry every blob.
    pub fn cargo_view(&self) -> DroneDescriptor {
        let inner = self.lock_inner();
        DroneDescriptor {
            serial_number: self.serial_number.clone(),
            medications: cargo_descriptors(&inner.cargo, Medication::descriptor),
            ..DroneDescriptor::default()
        }
    }

    fn lock_inner(&self) -> MutexGuard<'_, DroneInner> {
        // A poisoned guard still holds consistent data: every mutation in
        // this module completes without an intervening panic point.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn cargo_descriptors(
    cargo: &[Medication],
    project: fn(&Medication) -> MedicationDescriptor,
) -> Option<Vec<MedicationDescriptor>> {
    if cargo.is_empty() {
        None
    } else {
        Some(cargo.iter().map(project).collect())
    }
}
