//! Serial-number-keyed registry of fleet drones.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use dispatch_domain::Drone;

use crate::error::{FleetError, Result};

type DroneMap = HashMap<String, Arc<Drone>>;

/// The process-wide collection of registered drones.
///
/// Registration is the only structural mutation; a registered drone is
/// never replaced wholesale, only changed through its own operations.
/// Iteration order over the fleet is unspecified.
#[derive(Debug, Default)]
pub struct FleetRegistry {
    drones: RwLock<DroneMap>,
}

impl FleetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a drone under its serial number.
    ///
    /// # Errors
    ///
    /// [`FleetError::DuplicateSerialNumber`] when the serial number is
    /// already taken; the existing drone is never overwritten.
    pub fn register(&self, drone: Drone) -> Result<Arc<Drone>> {
        let mut drones = self.write();

        match drones.entry(drone.serial_number().to_owned()) {
            Entry::Occupied(entry) => {
                Err(FleetError::DuplicateSerialNumber(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                let drone = Arc::new(drone);
                entry.insert(Arc::clone(&drone));
                Ok(drone)
            }
        }
    }

    /// Look up a drone by serial number.
    ///
    /// # Errors
    ///
    /// [`FleetError::NotFound`] for an unknown serial number.
    pub fn get(&self, serial_number: &str) -> Result<Arc<Drone>> {
        self.read()
            .get(serial_number)
            .cloned()
            .ok_or_else(|| FleetError::NotFound(serial_number.to_owned()))
    }

    /// All registered drones, in no particular order.
    pub fn all(&self) -> Vec<Arc<Drone>> {
        self.read().values().cloned().collect()
    }

    /// Drones currently able to accept cargo.
    pub fn available_for_loading(&self) -> Vec<Arc<Drone>> {
        self.read()
            .values()
            .filter(|drone| drone.is_available_for_loading())
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, DroneMap> {
        self.drones.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DroneMap> {
        self.drones.write().unwrap_or_else(PoisonError::into_inner)
    }
}
