use std::fmt;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::RegistryError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    Ambulance,
    Van,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleStatus {
    Available,
    Broken,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(rename = "type")]
    pub kind: VehicleKind,
    pub status: VehicleStatus,
}

impl Vehicle {
    pub fn available(id: &str, kind: VehicleKind) -> Self {
        Self {
            id: VehicleId::from(id),
            kind,
            status: VehicleStatus::Available,
        }
    }
}

/// Fleet roster in insertion order. Writers are serialized by the inner lock.
#[derive(Debug)]
pub struct VehicleRegistry {
    vehicles: RwLock<Vec<Vehicle>>,
}

impl VehicleRegistry {
    pub fn new(vehicles: Vec<Vehicle>) -> Self {
        Self {
            vehicles: RwLock::new(vehicles),
        }
    }

    /// The demo fleet: one ambulance and one van, both available.
    pub fn seeded() -> Self {
        Self::new(vec![
            Vehicle::available("V1", VehicleKind::Ambulance),
            Vehicle::available("V2", VehicleKind::Van),
        ])
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Vehicle>> {
        self.vehicles.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Vehicle>> {
        self.vehicles.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<Vehicle> {
        self.read().clone()
    }

    /// Marks the vehicle broken and returns its updated state.
    pub fn set_broken(&self, id: &VehicleId) -> Result<Vehicle, RegistryError> {
        let mut vehicles = self.write();
        let vehicle = vehicles
            .iter_mut()
            .find(|vehicle| &vehicle.id == id)
            .ok_or_else(|| RegistryError::VehicleNotFound(id.clone()))?;

        vehicle.status = VehicleStatus::Broken;
        info!(vehicle_id = %vehicle.id, "vehicle marked broken");
        Ok(vehicle.clone())
    }

    /// First available vehicle in roster order.
    pub fn pick_available(&self) -> Result<Vehicle, RegistryError> {
        self.read()
            .iter()
            .find(|vehicle| vehicle.status == VehicleStatus::Available)
            .cloned()
            .ok_or(RegistryError::NoVehicleAvailable)
    }
}

impl Default for VehicleRegistry {
    fn default() -> Self {
        Self::seeded()
    }
}
