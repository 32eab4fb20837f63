pub mod directory;
pub mod inventory;
pub mod vehicles;

pub use directory::{Directory, Donor, Ngo};
pub use inventory::{assess_item, Item, ItemAssessment};
pub use vehicles::{Vehicle, VehicleId, VehicleKind, VehicleRegistry, VehicleStatus};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Vehicle {0} not found")]
    VehicleNotFound(VehicleId),
    #[error("No vehicle available")]
    NoVehicleAvailable,
}
