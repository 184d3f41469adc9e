//! Application layer: one struct per business action.
//!
//! Use cases receive their collaborators at construction time and return
//! `Result<VehicleDto, CoreError>`; translating that result to a wire
//! response is left to the API crate.

pub mod mapper;
pub mod policy;
pub mod vehicles;

#[cfg(test)]
mod testing;

pub use policy::NotificationPolicy;
pub use vehicles::{AddVehicle, GetVehicle, VehiclesUseCases};
