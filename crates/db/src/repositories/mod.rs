//! Repository contracts and their PostgreSQL implementations.

pub mod vehicle_repo;

pub use vehicle_repo::{VehicleRepo, VehicleRepository};
