//! Domain types shared by every motorpool crate.
//!
//! Holds the error taxonomy, the identifier/timestamp aliases, and the
//! API-facing vehicle shapes together with their request validation.

pub mod error;
pub mod types;
pub mod validation;
pub mod vehicle;
