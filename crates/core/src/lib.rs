//! Domain layer for the rental back office.
//!
//! Holds the types shared by the database and API crates: identifiers, the
//! error taxonomy, vehicle status, pagination helpers and the vehicle
//! patch-merge engine. Nothing in here touches the database directly; the
//! patch engine reaches persistence through [`vehicle_patch::VehicleStateStore`].

pub mod error;
pub mod pagination;
pub mod params;
pub mod timestamp;
pub mod types;
pub mod vehicle;
pub mod vehicle_patch;
