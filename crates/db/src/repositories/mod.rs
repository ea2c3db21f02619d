//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod car_model_repo;
pub mod maintenance_record_repo;
pub mod vehicle_note_repo;
pub mod vehicle_repo;
pub mod vehicle_state_store;

pub use car_model_repo::CarModelRepo;
pub use maintenance_record_repo::MaintenanceRecordRepo;
pub use vehicle_note_repo::VehicleNoteRepo;
pub use vehicle_repo::VehicleRepo;
pub use vehicle_state_store::PgVehicleStateStore;
