pub mod car_model;
pub mod maintenance;
pub mod vehicle;
pub mod vehicle_note;
