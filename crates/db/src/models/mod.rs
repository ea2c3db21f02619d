pub mod car_model;
pub mod maintenance_record;
pub mod vehicle;
pub mod vehicle_note;
