//! Shared fixtures for repository tests.

#![allow(dead_code)]

use std::str::FromStr;

use rental_db::models::car_model::{CarModel, CarModelInput};
use rental_db::models::vehicle::{Vehicle, VehicleInput};
use rental_db::repositories::{CarModelRepo, VehicleRepo};
use rust_decimal::Decimal;
use sqlx::PgPool;

pub fn new_car_model(brand: &str, model: &str, year: i32, price: &str) -> CarModelInput {
    CarModelInput {
        brand: brand.to_string(),
        model: model.to_string(),
        model_year: year,
        segment: "C".to_string(),
        doors: 5,
        seating_capacity: 5,
        luggage_capacity: 380,
        category: "Compact".to_string(),
        engine_type: "Petrol".to_string(),
        transmission_type: "Manual".to_string(),
        drivetrain: "FWD".to_string(),
        motor_displacement: Some(Decimal::from_str("1.50").unwrap()),
        air_conditioning: true,
        infotainment_options: None,
        safety_features: Some("ABS, ESP".to_string()),
        rental_price_per_day: Decimal::from_str(price).unwrap(),
    }
}

pub fn new_vehicle(car_model_id: i64, plate: &str, vin: &str) -> VehicleInput {
    VehicleInput {
        car_model_id,
        license_plate: plate.to_string(),
        vin: vin.to_string(),
        status: "AVAILABLE".to_string(),
        kilometers_travelled: 1000,
        pending_cleaning: false,
        pending_repairs: false,
    }
}

pub async fn seed_car_model(pool: &PgPool) -> CarModel {
    CarModelRepo::create(pool, &new_car_model("Volkswagen", "Golf", 2023, "45.00"))
        .await
        .unwrap()
}

pub async fn seed_vehicle(pool: &PgPool) -> Vehicle {
    let model = seed_car_model(pool).await;
    VehicleRepo::create(pool, &new_vehicle(model.id, "1234ABC", "WVWZZZ1KZ8W000001"))
        .await
        .unwrap()
}

/// Extract the violated constraint name from a database error.
pub fn constraint_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.constraint().map(str::to_string),
        _ => None,
    }
}

/// Extract the SQLSTATE code from a database error.
pub fn code_of(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|c| c.into_owned()),
        _ => None,
    }
}
