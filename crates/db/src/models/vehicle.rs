//! Vehicle rows, the joined read view and request DTOs.

use rental_core::error::CoreError;
use rental_core::params::empty_as_none;
use rental_core::types::DbId;
use rental_core::vehicle::{VehicleState, VehicleStatus};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use validator::Validate;

use crate::models::car_model::CarModel;

/// A row from the `vehicle` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: DbId,
    pub car_model_id: DbId,
    pub license_plate: String,
    pub vin: String,
    #[sqlx(try_from = "String")]
    pub status: VehicleStatus,
    pub kilometers_travelled: i32,
    pub pending_cleaning: bool,
    pub pending_repairs: bool,
}

impl Vehicle {
    /// The patchable part of this row.
    pub fn state(&self) -> VehicleState {
        VehicleState {
            status: self.status,
            kilometers_travelled: self.kilometers_travelled,
            pending_cleaning: self.pending_cleaning,
            pending_repairs: self.pending_repairs,
        }
    }
}

/// Vehicle with its car model embedded, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleView {
    pub id: DbId,
    pub car_model: CarModel,
    pub license_plate: String,
    pub vin: String,
    pub status: VehicleStatus,
    pub kilometers_travelled: i32,
    pub pending_cleaning: bool,
    pub pending_repairs: bool,
}

/// Car model columns are aliased with a `cm_` prefix in the joined query.
impl<'r> FromRow<'r, PgRow> for VehicleView {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let status: String = row.try_get("status")?;
        let status =
            VehicleStatus::parse(&status).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

        Ok(Self {
            id: row.try_get("id")?,
            car_model: CarModel {
                id: row.try_get("cm_id")?,
                brand: row.try_get("cm_brand")?,
                model: row.try_get("cm_model")?,
                model_year: row.try_get("cm_model_year")?,
                segment: row.try_get("cm_segment")?,
                doors: row.try_get("cm_doors")?,
                seating_capacity: row.try_get("cm_seating_capacity")?,
                luggage_capacity: row.try_get("cm_luggage_capacity")?,
                category: row.try_get("cm_category")?,
                engine_type: row.try_get("cm_engine_type")?,
                transmission_type: row.try_get("cm_transmission_type")?,
                drivetrain: row.try_get("cm_drivetrain")?,
                motor_displacement: row.try_get("cm_motor_displacement")?,
                air_conditioning: row.try_get("cm_air_conditioning")?,
                infotainment_options: row.try_get("cm_infotainment_options")?,
                safety_features: row.try_get("cm_safety_features")?,
                rental_price_per_day: row.try_get("cm_rental_price_per_day")?,
            },
            license_plate: row.try_get("license_plate")?,
            vin: row.try_get("vin")?,
            status,
            kilometers_travelled: row.try_get("kilometers_travelled")?,
            pending_cleaning: row.try_get("pending_cleaning")?,
            pending_repairs: row.try_get("pending_repairs")?,
        })
    }
}

/// Full vehicle record, used for both create and replace.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleInput {
    pub car_model_id: DbId,
    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,
    #[validate(length(min = 1, max = 17))]
    pub vin: String,
    /// Parsed case-insensitively; see [`VehicleInput::parsed_status`].
    #[validate(length(min = 1))]
    pub status: String,
    #[serde(default)]
    #[validate(range(min = 0))]
    pub kilometers_travelled: i32,
    #[serde(default)]
    pub pending_cleaning: bool,
    #[serde(default)]
    pub pending_repairs: bool,
}

impl VehicleInput {
    pub fn parsed_status(&self) -> Result<VehicleStatus, CoreError> {
        VehicleStatus::parse(&self.status)
    }
}

/// Query parameters for the vehicle list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<VehicleStatus>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub car_model_id: Option<DbId>,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn input(status: &str, km: i32) -> VehicleInput {
        VehicleInput {
            car_model_id: 1,
            license_plate: "1234ABC".into(),
            vin: "VSSZZZ6JZ9R000001".into(),
            status: status.into(),
            kilometers_travelled: km,
            pending_cleaning: false,
            pending_repairs: false,
        }
    }

    #[test]
    fn status_is_parsed_case_insensitively() {
        assert_eq!(
            input("rented", 0).parsed_status().unwrap(),
            VehicleStatus::Rented
        );
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        assert_matches!(
            input("STOLEN", 0).parsed_status(),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn negative_kilometers_fail_validation() {
        let errors = input("AVAILABLE", -1).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("kilometers_travelled"));
    }

    #[test]
    fn overlong_vin_fails_validation() {
        let mut i = input("AVAILABLE", 0);
        i.vin = "X".repeat(18);
        assert!(i.validate().is_err());
    }

    #[test]
    fn defaults_apply_for_omitted_counters() {
        let i: VehicleInput = serde_json::from_value(serde_json::json!({
            "carModelId": 3,
            "licensePlate": "0000XYZ",
            "vin": "ABC",
            "status": "AVAILABLE"
        }))
        .unwrap();
        assert_eq!(i.kilometers_travelled, 0);
        assert!(!i.pending_cleaning);
    }

    #[test]
    fn filter_status_accepts_lowercase() {
        let f: VehicleFilter =
            serde_json::from_value(serde_json::json!({ "status": "under_maintenance" })).unwrap();
        assert_eq!(f.status, Some(VehicleStatus::UnderMaintenance));
    }
}
