//! Car model catalogue entries and DTOs.

use rental_core::params::empty_as_none;
use rental_core::types::DbId;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `car_model` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarModel {
    pub id: DbId,
    pub brand: String,
    pub model: String,
    pub model_year: i32,
    pub segment: String,
    pub doors: i32,
    pub seating_capacity: i32,
    pub luggage_capacity: i32,
    pub category: String,
    pub engine_type: String,
    pub transmission_type: String,
    pub drivetrain: String,
    pub motor_displacement: Option<Decimal>,
    pub air_conditioning: bool,
    pub infotainment_options: Option<String>,
    pub safety_features: Option<String>,
    pub rental_price_per_day: Decimal,
}

/// Full car model record, used for both create and replace.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CarModelInput {
    #[validate(length(min = 1, max = 100))]
    pub brand: String,
    #[validate(length(min = 1, max = 100))]
    pub model: String,
    #[validate(range(min = 1900, max = 2100))]
    pub model_year: i32,
    #[validate(length(min = 1, max = 50))]
    pub segment: String,
    #[validate(range(min = 1, max = 9))]
    pub doors: i32,
    #[validate(range(min = 1, max = 99))]
    pub seating_capacity: i32,
    #[validate(range(min = 0))]
    pub luggage_capacity: i32,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    #[validate(length(min = 1, max = 50))]
    pub engine_type: String,
    #[validate(length(min = 1, max = 50))]
    pub transmission_type: String,
    #[validate(length(min = 1, max = 50))]
    pub drivetrain: String,
    #[validate(custom(function = "displacement"))]
    pub motor_displacement: Option<Decimal>,
    #[serde(default)]
    pub air_conditioning: bool,
    pub infotainment_options: Option<String>,
    pub safety_features: Option<String>,
    #[validate(custom(function = "money_amount"))]
    pub rental_price_per_day: Decimal,
}

/// Exclusive bound of a `NUMERIC(5, 2)` column.
const DISPLACEMENT_LIMIT: i64 = 1_000;

/// Exclusive bound of a `NUMERIC(10, 2)` column.
const AMOUNT_LIMIT: i64 = 100_000_000;

/// Whether `value`, rounded to two decimals the way Postgres stores it, stays
/// below `limit` in magnitude.
fn fits_scale_two(value: &Decimal, limit: i64) -> bool {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs()
        < Decimal::from(limit)
}

/// Money amounts: non-negative and storable in `NUMERIC(10, 2)`.
pub(crate) fn money_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative"));
    }
    if !fits_scale_two(value, AMOUNT_LIMIT) {
        return Err(ValidationError::new("out_of_range"));
    }
    Ok(())
}

fn displacement(value: &Decimal) -> Result<(), ValidationError> {
    if !fits_scale_two(value, DISPLACEMENT_LIMIT) {
        return Err(ValidationError::new("out_of_range"));
    }
    Ok(())
}

/// Query parameters for the car model list. Every filter is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarModelFilter {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub brand: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub model: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub segment: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub engine_type: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub transmission_type: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub model_year: Option<i32>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub min_price: Option<Decimal>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub max_price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn input() -> CarModelInput {
        serde_json::from_value(serde_json::json!({
            "brand": "Seat",
            "model": "Ibiza",
            "modelYear": 2022,
            "segment": "B",
            "doors": 5,
            "seatingCapacity": 5,
            "luggageCapacity": 355,
            "category": "Compact",
            "engineType": "Petrol",
            "transmissionType": "Manual",
            "drivetrain": "FWD",
            "motorDisplacement": 1.0,
            "airConditioning": true,
            "rentalPricePerDay": 39.9
        }))
        .unwrap()
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn blank_brand_is_rejected() {
        let mut i = input();
        i.brand = String::new();
        let errors = i.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("brand"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let mut i = input();
        i.rental_price_per_day = Decimal::from_str("-1.00").unwrap();
        let errors = i.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("rental_price_per_day"));
    }

    #[test]
    fn zero_price_is_allowed() {
        assert!(money_amount(&Decimal::ZERO).is_ok());
    }

    #[test]
    fn price_beyond_column_precision_is_rejected() {
        let mut i = input();
        i.rental_price_per_day = Decimal::from(100_000_000);
        let errors = i.validate().unwrap_err();
        assert_eq!(errors.field_errors()["rental_price_per_day"][0].code, "out_of_range");

        assert!(money_amount(&Decimal::from_str("99999999.99").unwrap()).is_ok());
        assert!(money_amount(&Decimal::from_str("99999999.995").unwrap()).is_err());
    }

    #[test]
    fn displacement_beyond_column_precision_is_rejected() {
        let mut i = input();
        i.motor_displacement = Some(Decimal::from(1000));
        let errors = i.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("motor_displacement"));

        i.motor_displacement = Some(Decimal::from_str("999.99").unwrap());
        assert!(i.validate().is_ok());
        i.motor_displacement = None;
        assert!(i.validate().is_ok());
    }
}
