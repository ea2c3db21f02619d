//! Maintenance record model and DTOs.

use rental_core::params::empty_as_none;
use rental_core::timestamp;
use rental_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::car_model::money_amount;

/// A row from the `maintenance_record` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    pub id: DbId,
    pub vehicle_id: DbId,
    pub maintenance_date: Timestamp,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub maintenance_type: String,
    pub description: String,
    pub cost: Decimal,
}

/// Body for creating or replacing a maintenance record. The owning vehicle
/// comes from the URL path.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecordInput {
    /// Defaults to the current time when omitted.
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub maintenance_date: Option<Timestamp>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 100))]
    pub maintenance_type: String,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[validate(custom(function = "money_amount"))]
    pub cost: Decimal,
}

/// Query parameters for a vehicle's maintenance history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceRecordFilter {
    #[serde(rename = "type", default, deserialize_with = "empty_as_none")]
    pub maintenance_type: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub from: Option<Timestamp>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub to: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_key_maps_to_maintenance_type() {
        let input: MaintenanceRecordInput = serde_json::from_value(serde_json::json!({
            "type": "Oil change",
            "description": "5W30",
            "cost": 89.5
        }))
        .unwrap();
        assert_eq!(input.maintenance_type, "Oil change");
        assert!(input.maintenance_date.is_none());
        assert!(input.validate().is_ok());
    }

    #[test]
    fn naive_date_is_accepted() {
        let input: MaintenanceRecordInput = serde_json::from_value(serde_json::json!({
            "maintenanceDate": "2024-03-01T10:00",
            "type": "Tyres",
            "description": "Winter set",
            "cost": 400
        }))
        .unwrap();
        assert!(input.maintenance_date.is_some());
    }

    #[test]
    fn negative_cost_fails_validation() {
        let input: MaintenanceRecordInput = serde_json::from_value(serde_json::json!({
            "type": "Refund",
            "description": "n/a",
            "cost": -10
        }))
        .unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn oversized_cost_fails_validation() {
        let input: MaintenanceRecordInput = serde_json::from_value(serde_json::json!({
            "type": "Engine swap",
            "description": "n/a",
            "cost": 1e9
        }))
        .unwrap();
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cost"));
    }
}
