//! Free-text notes attached to a vehicle.

use rental_core::params::empty_as_none;
use rental_core::timestamp;
use rental_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `vehicle_notes` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleNote {
    pub id: DbId,
    pub vehicle_id: DbId,
    pub author: String,
    pub note: String,
    pub created_at: Timestamp,
}

/// Body for creating or replacing a note.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct VehicleNoteInput {
    #[validate(length(min = 1, max = 100))]
    pub author: String,
    #[validate(length(min = 1, max = 4000))]
    pub note: String,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub created_at: Option<Timestamp>,
}

/// Query parameters for a vehicle's notes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VehicleNoteFilter {
    /// Case-insensitive substring match.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub author: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub from: Option<Timestamp>,
    #[serde(default, deserialize_with = "timestamp::deserialize_optional")]
    pub to: Option<Timestamp>,
}
