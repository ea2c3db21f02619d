//! Vehicle status and the patchable part of a vehicle.
//!
//! A [`VehicleState`] is an immutable snapshot of the four fields a partial
//! update may touch. Applying a [`VehiclePatch`] never mutates the snapshot;
//! [`VehicleState::stage`] returns a new snapshot together with the list of
//! field transitions it implies.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// VehicleStatus
// ---------------------------------------------------------------------------

/// Operational status of a vehicle.
///
/// Every status may move to every other status; no transition is gated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Available,
    Rented,
    UnderMaintenance,
}

impl VehicleStatus {
    pub const ALL: [VehicleStatus; 3] = [
        VehicleStatus::Available,
        VehicleStatus::Rented,
        VehicleStatus::UnderMaintenance,
    ];

    /// The canonical upper-case name, as stored and as rendered in views.
    pub const fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Available => "AVAILABLE",
            VehicleStatus::Rented => "RENTED",
            VehicleStatus::UnderMaintenance => "UNDER_MAINTENANCE",
        }
    }

    /// Parse a status name, ignoring ASCII case.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid status value: '{value}'. Must be one of: {}",
                    Self::ALL.map(VehicleStatus::as_str).join(", ")
                ))
            })
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VehicleStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

// ---------------------------------------------------------------------------
// Patchable fields
// ---------------------------------------------------------------------------

/// The only vehicle fields a partial update may address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchableField {
    Status,
    KilometersTravelled,
    PendingCleaning,
    PendingRepairs,
}

/// Allow-list of patchable fields, in view order.
pub const PATCHABLE_FIELDS: [PatchableField; 4] = [
    PatchableField::Status,
    PatchableField::KilometersTravelled,
    PatchableField::PendingCleaning,
    PatchableField::PendingRepairs,
];

impl PatchableField {
    /// Field name as it appears in vehicle views and patch pointers.
    pub const fn name(self) -> &'static str {
        match self {
            PatchableField::Status => "status",
            PatchableField::KilometersTravelled => "kilometersTravelled",
            PatchableField::PendingCleaning => "pendingCleaning",
            PatchableField::PendingRepairs => "pendingRepairs",
        }
    }

    /// JSON pointer addressing this field, e.g. `/status`.
    pub const fn pointer(self) -> &'static str {
        match self {
            PatchableField::Status => "/status",
            PatchableField::KilometersTravelled => "/kilometersTravelled",
            PatchableField::PendingCleaning => "/pendingCleaning",
            PatchableField::PendingRepairs => "/pendingRepairs",
        }
    }

    /// Look up the field addressed by a JSON pointer. Exact match only.
    pub fn from_pointer(pointer: &str) -> Option<Self> {
        PATCHABLE_FIELDS
            .into_iter()
            .find(|field| field.pointer() == pointer)
    }
}

impl fmt::Display for PatchableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Snapshot and staged changes
// ---------------------------------------------------------------------------

/// The patchable state of one vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleState {
    pub status: VehicleStatus,
    pub kilometers_travelled: i32,
    pub pending_cleaning: bool,
    pub pending_repairs: bool,
}

/// A value carried by a [`FieldChange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue {
    Status(VehicleStatus),
    Kilometers(i32),
    Flag(bool),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Status(s) => write!(f, "{s}"),
            FieldValue::Kilometers(km) => write!(f, "{km}"),
            FieldValue::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// One field transition staged by a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: PatchableField,
    pub from: FieldValue,
    pub to: FieldValue,
}

/// Result of staging a patch against a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedUpdate {
    pub state: VehicleState,
    pub changes: Vec<FieldChange>,
}

impl StagedUpdate {
    /// `true` when the patch matched the current values exactly.
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Sparse update of the patchable fields.
///
/// This is also the wire shape of the flat patch body, hence the snake_case
/// keys. Unknown keys are rejected so a flat patch cannot silently ignore an
/// attempt to touch another field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VehiclePatch {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub kilometers_travelled: Option<i32>,
    #[serde(default)]
    pub pending_cleaning: Option<bool>,
    #[serde(default)]
    pub pending_repairs: Option<bool>,
}

impl VehicleState {
    /// Compare `patch` against this snapshot and produce the next snapshot.
    ///
    /// Fields absent from the patch, or equal to the current value, are left
    /// alone. Validation runs before anything is staged, so an error means no
    /// field was considered changed.
    pub fn stage(&self, patch: &VehiclePatch) -> Result<StagedUpdate, CoreError> {
        let status = patch.status.as_deref().map(VehicleStatus::parse).transpose()?;

        if let Some(km) = patch.kilometers_travelled {
            if km < 0 {
                return Err(CoreError::Validation(format!(
                    "kilometersTravelled must be non-negative, got {km}"
                )));
            }
        }

        let mut next = self.clone();
        let mut changes = Vec::new();

        if let Some(status) = status.filter(|s| *s != self.status) {
            changes.push(FieldChange {
                field: PatchableField::Status,
                from: FieldValue::Status(self.status),
                to: FieldValue::Status(status),
            });
            next.status = status;
        }

        if let Some(km) = patch
            .kilometers_travelled
            .filter(|km| *km != self.kilometers_travelled)
        {
            changes.push(FieldChange {
                field: PatchableField::KilometersTravelled,
                from: FieldValue::Kilometers(self.kilometers_travelled),
                to: FieldValue::Kilometers(km),
            });
            next.kilometers_travelled = km;
        }

        if let Some(flag) = patch.pending_cleaning.filter(|f| *f != self.pending_cleaning) {
            changes.push(FieldChange {
                field: PatchableField::PendingCleaning,
                from: FieldValue::Flag(self.pending_cleaning),
                to: FieldValue::Flag(flag),
            });
            next.pending_cleaning = flag;
        }

        if let Some(flag) = patch.pending_repairs.filter(|f| *f != self.pending_repairs) {
            changes.push(FieldChange {
                field: PatchableField::PendingRepairs,
                from: FieldValue::Flag(self.pending_repairs),
                to: FieldValue::Flag(flag),
            });
            next.pending_repairs = flag;
        }

        Ok(StagedUpdate {
            state: next,
            changes,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
