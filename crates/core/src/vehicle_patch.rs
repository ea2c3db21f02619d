//! Partial updates of a vehicle.
//!
//! Two entry points share one commit path:
//!
//! - [`apply_json_patch`] takes an RFC 6902 document whose pointers must all
//!   be on the [`PATCHABLE_FIELDS`] allow-list.
//! - [`apply_flat_patch`] takes a [`VehiclePatch`] directly.
//!
//! Both load the current snapshot, stage the changes and write back only when
//! at least one field actually changed. There is no locking between the read
//! and the write; concurrent patches of the same vehicle are last-write-wins.

use async_trait::async_trait;
use json_patch::PatchOperation;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::types::DbId;
use crate::vehicle::{
    FieldChange, PatchableField, VehiclePatch, VehicleState, PATCHABLE_FIELDS,
};

/// RFC 6902 document as accepted by the vehicle PATCH endpoint.
pub use json_patch::Patch as JsonPatch;

/// Entity name used in not-found errors.
pub const VEHICLE_ENTITY: &str = "Vehicle";

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// Persistence used by the patch flow: read one snapshot, write one snapshot.
#[async_trait]
pub trait VehicleStateStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the patchable state of a vehicle, `None` if it does not exist.
    async fn load_state(&self, id: DbId) -> Result<Option<VehicleState>, Self::Error>;

    /// Overwrite the patchable state of a vehicle.
    async fn save_state(&self, id: DbId, state: &VehicleState) -> Result<(), Self::Error>;
}

/// Why a patch was not applied.
#[derive(Debug, thiserror::Error)]
pub enum PatchFailure<E>
where
    E: std::error::Error + 'static,
{
    /// The request itself was refused (not found, forbidden path, bad value).
    #[error(transparent)]
    Rejected(#[from] CoreError),

    /// The store failed while loading or saving.
    #[error("vehicle store error: {0}")]
    Store(#[source] E),
}

/// Result of a patch call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchOutcome {
    /// State after the call (unchanged when nothing was staged).
    pub state: VehicleState,
    /// Field transitions that were written, in allow-list order.
    pub changes: Vec<FieldChange>,
    /// Whether a write reached the store.
    pub persisted: bool,
}

// ---------------------------------------------------------------------------
// JSON Patch handling
// ---------------------------------------------------------------------------

/// Reject the document if any operation addresses a field outside the
/// allow-list. Runs before any operation is applied.
pub fn validate_patch_paths(patch: &JsonPatch) -> Result<(), CoreError> {
    for op in &patch.0 {
        for pointer in pointers(op) {
            if PatchableField::from_pointer(&pointer).is_none() {
                return Err(CoreError::Forbidden(format!(
                    "Modification of field '{pointer}' is not allowed"
                )));
            }
        }
    }
    Ok(())
}

/// Target pointer of `op`, followed by the source pointer of `move`/`copy`.
fn pointers(op: &PatchOperation) -> Vec<String> {
    match op {
        PatchOperation::Add(op) => vec![op.path.to_string()],
        PatchOperation::Remove(op) => vec![op.path.to_string()],
        PatchOperation::Replace(op) => vec![op.path.to_string()],
        PatchOperation::Test(op) => vec![op.path.to_string()],
        PatchOperation::Move(op) => vec![op.path.to_string(), op.from.to_string()],
        PatchOperation::Copy(op) => vec![op.path.to_string(), op.from.to_string()],
    }
}

/// Patchable fields as named in views and pointers.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatchedView {
    status: Option<String>,
    kilometers_travelled: Option<i32>,
    pending_cleaning: Option<bool>,
    pending_repairs: Option<bool>,
}

impl From<PatchedView> for VehiclePatch {
    fn from(view: PatchedView) -> Self {
        VehiclePatch {
            status: view.status,
            kilometers_travelled: view.kilometers_travelled,
            pending_cleaning: view.pending_cleaning,
            pending_repairs: view.pending_repairs,
        }
    }
}

/// Apply `patch` to an empty patchable view and read back the sparse update.
///
/// The view starts with every field set to `null`; fields still `null` (or
/// removed) afterwards are treated as absent.
pub fn patch_to_fields(patch: &JsonPatch) -> Result<VehiclePatch, CoreError> {
    let empty: Map<String, Value> = PATCHABLE_FIELDS
        .iter()
        .map(|field| (field.name().to_string(), Value::Null))
        .collect();
    let mut view = Value::Object(empty);

    json_patch::patch(&mut view, &patch.0)
        .map_err(|e| CoreError::Validation(format!("Error applying JSON Patch: {e}")))?;

    let patched: PatchedView = serde_json::from_value(view)
        .map_err(|e| CoreError::Validation(format!("JSON processing error: {e}")))?;

    Ok(patched.into())
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Apply an RFC 6902 document to vehicle `id`.
///
/// Order: load (not found wins over everything), validate every pointer,
/// apply the document, stage, then write at most once.
pub async fn apply_json_patch<S>(
    store: &S,
    id: DbId,
    patch: &JsonPatch,
) -> Result<PatchOutcome, PatchFailure<S::Error>>
where
    S: VehicleStateStore + ?Sized,
{
    let current = load(store, id).await?;
    validate_patch_paths(patch)?;
    let fields = patch_to_fields(patch)?;
    commit(store, id, current, &fields).await
}

/// Apply a flat patch object to vehicle `id`.
pub async fn apply_flat_patch<S>(
    store: &S,
    id: DbId,
    patch: &VehiclePatch,
) -> Result<PatchOutcome, PatchFailure<S::Error>>
where
    S: VehicleStateStore + ?Sized,
{
    let current = load(store, id).await?;
    commit(store, id, current, patch).await
}

async fn load<S>(store: &S, id: DbId) -> Result<VehicleState, PatchFailure<S::Error>>
where
    S: VehicleStateStore + ?Sized,
{
    store
        .load_state(id)
        .await
        .map_err(PatchFailure::Store)?
        .ok_or(PatchFailure::Rejected(CoreError::NotFound {
            entity: VEHICLE_ENTITY,
            id,
        }))
}

async fn commit<S>(
    store: &S,
    id: DbId,
    current: VehicleState,
    fields: &VehiclePatch,
) -> Result<PatchOutcome, PatchFailure<S::Error>>
where
    S: VehicleStateStore + ?Sized,
{
    let staged = current.stage(fields)?;

    if staged.is_empty() {
        return Ok(PatchOutcome {
            state: current,
            changes: Vec::new(),
            persisted: false,
        });
    }

    store
        .save_state(id, &staged.state)
        .await
        .map_err(PatchFailure::Store)?;

    Ok(PatchOutcome {
        state: staged.state,
        changes: staged.changes,
        persisted: true,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
