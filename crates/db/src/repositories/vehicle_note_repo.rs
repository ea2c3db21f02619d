//! Repository for the `vehicle_notes` table.

use rental_core::pagination::{Page, PageRequest};
use rental_core::types::DbId;
use sqlx::PgPool;

use crate::models::vehicle_note::{VehicleNote, VehicleNoteFilter, VehicleNoteInput};

const COLUMNS: &str = "id, vehicle_id, author, note, created_at";

/// Predicates shared by the list and count queries. Binds `$1..=$4`.
const FILTER: &str = "vehicle_id = $1
    AND ($2::TEXT IS NULL OR author ILIKE $2 ESCAPE '\\')
    AND ($3::TIMESTAMPTZ IS NULL OR created_at >= $3)
    AND ($4::TIMESTAMPTZ IS NULL OR created_at <= $4)";

/// `%term%` with `LIKE` wildcards in `term` matched literally.
fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Provides CRUD and filtered listing for vehicle notes.
pub struct VehicleNoteRepo;

impl VehicleNoteRepo {
    /// Insert a note for `vehicle_id`. A missing timestamp becomes `NOW()`.
    pub async fn create(
        pool: &PgPool,
        vehicle_id: DbId,
        input: &VehicleNoteInput,
    ) -> Result<VehicleNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO vehicle_notes (vehicle_id, author, note, created_at)
             VALUES ($1, $2, $3, COALESCE($4, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VehicleNote>(&query)
            .bind(vehicle_id)
            .bind(&input.author)
            .bind(&input.note)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a note by ID, only if it belongs to `vehicle_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        vehicle_id: DbId,
        id: DbId,
    ) -> Result<Option<VehicleNote>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vehicle_notes WHERE id = $1 AND vehicle_id = $2");
        sqlx::query_as::<_, VehicleNote>(&query)
            .bind(id)
            .bind(vehicle_id)
            .fetch_optional(pool)
            .await
    }

    /// One page of a vehicle's notes, newest first.
    pub async fn list_filtered(
        pool: &PgPool,
        vehicle_id: DbId,
        filter: &VehicleNoteFilter,
        page: PageRequest,
    ) -> Result<Page<VehicleNote>, sqlx::Error> {
        let author = filter.author.as_deref().map(contains_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM vehicle_notes
             WHERE {FILTER}
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        let content = sqlx::query_as::<_, VehicleNote>(&query)
            .bind(vehicle_id)
            .bind(&author)
            .bind(filter.from)
            .bind(filter.to)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        let count_query = format!("SELECT COUNT(*) FROM vehicle_notes WHERE {FILTER}");
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(vehicle_id)
            .bind(&author)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_one(pool)
            .await?;

        Ok(Page::new(content, total, page))
    }

    /// Replace a note's author and text. `created_at` is only changed when
    /// the input carries one.
    pub async fn update(
        pool: &PgPool,
        vehicle_id: DbId,
        id: DbId,
        input: &VehicleNoteInput,
    ) -> Result<Option<VehicleNote>, sqlx::Error> {
        let query = format!(
            "UPDATE vehicle_notes SET
                author = $3,
                note = $4,
                created_at = COALESCE($5, created_at)
             WHERE id = $1 AND vehicle_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VehicleNote>(&query)
            .bind(id)
            .bind(vehicle_id)
            .bind(&input.author)
            .bind(&input.note)
            .bind(input.created_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note under `vehicle_id`. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, vehicle_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vehicle_notes WHERE id = $1 AND vehicle_id = $2")
            .bind(id)
            .bind(vehicle_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(contains_pattern("desk"), "%desk%");
        assert_eq!(contains_pattern("50%_off"), r"%50\%\_off%");
        assert_eq!(contains_pattern(r"a\b"), r"%a\\b%");
    }
}
