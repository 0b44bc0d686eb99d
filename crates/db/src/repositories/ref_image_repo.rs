//! Repository for the `ref_images` metadata table.
//!
//! Deleting an image sets `ref_image_id` to NULL on any placements that
//! reference it (a store-level guarantee); the deleted row is returned so the
//! caller can release its bytes from the owner's quota.

use gridplan_core::types::DbId;
use sqlx::PgPool;

use crate::models::ref_image::{CreateRefImage, RefImage};

/// Column list for ref_images queries.
const COLUMNS: &str = "id, owner_id, name, url, size_bytes, created_at";

/// Provides CRUD operations for reference image metadata.
pub struct RefImageRepo;

impl RefImageRepo {
    /// Register an uploaded reference image, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateRefImage,
    ) -> Result<RefImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO ref_images (owner_id, name, url, size_bytes)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RefImage>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.url)
            .bind(input.size_bytes)
            .fetch_one(pool)
            .await
    }

    /// Find a reference image by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RefImage>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ref_images WHERE id = $1");
        sqlx::query_as::<_, RefImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a reference image, returning the deleted row (or `None` if it
    /// did not exist).
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<RefImage>, sqlx::Error> {
        let query = format!("DELETE FROM ref_images WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, RefImage>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's reference images, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
    ) -> Result<Vec<RefImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ref_images
             WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RefImage>(&query)
            .bind(owner_id)
            .fetch_all(pool)
            .await
    }
}
