//! Repository for the `shared_projects` table.
//!
//! Slug uniqueness is enforced by `uq_shared_projects_slug`; the caller
//! retries [`ShareRepo::insert`] with a fresh slug on collision.

use gridplan_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::share::SharedProject;

/// Column list for shared_projects queries.
const COLUMNS: &str = "id, layout_id, slug, created_by, expires_at, view_count, created_at";

/// Provides CRUD operations for public share links.
pub struct ShareRepo;

impl ShareRepo {
    /// Insert a new share link. Fails with a unique violation if the slug is
    /// already taken.
    pub async fn insert(
        pool: &PgPool,
        layout_id: DbId,
        slug: &str,
        created_by: DbId,
        expires_at: Option<Timestamp>,
    ) -> Result<SharedProject, sqlx::Error> {
        let query = format!(
            "INSERT INTO shared_projects (layout_id, slug, created_by, expires_at)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SharedProject>(&query)
            .bind(layout_id)
            .bind(slug)
            .bind(created_by)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find a share link by its internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<SharedProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shared_projects WHERE id = $1");
        sqlx::query_as::<_, SharedProject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a share link by its public slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<SharedProject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM shared_projects WHERE slug = $1");
        sqlx::query_as::<_, SharedProject>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Increment the view counter, returning the new count.
    pub async fn increment_view_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "UPDATE shared_projects SET view_count = view_count + 1
             WHERE id = $1
             RETURNING view_count",
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Delete a share link. Returns whether a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM shared_projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List all share links for a layout, newest first. Unpaginated; the set
    /// per layout is expected to stay small.
    pub async fn list_for_layout(
        pool: &PgPool,
        layout_id: DbId,
    ) -> Result<Vec<SharedProject>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM shared_projects
             WHERE layout_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, SharedProject>(&query)
            .bind(layout_id)
            .fetch_all(pool)
            .await
    }
}
