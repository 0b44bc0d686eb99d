//! Repository for the `user_storage_quotas` table.
//!
//! Counter updates are single conditional UPDATE statements so concurrent
//! decrements cannot lose updates; decrements are floored at zero to absorb
//! accounting drift instead of going negative.

use gridplan_core::types::DbId;
use sqlx::PgPool;

use crate::models::quota::UserStorageQuota;

/// Column list for user_storage_quotas queries.
const COLUMNS: &str = "user_id, layout_count, image_bytes, max_layouts, max_image_bytes, \
    created_at, updated_at";

/// Provides the per-owner quota ledger.
pub struct QuotaRepo;

impl QuotaRepo {
    /// Fetch the owner's quota row, creating it with default limits if
    /// absent.
    ///
    /// Idempotent and safe to call concurrently with itself: the insert is a
    /// single `ON CONFLICT DO NOTHING` statement, so a racing creation simply
    /// becomes a no-op and the following read sees the winner's row.
    pub async fn ensure(pool: &PgPool, user_id: DbId) -> Result<UserStorageQuota, sqlx::Error> {
        sqlx::query("INSERT INTO user_storage_quotas (user_id) VALUES ($1) ON CONFLICT (user_id) DO NOTHING")
            .bind(user_id)
            .execute(pool)
            .await?;

        let query = format!("SELECT {COLUMNS} FROM user_storage_quotas WHERE user_id = $1");
        sqlx::query_as::<_, UserStorageQuota>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Find the owner's quota row without creating it.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserStorageQuota>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_storage_quotas WHERE user_id = $1");
        sqlx::query_as::<_, UserStorageQuota>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Add one to the owner's layout count.
    pub async fn increment_layout_count(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_storage_quotas
             SET layout_count = layout_count + 1, updated_at = NOW()
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Subtract one from the owner's layout count, floored at zero.
    pub async fn decrement_layout_count(pool: &PgPool, user_id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_storage_quotas
             SET layout_count = GREATEST(layout_count - 1, 0), updated_at = NOW()
             WHERE user_id = $1",
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Add uploaded image bytes to the owner's counter.
    pub async fn add_image_bytes(
        pool: &PgPool,
        user_id: DbId,
        bytes: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_storage_quotas
             SET image_bytes = image_bytes + $2, updated_at = NOW()
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(bytes)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Release image bytes from the owner's counter, floored at zero.
    pub async fn release_image_bytes(
        pool: &PgPool,
        user_id: DbId,
        bytes: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE user_storage_quotas
             SET image_bytes = GREATEST(image_bytes - $2, 0), updated_at = NOW()
             WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(bytes)
        .execute(pool)
        .await?;
        Ok(())
    }
}
