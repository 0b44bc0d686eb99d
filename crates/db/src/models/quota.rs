//! Storage quota models.

use gridplan_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_storage_quotas` table (one per owner).
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStorageQuota {
    pub user_id: DbId,
    pub layout_count: i64,
    pub image_bytes: i64,
    pub max_layouts: i64,
    pub max_image_bytes: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
