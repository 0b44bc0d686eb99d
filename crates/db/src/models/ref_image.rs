//! Reference image metadata models.
//!
//! Only metadata is persisted here; binary storage and transformation are
//! external collaborators.

use gridplan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `ref_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefImage {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub url: String,
    pub size_bytes: i64,
    pub created_at: Timestamp,
}

/// DTO for registering an uploaded reference image.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRefImage {
    pub name: String,
    pub url: String,
    pub size_bytes: i64,
}
