//! Public share link models.

use gridplan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::layout::LayoutDetail;

/// A row from the `shared_projects` table.
///
/// Never updated after creation except for the view counter.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedProject {
    pub id: DbId,
    pub layout_id: DbId,
    pub slug: String,
    pub created_by: DbId,
    pub expires_at: Option<Timestamp>,
    pub view_count: i64,
    pub created_at: Timestamp,
}

/// DTO for creating a share link.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShare {
    pub expires_in_days: Option<i64>,
}

/// The public view resolved from a share slug.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedLayoutView {
    pub slug: String,
    pub layout: LayoutDetail,
    pub creator_username: String,
    pub view_count: i64,
    pub expires_at: Option<Timestamp>,
}
