//! Layout models and DTOs.
//!
//! A layout is a user's saved grid design: dimensions, spacer modes, workflow
//! status, plus two owned child collections (placed items and reference-image
//! placements). Child collections always reflect the last successful update;
//! update operations fully replace them, never merge.

use gridplan_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `layouts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub grid_x: i32,
    pub grid_y: i32,
    pub width_mm: f64,
    pub depth_mm: f64,
    pub spacer_horizontal: String,
    pub spacer_vertical: String,
    pub status: String,
    pub is_public: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `placed_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItem {
    pub id: DbId,
    pub layout_id: DbId,
    pub library_id: String,
    pub item_id: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    pub rotation: i32,
    pub sort_order: i32,
}

/// A reference-image placement joined against the image store.
///
/// `ref_image_id` and `image_url` are both NULL when the referenced image has
/// been deleted; the placement itself survives as a "broken reference".
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefImagePlacement {
    pub id: DbId,
    pub layout_id: DbId,
    pub ref_image_id: Option<DbId>,
    pub name: String,
    pub image_url: Option<String>,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub opacity: f64,
    pub scale: f64,
    pub is_locked: bool,
    pub rotation: i32,
}

/// A layout hydrated with both child collections.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDetail {
    #[serde(flatten)]
    pub layout: Layout,
    pub placed_items: Vec<PlacedItem>,
    pub ref_image_placements: Vec<RefImagePlacement>,
}

/// A row from the admin cross-owner listing, with owner identity resolved.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLayoutRow {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub layout: Layout,
    pub owner_username: String,
    pub owner_email: String,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// One placed item in a create/update payload.
///
/// `item_id` uses the `"<libraryId>:<itemId>"` boundary convention; an
/// identifier without the separator belongs to the default library.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedItemInput {
    pub item_id: String,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub rotation: i32,
}

/// One reference-image placement in a create/update payload.
///
/// Position and size are percentages of the grid area.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefImagePlacementInput {
    pub ref_image_id: Option<DbId>,
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub rotation: i32,
}

fn default_opacity() -> f64 {
    1.0
}

fn default_scale() -> f64 {
    1.0
}

/// DTO for creating a layout or fully replacing one (the editor always
/// submits a full snapshot).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLayout {
    pub name: String,
    pub description: Option<String>,
    pub grid_x: i32,
    pub grid_y: i32,
    pub width_mm: f64,
    pub depth_mm: f64,
    #[serde(default = "default_spacer_mode")]
    pub spacer_horizontal: String,
    #[serde(default = "default_spacer_mode")]
    pub spacer_vertical: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub placed_items: Vec<PlacedItemInput>,
    #[serde(default)]
    pub ref_image_placements: Vec<RefImagePlacementInput>,
}

fn default_spacer_mode() -> String {
    gridplan_core::validation::SPACER_NONE.to_string()
}

/// DTO for the narrow metadata patch (name/description only).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLayoutMeta {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateLayoutMeta {
    /// Whether the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}
