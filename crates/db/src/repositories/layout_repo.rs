//! Repository for the `layouts` table and its child collections.
//!
//! Multi-row write paths (layout + children + quota) run as sequential
//! single-statement calls with no cross-row transaction: a failure mid-way
//! leaves everything prior committed. This window is accepted by design; see
//! DESIGN.md.

use gridplan_core::cursor::PageCursor;
use gridplan_core::items::split_item_identifier;
use gridplan_core::types::DbId;
use gridplan_core::workflow::STATUS_DRAFT;
use sqlx::PgPool;

use crate::models::layout::{
    AdminLayoutRow, CreateLayout, Layout, LayoutDetail, PlacedItem, RefImagePlacement,
};
use crate::models::page::KeysetPage;

/// Column list for layouts queries.
const LAYOUT_COLUMNS: &str = "id, owner_id, name, description, grid_x, grid_y, \
    width_mm, depth_mm, spacer_horizontal, spacer_vertical, status, is_public, \
    created_at, updated_at";

/// Column list for layouts queries with a table alias (joined queries).
const LAYOUT_COLUMNS_ALIASED: &str = "l.id, l.owner_id, l.name, l.description, l.grid_x, \
    l.grid_y, l.width_mm, l.depth_mm, l.spacer_horizontal, l.spacer_vertical, l.status, \
    l.is_public, l.created_at, l.updated_at";

/// Column list for placed_items queries.
const PLACED_ITEM_COLUMNS: &str =
    "id, layout_id, library_id, item_id, x, y, width, height, rotation, sort_order";

/// Provides CRUD operations for layouts, placed items, and reference-image
/// placements.
pub struct LayoutRepo;

impl LayoutRepo {
    /// Find a layout by internal ID (scalar row only, no children).
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Layout>, sqlx::Error> {
        let query = format!("SELECT {LAYOUT_COLUMNS} FROM layouts WHERE id = $1");
        sqlx::query_as::<_, Layout>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List an owner's layouts ordered by `(created_at DESC, id DESC)`.
    ///
    /// Fetches `limit + 1` rows; the extra row only signals `has_more` and is
    /// discarded. The cursor filter matches rows strictly before the cursor
    /// position in the compound order.
    pub async fn list_by_owner(
        pool: &PgPool,
        owner_id: DbId,
        cursor: Option<&PageCursor>,
        limit: i64,
    ) -> Result<KeysetPage<Layout>, sqlx::Error> {
        let rows = match cursor {
            Some(cursor) => {
                let query = format!(
                    "SELECT {LAYOUT_COLUMNS} FROM layouts
                     WHERE owner_id = $1
                       AND (created_at < $2 OR (created_at = $2 AND id < $3))
                     ORDER BY created_at DESC, id DESC
                     LIMIT $4"
                );
                sqlx::query_as::<_, Layout>(&query)
                    .bind(owner_id)
                    .bind(cursor.created_at)
                    .bind(cursor.id)
                    .bind(limit + 1)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {LAYOUT_COLUMNS} FROM layouts
                     WHERE owner_id = $1
                     ORDER BY created_at DESC, id DESC
                     LIMIT $2"
                );
                sqlx::query_as::<_, Layout>(&query)
                    .bind(owner_id)
                    .bind(limit + 1)
                    .fetch_all(pool)
                    .await?
            }
        };

        Ok(KeysetPage::from_probe(rows, limit))
    }

    /// Cross-owner listing for admin views, with owner identity resolved and
    /// an optional status equality filter. Same keyset mechanics as
    /// [`LayoutRepo::list_by_owner`].
    pub async fn list_all(
        pool: &PgPool,
        status: Option<&str>,
        cursor: Option<&PageCursor>,
        limit: i64,
    ) -> Result<KeysetPage<AdminLayoutRow>, sqlx::Error> {
        let rows = match cursor {
            Some(cursor) => {
                let query = format!(
                    "SELECT {LAYOUT_COLUMNS_ALIASED},
                            u.username AS owner_username, u.email AS owner_email
                     FROM layouts l
                     JOIN users u ON u.id = l.owner_id
                     WHERE ($1::text IS NULL OR l.status = $1)
                       AND (l.created_at < $2 OR (l.created_at = $2 AND l.id < $3))
                     ORDER BY l.created_at DESC, l.id DESC
                     LIMIT $4"
                );
                sqlx::query_as::<_, AdminLayoutRow>(&query)
                    .bind(status)
                    .bind(cursor.created_at)
                    .bind(cursor.id)
                    .bind(limit + 1)
                    .fetch_all(pool)
                    .await?
            }
            None => {
                let query = format!(
                    "SELECT {LAYOUT_COLUMNS_ALIASED},
                            u.username AS owner_username, u.email AS owner_email
                     FROM layouts l
                     JOIN users u ON u.id = l.owner_id
                     WHERE ($1::text IS NULL OR l.status = $1)
                     ORDER BY l.created_at DESC, l.id DESC
                     LIMIT $2"
                );
                sqlx::query_as::<_, AdminLayoutRow>(&query)
                    .bind(status)
                    .bind(limit + 1)
                    .fetch_all(pool)
                    .await?
            }
        };

        Ok(KeysetPage::from_probe(rows, limit))
    }

    /// Count layouts with a given status (operational dashboards).
    pub async fn count_by_status(pool: &PgPool, status: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM layouts WHERE status = $1")
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Insert a new layout with its child collections, returning the scalar
    /// row. New layouts always start in draft.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateLayout,
    ) -> Result<Layout, sqlx::Error> {
        let query = format!(
            "INSERT INTO layouts
                (owner_id, name, description, grid_x, grid_y, width_mm, depth_mm,
                 spacer_horizontal, spacer_vertical, status, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {LAYOUT_COLUMNS}"
        );
        let layout = sqlx::query_as::<_, Layout>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.grid_x)
            .bind(input.grid_y)
            .bind(input.width_mm)
            .bind(input.depth_mm)
            .bind(&input.spacer_horizontal)
            .bind(&input.spacer_vertical)
            .bind(STATUS_DRAFT)
            .bind(input.is_public)
            .fetch_one(pool)
            .await?;

        Self::insert_children(pool, layout.id, input).await?;

        Ok(layout)
    }

    /// Replace a layout's scalar fields and both child collections.
    ///
    /// Children are deleted and fully re-inserted (no diffing); the editor
    /// always submits a full snapshot. Returns `None` if no row with the
    /// given `id` exists.
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        input: &CreateLayout,
    ) -> Result<Option<Layout>, sqlx::Error> {
        let query = format!(
            "UPDATE layouts SET
                name = $2, description = $3, grid_x = $4, grid_y = $5,
                width_mm = $6, depth_mm = $7, spacer_horizontal = $8,
                spacer_vertical = $9, is_public = $10, updated_at = NOW()
             WHERE id = $1
             RETURNING {LAYOUT_COLUMNS}"
        );
        let layout = sqlx::query_as::<_, Layout>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.grid_x)
            .bind(input.grid_y)
            .bind(input.width_mm)
            .bind(input.depth_mm)
            .bind(&input.spacer_horizontal)
            .bind(&input.spacer_vertical)
            .bind(input.is_public)
            .fetch_optional(pool)
            .await?;

        let Some(layout) = layout else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM placed_items WHERE layout_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        sqlx::query("DELETE FROM ref_image_placements WHERE layout_id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Self::insert_children(pool, id, input).await?;

        Ok(Some(layout))
    }

    /// Patch name and/or description. Only non-`None` fields are applied.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_meta(
        pool: &PgPool,
        id: DbId,
        name: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Layout>, sqlx::Error> {
        let query = format!(
            "UPDATE layouts SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {LAYOUT_COLUMNS}"
        );
        sqlx::query_as::<_, Layout>(&query)
            .bind(id)
            .bind(name)
            .bind(description)
            .fetch_optional(pool)
            .await
    }

    /// Persist a workflow status change, stamping `updated_at` in the same
    /// statement. Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Layout>, sqlx::Error> {
        let query = format!(
            "UPDATE layouts SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {LAYOUT_COLUMNS}"
        );
        sqlx::query_as::<_, Layout>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Delete a layout. Child rows go with it via `ON DELETE CASCADE`.
    /// Returns whether a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM layouts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Insert a copy of `source` owned by `new_owner_id`, with the given name
    /// and draft status regardless of the source's status. Children are
    /// copied verbatim, including broken reference-image ids.
    pub async fn insert_copy(
        pool: &PgPool,
        new_owner_id: DbId,
        name: &str,
        source: &LayoutDetail,
    ) -> Result<Layout, sqlx::Error> {
        let query = format!(
            "INSERT INTO layouts
                (owner_id, name, description, grid_x, grid_y, width_mm, depth_mm,
                 spacer_horizontal, spacer_vertical, status, is_public)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {LAYOUT_COLUMNS}"
        );
        let copy = sqlx::query_as::<_, Layout>(&query)
            .bind(new_owner_id)
            .bind(name)
            .bind(&source.layout.description)
            .bind(source.layout.grid_x)
            .bind(source.layout.grid_y)
            .bind(source.layout.width_mm)
            .bind(source.layout.depth_mm)
            .bind(&source.layout.spacer_horizontal)
            .bind(&source.layout.spacer_vertical)
            .bind(STATUS_DRAFT)
            .bind(false)
            .fetch_one(pool)
            .await?;

        for item in &source.placed_items {
            sqlx::query(
                "INSERT INTO placed_items
                    (layout_id, library_id, item_id, x, y, width, height, rotation, sort_order)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(copy.id)
            .bind(&item.library_id)
            .bind(&item.item_id)
            .bind(item.x)
            .bind(item.y)
            .bind(item.width)
            .bind(item.height)
            .bind(item.rotation)
            .bind(item.sort_order)
            .execute(pool)
            .await?;
        }

        for (index, placement) in source.ref_image_placements.iter().enumerate() {
            sqlx::query(
                "INSERT INTO ref_image_placements
                    (layout_id, ref_image_id, name, x, y, width, height,
                     opacity, scale, is_locked, rotation, sort_order)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
            )
            .bind(copy.id)
            .bind(placement.ref_image_id)
            .bind(&placement.name)
            .bind(placement.x)
            .bind(placement.y)
            .bind(placement.width)
            .bind(placement.height)
            .bind(placement.opacity)
            .bind(placement.scale)
            .bind(placement.is_locked)
            .bind(placement.rotation)
            .bind(index as i32)
            .execute(pool)
            .await?;
        }

        Ok(copy)
    }

    /// Hydrate a layout with both child collections.
    ///
    /// Placed items come back in `sort_order`; reference-image placements in
    /// insertion order, each with its displayable URL resolved via LEFT JOIN
    /// (missing images yield NULL id and URL, not an error).
    pub async fn fetch_detail(pool: &PgPool, layout: Layout) -> Result<LayoutDetail, sqlx::Error> {
        let items_query = format!(
            "SELECT {PLACED_ITEM_COLUMNS} FROM placed_items
             WHERE layout_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        let placed_items = sqlx::query_as::<_, PlacedItem>(&items_query)
            .bind(layout.id)
            .fetch_all(pool)
            .await?;

        let ref_image_placements = sqlx::query_as::<_, RefImagePlacement>(
            "SELECT p.id, p.layout_id, p.ref_image_id, p.name, r.url AS image_url,
                    p.x, p.y, p.width, p.height, p.opacity, p.scale, p.is_locked, p.rotation
             FROM ref_image_placements p
             LEFT JOIN ref_images r ON r.id = p.ref_image_id
             WHERE p.layout_id = $1
             ORDER BY p.sort_order ASC, p.id ASC",
        )
        .bind(layout.id)
        .fetch_all(pool)
        .await?;

        Ok(LayoutDetail {
            layout,
            placed_items,
            ref_image_placements,
        })
    }

    /// Insert both child collections from a create/replace payload.
    ///
    /// Placed-item sort order defaults to the array index; compound item
    /// identifiers are split into library and item halves at this boundary.
    async fn insert_children(
        pool: &PgPool,
        layout_id: DbId,
        input: &CreateLayout,
    ) -> Result<(), sqlx::Error> {
        for (index, item) in input.placed_items.iter().enumerate() {
            let (library_id, item_id) = split_item_identifier(&item.item_id);
            sqlx::query(
                "INSERT INTO placed_items
                    (layout_id, library_id, item_id, x, y, width, height, rotation, sort_order)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
            )
            .bind(layout_id)
            .bind(library_id)
            .bind(item_id)
            .bind(item.x)
            .bind(item.y)
            .bind(item.width)
            .bind(item.height)
            .bind(item.rotation)
            .bind(index as i32)
            .execute(pool)
            .await?;
        }

        for (index, placement) in input.ref_image_placements.iter().enumerate() {
            sqlx::query(
                "INSERT INTO ref_image_placements
                    (layout_id, ref_image_id, name, x, y, width, height,
                     opacity, scale, is_locked, rotation, sort_order)
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)",
            )
            .bind(layout_id)
            .bind(placement.ref_image_id)
            .bind(&placement.name)
            .bind(placement.x)
            .bind(placement.y)
            .bind(placement.width)
            .bind(placement.height)
            .bind(placement.opacity)
            .bind(placement.scale)
            .bind(placement.is_locked)
            .bind(placement.rotation)
            .bind(index as i32)
            .execute(pool)
            .await?;
        }

        Ok(())
    }
}
