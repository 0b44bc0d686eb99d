//! Admin-only handlers: cross-owner listing and delivery.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use gridplan_core::cursor::{clamp_page_limit, PageCursor};
use gridplan_core::types::DbId;
use gridplan_core::workflow::{self, STATUS_SUBMITTED};
use gridplan_db::models::layout::AdminLayoutRow;
use gridplan_db::repositories::LayoutRepo;
use serde::Serialize;

use super::layouts::{load_layout, set_status};
use super::{decode_cursor, page_response};
use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::AdminListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/admin/layouts
///
/// Cross-owner layout listing with owner identity resolved, optionally
/// filtered by status, cursor-paginated like the user listing.
pub async fn list_all_layouts(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<AdminListParams>,
) -> AppResult<impl IntoResponse> {
    if let Some(status) = &params.status {
        workflow::validate_status(status)?;
    }
    let cursor = decode_cursor(params.cursor.as_deref())?;
    let limit = clamp_page_limit(params.limit);

    let page = LayoutRepo::list_all(
        &state.pool,
        params.status.as_deref(),
        cursor.as_ref(),
        limit,
    )
    .await?;

    Ok(Json(page_response(page, |row: &AdminLayoutRow| {
        PageCursor::new(row.layout.created_at, row.layout.id)
    })))
}

/// POST /api/v1/admin/layouts/{id}/deliver
///
/// Move a submitted layout to delivered. Terminal: delivered layouts are
/// immutable and un-deletable from then on.
pub async fn deliver_layout(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let layout = load_layout(&state.pool, layout_id).await?;

    let next = workflow::deliver_transition(&layout.status)?;
    let updated = set_status(&state.pool, layout_id, next).await?;

    tracing::info!(layout_id, user_id = admin.user_id, "Layout delivered");

    Ok(Json(DataResponse { data: updated }))
}

/// Payload for the submitted-count aggregate.
#[derive(Debug, Serialize)]
pub struct PendingCount {
    pub count: i64,
}

/// GET /api/v1/admin/layouts/pending-count
///
/// Number of layouts currently awaiting delivery (operational dashboards).
pub async fn pending_count(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let count = LayoutRepo::count_by_status(&state.pool, STATUS_SUBMITTED).await?;
    Ok(Json(DataResponse {
        data: PendingCount { count },
    }))
}
