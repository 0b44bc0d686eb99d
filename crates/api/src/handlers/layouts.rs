//! Handlers for layout CRUD, cloning, and workflow transitions.
//!
//! Every write path consults the workflow guards (delivered layouts are
//! hard-locked) and the quota ledger before touching rows. Multi-row writes
//! run as sequential single statements; see the repository docs for the
//! accepted partial-failure window.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gridplan_core::cursor::{clamp_page_limit, PageCursor};
use gridplan_core::error::CoreError;
use gridplan_core::types::DbId;
use gridplan_core::{quota, validation, workflow};
use gridplan_db::models::layout::{CreateLayout, Layout, UpdateLayoutMeta};
use gridplan_db::repositories::{LayoutRepo, QuotaRepo};
use sqlx::PgPool;

use super::{decode_cursor, page_response};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAuth;
use crate::query::CursorParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/layouts
///
/// List the authenticated user's layouts, newest first, cursor-paginated.
pub async fn list_layouts(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<CursorParams>,
) -> AppResult<impl IntoResponse> {
    let cursor = decode_cursor(params.cursor.as_deref())?;
    let limit = clamp_page_limit(params.limit);

    let page = LayoutRepo::list_by_owner(&state.pool, user.user_id, cursor.as_ref(), limit).await?;

    Ok(Json(page_response(page, |layout: &Layout| {
        PageCursor::new(layout.created_at, layout.id)
    })))
}

/// POST /api/v1/layouts
///
/// Create a new layout for the authenticated user, quota permitting.
pub async fn create_layout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(mut input): Json<CreateLayout>,
) -> AppResult<impl IntoResponse> {
    validate_layout_payload(&mut input)?;

    let ledger = QuotaRepo::ensure(&state.pool, user.user_id).await?;
    quota::check_layout_quota(ledger.layout_count, ledger.max_layouts)?;

    let layout = LayoutRepo::create(&state.pool, user.user_id, &input).await?;
    QuotaRepo::increment_layout_count(&state.pool, user.user_id).await?;

    tracing::info!(
        layout_id = layout.id,
        user_id = user.user_id,
        layout_name = %layout.name,
        "Layout created"
    );

    let detail = LayoutRepo::fetch_detail(&state.pool, layout).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: detail })))
}

/// GET /api/v1/layouts/{id}
///
/// Retrieve a layout with both child collections (owner or admin).
pub async fn get_layout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let layout = load_layout(&state.pool, layout_id).await?;
    ensure_owner_or_admin(&layout, &user)?;

    let detail = LayoutRepo::fetch_detail(&state.pool, layout).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/layouts/{id}
///
/// Fully replace a layout's scalar fields and child collections
/// (owner or admin; locked once delivered).
pub async fn update_layout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
    Json(mut input): Json<CreateLayout>,
) -> AppResult<impl IntoResponse> {
    let layout = load_layout(&state.pool, layout_id).await?;
    ensure_owner_or_admin(&layout, &user)?;
    workflow::ensure_mutable(&layout.status)?;
    validate_layout_payload(&mut input)?;

    let updated = LayoutRepo::replace(&state.pool, layout_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Layout",
            id: layout_id,
        }))?;

    tracing::info!(layout_id, user_id = user.user_id, "Layout updated");

    let detail = LayoutRepo::fetch_detail(&state.pool, updated).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PATCH /api/v1/layouts/{id}
///
/// Patch name and/or description only (owner; locked once delivered).
pub async fn patch_layout_meta(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
    Json(mut input): Json<UpdateLayoutMeta>,
) -> AppResult<impl IntoResponse> {
    if input.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one of name or description must be provided".into(),
        )));
    }
    if let Some(name) = &input.name {
        input.name = Some(validation::normalized_name(name)?);
    }

    let layout = load_layout(&state.pool, layout_id).await?;
    ensure_owner(&layout, &user)?;
    workflow::ensure_mutable(&layout.status)?;

    let updated = LayoutRepo::update_meta(
        &state.pool,
        layout_id,
        input.name.as_deref(),
        input.description.as_deref(),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "Layout",
        id: layout_id,
    }))?;

    Ok(Json(DataResponse { data: updated }))
}

/// DELETE /api/v1/layouts/{id}
///
/// Delete a layout and its children (owner; locked once delivered).
/// Decrements the owner's layout count, floored at zero.
pub async fn delete_layout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let layout = load_layout(&state.pool, layout_id).await?;
    ensure_owner(&layout, &user)?;
    workflow::ensure_mutable(&layout.status)?;

    let deleted = LayoutRepo::delete(&state.pool, layout_id).await?;
    if !deleted {
        // A concurrent delete won the race.
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Layout",
            id: layout_id,
        }));
    }

    QuotaRepo::decrement_layout_count(&state.pool, user.user_id).await?;

    tracing::info!(layout_id, user_id = user.user_id, "Layout deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/layouts/{id}/clone
///
/// Clone a layout into the requester's account (owner or admin may read the
/// source). The copy is always a draft, owned by the requester, and counts
/// against the requester's quota.
pub async fn clone_layout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let source = load_layout(&state.pool, layout_id).await?;
    ensure_owner_or_admin(&source, &user)?;

    let ledger = QuotaRepo::ensure(&state.pool, user.user_id).await?;
    quota::check_layout_quota(ledger.layout_count, ledger.max_layouts)?;

    let name = format!("Copy of {}", source.name);
    let detail = LayoutRepo::fetch_detail(&state.pool, source).await?;
    let copy = LayoutRepo::insert_copy(&state.pool, user.user_id, &name, &detail).await?;
    QuotaRepo::increment_layout_count(&state.pool, user.user_id).await?;

    tracing::info!(
        source_layout_id = layout_id,
        layout_id = copy.id,
        user_id = user.user_id,
        "Layout cloned"
    );

    let copy_detail = LayoutRepo::fetch_detail(&state.pool, copy).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: copy_detail })))
}

/// POST /api/v1/layouts/{id}/submit
///
/// Move a draft layout to submitted (owner only).
pub async fn submit_layout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let layout = load_layout(&state.pool, layout_id).await?;
    ensure_owner(&layout, &user)?;

    let next = workflow::submit_transition(&layout.status)?;
    let updated = set_status(&state.pool, layout_id, next).await?;

    tracing::info!(layout_id, user_id = user.user_id, "Layout submitted");

    Ok(Json(DataResponse { data: updated }))
}

/// POST /api/v1/layouts/{id}/withdraw
///
/// Move a submitted layout back to draft (owner or admin).
pub async fn withdraw_layout(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let layout = load_layout(&state.pool, layout_id).await?;
    ensure_owner_or_admin(&layout, &user)?;

    let next = workflow::withdraw_transition(&layout.status)?;
    let updated = set_status(&state.pool, layout_id, next).await?;

    tracing::info!(layout_id, user_id = user.user_id, "Layout withdrawn");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load a layout or fail with NotFound.
pub(crate) async fn load_layout(pool: &PgPool, layout_id: DbId) -> AppResult<Layout> {
    LayoutRepo::find_by_id(pool, layout_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Layout",
            id: layout_id,
        }))
}

/// The layout exists but only its owner may act on it.
pub(crate) fn ensure_owner(layout: &Layout, user: &AuthUser) -> AppResult<()> {
    if layout.owner_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the layout owner may perform this action".into(),
        )));
    }
    Ok(())
}

/// The layout exists but only its owner or an admin may act on it.
pub(crate) fn ensure_owner_or_admin(layout: &Layout, user: &AuthUser) -> AppResult<()> {
    if layout.owner_id != user.user_id && !user.is_admin() {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the layout owner or an admin may perform this action".into(),
        )));
    }
    Ok(())
}

/// Persist a guarded status transition.
pub(crate) async fn set_status(pool: &PgPool, layout_id: DbId, status: &str) -> AppResult<Layout> {
    LayoutRepo::set_status(pool, layout_id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Layout",
            id: layout_id,
        }))
}

/// Validate a create/replace payload before touching the store, normalizing
/// the name so the stored value is what was checked.
fn validate_layout_payload(input: &mut CreateLayout) -> Result<(), CoreError> {
    input.name = validation::normalized_name(&input.name)?;
    validation::validate_grid(input.grid_x, input.grid_y)?;
    validation::validate_physical_size(input.width_mm, input.depth_mm)?;
    validation::validate_spacer_mode(&input.spacer_horizontal)?;
    validation::validate_spacer_mode(&input.spacer_vertical)?;

    for item in &input.placed_items {
        validation::validate_rotation(item.rotation)?;
    }
    for placement in &input.ref_image_placements {
        validation::validate_rotation(placement.rotation)?;
        validation::validate_opacity(placement.opacity)?;
    }

    Ok(())
}
