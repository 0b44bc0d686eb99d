//! Handlers for the reference image metadata registry.
//!
//! Binary storage lives elsewhere; these endpoints only track metadata and
//! charge the owner's byte quota.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use gridplan_core::error::CoreError;
use gridplan_core::types::DbId;
use gridplan_core::{quota, validation};
use gridplan_db::models::ref_image::CreateRefImage;
use gridplan_db::repositories::{QuotaRepo, RefImageRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/ref-images
///
/// Register an uploaded reference image against the caller's byte quota.
pub async fn create_ref_image(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Json(mut input): Json<CreateRefImage>,
) -> AppResult<impl IntoResponse> {
    input.name = validation::normalized_name(&input.name)?;
    if input.size_bytes < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "sizeBytes must not be negative".into(),
        )));
    }

    let ledger = QuotaRepo::ensure(&state.pool, user.user_id).await?;
    quota::check_image_quota(ledger.image_bytes, input.size_bytes, ledger.max_image_bytes)?;

    let image = RefImageRepo::create(&state.pool, user.user_id, &input).await?;
    QuotaRepo::add_image_bytes(&state.pool, user.user_id, image.size_bytes).await?;

    tracing::info!(
        ref_image_id = image.id,
        user_id = user.user_id,
        size_bytes = image.size_bytes,
        "Reference image registered"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: image })))
}

/// GET /api/v1/ref-images
///
/// List the caller's registered reference images, newest first.
pub async fn list_ref_images(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let images = RefImageRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: images }))
}

/// DELETE /api/v1/ref-images/{id}
///
/// Delete a reference image (owner only) and release its bytes. Placements
/// that pointed at it keep their geometry with a null image reference.
pub async fn delete_ref_image(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(image_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let image = RefImageRepo::find_by_id(&state.pool, image_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "RefImage",
            id: image_id,
        }))?;

    if image.owner_id != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the image owner may delete it".into(),
        )));
    }

    if let Some(deleted) = RefImageRepo::delete(&state.pool, image_id).await? {
        QuotaRepo::release_image_bytes(&state.pool, user.user_id, deleted.size_bytes).await?;
    }

    tracing::info!(ref_image_id = image_id, user_id = user.user_id, "Reference image deleted");

    Ok(StatusCode::NO_CONTENT)
}
