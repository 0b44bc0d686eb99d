//! Handlers for public share links.
//!
//! Expired links resolve exactly like missing ones so the public endpoint
//! never leaks whether a slug ever existed.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use gridplan_core::error::CoreError;
use gridplan_core::share::{generate_slug, MAX_EXPIRY_DAYS, MAX_SLUG_ATTEMPTS};
use gridplan_core::types::DbId;
use gridplan_db::is_unique_violation;
use gridplan_db::models::share::{CreateShare, SharedLayoutView};
use gridplan_db::repositories::{LayoutRepo, ShareRepo, UserRepo};

use super::layouts::{ensure_owner, load_layout};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/layouts/{id}/shares
///
/// Create a public share link for a layout (owner only). Retries slug
/// generation a bounded number of times on collision; exhausting the bound is
/// an internal anomaly, not a user-facing condition.
pub async fn create_share(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
    Json(input): Json<CreateShare>,
) -> AppResult<impl IntoResponse> {
    let layout = load_layout(&state.pool, layout_id).await?;
    ensure_owner(&layout, &user)?;

    let expires_at = match input.expires_in_days {
        Some(days) if !(1..=MAX_EXPIRY_DAYS).contains(&days) => {
            return Err(AppError::Core(CoreError::Validation(format!(
                "expiresInDays must be between 1 and {MAX_EXPIRY_DAYS}"
            ))));
        }
        Some(days) => Some(Utc::now() + Duration::days(days)),
        None => None,
    };

    for _ in 0..MAX_SLUG_ATTEMPTS {
        let slug = generate_slug();
        match ShareRepo::insert(&state.pool, layout_id, &slug, user.user_id, expires_at).await {
            Ok(share) => {
                tracing::info!(
                    share_id = share.id,
                    layout_id,
                    user_id = user.user_id,
                    slug = %share.slug,
                    "Share link created"
                );
                return Ok((StatusCode::CREATED, Json(DataResponse { data: share })));
            }
            Err(err) if is_unique_violation(&err, Some("uq_shared_projects_slug")) => {
                tracing::warn!(layout_id, "Share slug collision, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(AppError::Core(CoreError::Internal(format!(
        "Could not generate a unique share slug after {MAX_SLUG_ATTEMPTS} attempts"
    ))))
}

/// GET /api/v1/shared/{slug}
///
/// Public resolution of a share link. Increments the view counter and
/// returns the layout, its children, and the creator's display name.
pub async fn resolve_share(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let share = ShareRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Share link not found".into()))?;

    if let Some(expires_at) = share.expires_at {
        if expires_at < Utc::now() {
            return Err(AppError::NotFound("Share link not found".into()));
        }
    }

    let view_count = ShareRepo::increment_view_count(&state.pool, share.id).await?;

    let layout = LayoutRepo::find_by_id(&state.pool, share.layout_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Share link not found".into()))?;
    let detail = LayoutRepo::fetch_detail(&state.pool, layout).await?;

    let creator = UserRepo::find_by_id(&state.pool, share.created_by)
        .await?
        .ok_or_else(|| AppError::NotFound("Share link not found".into()))?;

    Ok(Json(DataResponse {
        data: SharedLayoutView {
            slug: share.slug,
            layout: detail,
            creator_username: creator.username,
            view_count,
            expires_at: share.expires_at,
        },
    }))
}

/// GET /api/v1/layouts/{id}/shares
///
/// List a layout's share links (owner only).
pub async fn list_shares(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(layout_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let layout = load_layout(&state.pool, layout_id).await?;
    ensure_owner(&layout, &user)?;

    let shares = ShareRepo::list_for_layout(&state.pool, layout_id).await?;
    Ok(Json(DataResponse { data: shares }))
}

/// DELETE /api/v1/shares/{id}
///
/// Delete a share link (creator only).
pub async fn delete_share(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(share_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let share = ShareRepo::find_by_id(&state.pool, share_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "SharedProject",
            id: share_id,
        }))?;

    if share.created_by != user.user_id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only the creator of a share link may delete it".into(),
        )));
    }

    ShareRepo::delete(&state.pool, share_id).await?;

    tracing::info!(share_id, user_id = user.user_id, "Share link deleted");

    Ok(StatusCode::NO_CONTENT)
}
