//! Handler for quota introspection.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use gridplan_db::repositories::QuotaRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/user/quota
///
/// Return the caller's quota row, creating it with default limits on first
/// use.
pub async fn get_quota(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let ledger = QuotaRepo::ensure(&state.pool, user.user_id).await?;
    Ok(Json(DataResponse { data: ledger }))
}
