//! Route definitions for share links outside the per-layout nest.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::shares;
use crate::state::AppState;

/// Share routes merged at the `/api/v1` root.
///
/// ```text
/// DELETE /shares/{id}    -> delete_share (creator only)
/// GET    /shared/{slug}  -> resolve_share (public, no auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/shares/{id}", delete(shares::delete_share))
        .route("/shared/{slug}", get(shares::resolve_share))
}
