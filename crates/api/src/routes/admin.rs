//! Route definitions for admin cross-owner views.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Admin layout routes mounted at `/admin/layouts`.
///
/// ```text
/// GET    /               -> list_all_layouts
/// GET    /pending-count  -> pending_count
/// POST   /{id}/deliver   -> deliver_layout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(admin::list_all_layouts))
        .route("/pending-count", get(admin::pending_count))
        .route("/{id}/deliver", post(admin::deliver_layout))
}
