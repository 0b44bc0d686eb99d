//! Route definitions for layouts and their share links.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{layouts, shares};
use crate::state::AppState;

/// Layout routes mounted at `/layouts`.
///
/// ```text
/// GET    /               -> list_layouts
/// POST   /               -> create_layout
/// GET    /{id}           -> get_layout
/// PUT    /{id}           -> update_layout
/// PATCH  /{id}           -> patch_layout_meta
/// DELETE /{id}           -> delete_layout
/// POST   /{id}/clone     -> clone_layout
/// POST   /{id}/submit    -> submit_layout
/// POST   /{id}/withdraw  -> withdraw_layout
/// GET    /{id}/shares    -> list_shares
/// POST   /{id}/shares    -> create_share
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(layouts::list_layouts).post(layouts::create_layout))
        .route(
            "/{id}",
            get(layouts::get_layout)
                .put(layouts::update_layout)
                .patch(layouts::patch_layout_meta)
                .delete(layouts::delete_layout),
        )
        .route("/{id}/clone", post(layouts::clone_layout))
        .route("/{id}/submit", post(layouts::submit_layout))
        .route("/{id}/withdraw", post(layouts::withdraw_layout))
        .route(
            "/{id}/shares",
            get(shares::list_shares).post(shares::create_share),
        )
}
