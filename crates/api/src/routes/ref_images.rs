//! Route definitions for the reference image registry.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::ref_images;
use crate::state::AppState;

/// Reference image routes mounted at `/ref-images`.
///
/// ```text
/// GET    /      -> list_ref_images
/// POST   /      -> create_ref_image
/// DELETE /{id}  -> delete_ref_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(ref_images::list_ref_images).post(ref_images::create_ref_image),
        )
        .route("/{id}", delete(ref_images::delete_ref_image))
}
