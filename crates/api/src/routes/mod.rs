pub mod admin;
pub mod health;
pub mod layouts;
pub mod ref_images;
pub mod shares;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /layouts                                 list, create (auth required)
/// /layouts/{id}                            get, replace, patch meta, delete
/// /layouts/{id}/clone                      clone into requester (POST)
/// /layouts/{id}/submit                     draft -> submitted (POST)
/// /layouts/{id}/withdraw                   submitted -> draft (POST)
/// /layouts/{id}/shares                     list, create share links
///
/// /shares/{id}                             delete share link (creator)
/// /shared/{slug}                           public share resolution (no auth)
///
/// /ref-images                              list, register image metadata
/// /ref-images/{id}                         delete image, release bytes
///
/// /user/quota                              own quota row (GET)
///
/// /admin/layouts                           cross-owner listing (admin only)
/// /admin/layouts/pending-count             submitted-count aggregate
/// /admin/layouts/{id}/deliver              submitted -> delivered (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Layout CRUD, cloning, workflow, and per-layout share links.
        .nest("/layouts", layouts::router())
        // Share deletion by id and public slug resolution.
        .merge(shares::router())
        // Reference image metadata registry.
        .nest("/ref-images", ref_images::router())
        // Quota introspection.
        .route("/user/quota", get(handlers::quota::get_quota))
        // Admin cross-owner views and delivery.
        .nest("/admin/layouts", admin::router())
}
