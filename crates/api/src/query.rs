//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;

/// Cursor pagination parameters (`?cursor=&limit=`).
///
/// The cursor is the opaque token from a previous page's `nextCursor`; the
/// limit is clamped in the handler via `clamp_page_limit`.
#[derive(Debug, Deserialize)]
pub struct CursorParams {
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}

/// Query parameters for the admin cross-owner listing.
#[derive(Debug, Deserialize)]
pub struct AdminListParams {
    pub status: Option<String>,
    pub cursor: Option<String>,
    pub limit: Option<i64>,
}
