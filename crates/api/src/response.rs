//! Shared response envelope types for API handlers.
//!
//! Plain success responses use a `{ "data": ... }` envelope; paginated
//! listings add `nextCursor` and `hasMore`. Use these instead of ad-hoc
//! `serde_json::json!` blobs to get compile-time type safety and consistent
//! serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Pagination envelope: `{ "data": [...], "nextCursor": ..., "hasMore": ... }`.
///
/// `nextCursor` is omitted from the JSON when there is no further page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T: Serialize> {
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
    pub has_more: bool,
}
