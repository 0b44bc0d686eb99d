//! HTTP handlers, grouped by resource.

pub mod admin;
pub mod layouts;
pub mod quota;
pub mod ref_images;
pub mod shares;

use gridplan_core::cursor::PageCursor;
use gridplan_core::error::CoreError;
use gridplan_db::models::page::KeysetPage;
use serde::Serialize;

use crate::response::PageResponse;

/// Decode an optional cursor query parameter.
pub(crate) fn decode_cursor(token: Option<&str>) -> Result<Option<PageCursor>, CoreError> {
    token.map(PageCursor::decode).transpose()
}

/// Build the pagination envelope from a keyset page.
///
/// The next cursor is derived from the last *returned* row, not the probe
/// row, so following it continues exactly where this page ended.
pub(crate) fn page_response<T: Serialize>(
    page: KeysetPage<T>,
    cursor_of: impl Fn(&T) -> PageCursor,
) -> PageResponse<T> {
    let next_cursor = if page.has_more {
        page.items.last().map(|row| cursor_of(row).encode())
    } else {
        None
    };

    PageResponse {
        data: page.items,
        next_cursor,
        has_more: page.has_more,
    }
}
