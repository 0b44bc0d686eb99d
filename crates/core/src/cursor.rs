//! Opaque keyset-pagination cursor codec.
//!
//! List endpoints paginate over `(created_at DESC, id DESC)`. The position is
//! carried between requests as an opaque, URL-safe token: a JSON-serialized
//! [`PageCursor`] run through unpadded URL-safe base64. Callers must treat the
//! token as opaque; any token that does not decode back into a structurally
//! valid pair is rejected with a validation error.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

/// Default number of items per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 20;

/// Maximum number of items per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// The compound "last seen" key for keyset pagination.
///
/// `created_at` alone is not unique (clock resolution), so `id` breaks ties
/// to keep page boundaries deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PageCursor {
    pub created_at: Timestamp,
    pub id: DbId,
}

impl PageCursor {
    pub fn new(created_at: Timestamp, id: DbId) -> Self {
        Self { created_at, id }
    }

    /// Encode the cursor into an opaque URL-safe token.
    pub fn encode(&self) -> String {
        // Serialization of a two-field struct cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        URL_SAFE_NO_PAD.encode(json)
    }

    /// Decode a token produced by [`PageCursor::encode`].
    ///
    /// Fails with `CoreError::Validation` if the token is not valid base64 or
    /// does not deserialize into a `(createdAt, id)` pair.
    pub fn decode(token: &str) -> Result<Self, CoreError> {
        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CoreError::Validation("Malformed pagination cursor".into()))?;
        serde_json::from_slice(&bytes)
            .map_err(|_| CoreError::Validation("Malformed pagination cursor".into()))
    }
}

/// Clamp a requested page limit into `[1, MAX_PAGE_LIMIT]`.
///
/// `None` yields [`DEFAULT_PAGE_LIMIT`].
pub fn clamp_page_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_PAGE_LIMIT)
        .clamp(1, MAX_PAGE_LIMIT)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    use super::*;

    fn sample_cursor() -> PageCursor {
        PageCursor::new(Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap(), 42)
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let cursor = sample_cursor();
        let token = cursor.encode();
        let decoded = PageCursor::decode(&token).unwrap();
        assert_eq!(decoded, cursor);
    }

    #[test]
    fn test_token_is_url_safe() {
        let token = sample_cursor().encode();
        assert!(!token.contains('+'));
        assert!(!token.contains('/'));
        assert!(!token.contains('='));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert_matches!(
            PageCursor::decode("not a cursor!!!"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_decode_rejects_valid_base64_wrong_shape() {
        let token = URL_SAFE_NO_PAD.encode(br#"{"foo": "bar"}"#);
        assert_matches!(PageCursor::decode(&token), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_decode_rejects_non_numeric_id() {
        let token = URL_SAFE_NO_PAD.encode(br#"{"createdAt":"2026-03-14T09:26:53Z","id":"42"}"#);
        assert_matches!(PageCursor::decode(&token), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_decode_rejects_empty_token() {
        assert_matches!(PageCursor::decode(""), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_clamp_page_limit() {
        assert_eq!(clamp_page_limit(None), DEFAULT_PAGE_LIMIT);
        assert_eq!(clamp_page_limit(Some(0)), 1);
        assert_eq!(clamp_page_limit(Some(-5)), 1);
        assert_eq!(clamp_page_limit(Some(50)), 50);
        assert_eq!(clamp_page_limit(Some(1000)), MAX_PAGE_LIMIT);
    }
}
