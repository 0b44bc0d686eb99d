//! Per-owner storage quota limits and checks.
//!
//! Quota rows are created lazily with these defaults and enforced as soft
//! guardrails: the check and the later counter update are separate store
//! operations, so two concurrent creates can transiently overshoot the limit
//! by a small margin.

use crate::error::CoreError;

/// Default maximum number of layouts per owner.
pub const DEFAULT_MAX_LAYOUTS: i64 = 100;

/// Default maximum reference-image storage per owner (100 MiB).
pub const DEFAULT_MAX_IMAGE_BYTES: i64 = 100 * 1024 * 1024;

/// Fail with `QuotaExceeded` if the owner is at their layout limit.
pub fn check_layout_quota(layout_count: i64, max_layouts: i64) -> Result<(), CoreError> {
    if layout_count >= max_layouts {
        Err(CoreError::QuotaExceeded(format!(
            "Layout limit reached ({layout_count}/{max_layouts})"
        )))
    } else {
        Ok(())
    }
}

/// Fail with `QuotaExceeded` if adding `additional_bytes` would exceed the
/// owner's image storage limit.
pub fn check_image_quota(
    image_bytes: i64,
    additional_bytes: i64,
    max_image_bytes: i64,
) -> Result<(), CoreError> {
    if image_bytes + additional_bytes > max_image_bytes {
        Err(CoreError::QuotaExceeded(format!(
            "Image storage limit reached ({} of {} bytes used, {} requested)",
            image_bytes, max_image_bytes, additional_bytes
        )))
    } else {
        Ok(())
    }
}
