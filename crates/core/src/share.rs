//! Public share-link slug generation.
//!
//! Slugs are short random alphanumeric strings; uniqueness is enforced by the
//! database, and the caller retries insertion on collision up to
//! [`MAX_SLUG_ATTEMPTS`] times. Three attempts at this entropy is plenty at
//! the current write volume; revisit the bound before widening the audience.

use rand::Rng;

/// Length of a generated share slug (alphanumeric characters).
pub const SLUG_LENGTH: usize = 12;

/// Maximum insert attempts before a slug collision becomes an internal error.
pub const MAX_SLUG_ATTEMPTS: u32 = 3;

/// Upper bound on a share link's lifetime, in days (ten years).
pub const MAX_EXPIRY_DAYS: i64 = 3650;

/// Generate a random URL-safe share slug.
pub fn generate_slug() -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(SLUG_LENGTH)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_has_expected_length() {
        assert_eq!(generate_slug().len(), SLUG_LENGTH);
    }

    #[test]
    fn test_slug_is_alphanumeric() {
        assert!(generate_slug().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_slugs_are_not_repeated() {
        // Not a proof of entropy, just a sanity check against a constant RNG.
        let a = generate_slug();
        let b = generate_slug();
        assert_ne!(a, b);
    }
}
