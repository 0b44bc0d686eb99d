//! Compound item-identifier parsing.
//!
//! At the API boundary a placed item references its catalog entry as a single
//! `"<libraryId>:<itemId>"` string. Internally the two halves are stored as
//! separate columns to avoid re-parsing ambiguity. An identifier without the
//! separator is attributed to the default library.
//!
//! Item ids are expected not to contain the separator themselves; an id with
//! an embedded `:` would split at the first occurrence.

/// Library assigned to identifiers that carry no library prefix.
pub const DEFAULT_LIBRARY_ID: &str = "default";

/// Separator between library id and item id in the boundary encoding.
pub const ITEM_ID_SEPARATOR: char = ':';

/// Split a boundary identifier into `(library_id, item_id)`.
pub fn split_item_identifier(identifier: &str) -> (&str, &str) {
    match identifier.split_once(ITEM_ID_SEPARATOR) {
        Some((library_id, item_id)) => (library_id, item_id),
        None => (DEFAULT_LIBRARY_ID, identifier),
    }
}

/// Join the stored halves back into the boundary encoding.
pub fn join_item_identifier(library_id: &str, item_id: &str) -> String {
    format!("{library_id}{ITEM_ID_SEPARATOR}{item_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_prefixed_identifier() {
        assert_eq!(
            split_item_identifier("custom-lib:special-3x2"),
            ("custom-lib", "special-3x2")
        );
    }

    #[test]
    fn test_split_default_library_prefix() {
        assert_eq!(
            split_item_identifier("default:bin-1x1"),
            ("default", "bin-1x1")
        );
    }

    #[test]
    fn test_unprefixed_identifier_falls_back_to_default_library() {
        assert_eq!(
            split_item_identifier("simple-bin"),
            (DEFAULT_LIBRARY_ID, "simple-bin")
        );
    }

    #[test]
    fn test_split_uses_first_separator() {
        assert_eq!(split_item_identifier("a:b:c"), ("a", "b:c"));
    }

    #[test]
    fn test_join_round_trip() {
        let joined = join_item_identifier("custom-lib", "special-3x2");
        assert_eq!(joined, "custom-lib:special-3x2");
        assert_eq!(split_item_identifier(&joined), ("custom-lib", "special-3x2"));
    }
}
