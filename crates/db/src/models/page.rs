//! Keyset pagination page wrapper.

/// One page of a keyset-paginated listing.
///
/// Produced from a `limit + 1` probe query: the extra row only signals that
/// more data exists and is discarded before the page is returned.
#[derive(Debug, Clone)]
pub struct KeysetPage<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

impl<T> KeysetPage<T> {
    /// Build a page from rows fetched with `LIMIT limit + 1`.
    pub fn from_probe(mut rows: Vec<T>, limit: i64) -> Self {
        let has_more = rows.len() as i64 > limit;
        if has_more {
            rows.truncate(limit as usize);
        }
        Self {
            items: rows,
            has_more,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_under_limit() {
        let page = KeysetPage::from_probe(vec![1, 2], 3);
        assert_eq!(page.items, vec![1, 2]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_probe_at_limit() {
        let page = KeysetPage::from_probe(vec![1, 2, 3], 3);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(!page.has_more);
    }

    #[test]
    fn test_probe_discards_extra_row() {
        let page = KeysetPage::from_probe(vec![1, 2, 3, 4], 3);
        assert_eq!(page.items, vec![1, 2, 3]);
        assert!(page.has_more);
    }
}
