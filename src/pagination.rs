//! Pagination cursor arithmetic for list views.

use serde::{Deserialize, Serialize};

/// A 1-based page cursor.
///
/// Validity (`page` and `page_size` both positive) is a caller-checked
/// predicate: the cursor never raises on its own, callers surface an invalid
/// cursor as a bad-request condition before touching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
}

impl Page {
    pub fn new(page: i64, page_size: i64) -> Self {
        Page { page, page_size }
    }

    pub fn is_valid(&self) -> bool {
        self.page > 0 && self.page_size > 0
    }

    /// Items skipped before this page begins.
    ///
    /// Saturates for cursors so large the product would overflow; such a
    /// cursor is past the end of any real collection and the saturated
    /// offset keeps the store slice empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// The previous cursor, if any.
    ///
    /// Page 1 has no previous page. With a known total count the previous
    /// page is clamped onto the real last page, so a cursor that wandered
    /// past the end of a shrunken collection steps back onto it; an emptied
    /// collection clamps to page 1. With an unknown total it is simply
    /// `page - 1`.
    pub fn previous(&self, total_count: Option<i64>) -> Option<Page> {
        if self.page <= 1 {
            return None;
        }
        let previous_page = match total_count {
            None => self.page - 1,
            Some(0) => 1,
            Some(total) => {
                // total >= 1 here; this ceiling form cannot overflow on a
                // huge page_size the way `total + page_size - 1` would.
                let last_page = (total - 1) / self.page_size + 1;
                last_page.min(self.page - 1)
            }
        };
        Some(Page::new(previous_page, self.page_size))
    }

    /// The next cursor, if any.
    ///
    /// Present when the total is unknown, or when items seen through this
    /// page's end are fewer than the total. A cursor so large that the
    /// seen count overflows is past the end of any real collection and has
    /// no next page.
    pub fn next(&self, total_count: Option<i64>) -> Option<Page> {
        match total_count {
            None => Some(Page::new(self.page.saturating_add(1), self.page_size)),
            Some(total) => match self.page.checked_mul(self.page_size) {
                Some(seen) if total > seen => Some(Page::new(self.page + 1, self.page_size)),
                _ => None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validity_is_caller_checked() {
        assert!(Page::new(1, 3).is_valid());
        assert!(!Page::new(0, 3).is_valid());
        assert!(!Page::new(1, 0).is_valid());
        assert!(!Page::new(-2, -3).is_valid());
    }

    #[test]
    fn test_first_page_has_no_previous() {
        assert_eq!(Page::new(1, 3).previous(None), None);
        assert_eq!(Page::new(1, 3).previous(Some(0)), None);
        assert_eq!(Page::new(1, 3).previous(Some(100)), None);
    }

    #[test]
    fn test_previous_clamps_to_start_when_emptied() {
        assert_eq!(Page::new(5, 3).previous(Some(0)), Some(Page::new(1, 3)));
    }

    #[test]
    fn test_previous_clamps_past_the_end_cursor() {
        // 7 items, page_size 3 => last page is 3; a cursor at page 9 steps
        // back onto page 3, not page 8.
        assert_eq!(Page::new(9, 3).previous(Some(7)), Some(Page::new(3, 3)));
    }

    #[test]
    fn test_previous_without_total_does_not_clamp() {
        assert_eq!(Page::new(9, 3).previous(None), Some(Page::new(8, 3)));
    }

    #[test]
    fn test_next_bounded_by_total() {
        assert_eq!(Page::new(1, 3).next(Some(5)), Some(Page::new(2, 3)));
        assert_eq!(Page::new(2, 3).next(Some(5)), None);
        assert_eq!(Page::new(2, 3).next(Some(6)), None);
        assert_eq!(Page::new(2, 3).next(Some(7)), Some(Page::new(3, 3)));
    }

    #[test]
    fn test_next_unknown_total_always_advances() {
        assert_eq!(Page::new(4, 10).next(None), Some(Page::new(5, 10)));
    }

    #[test]
    fn test_offset() {
        assert_eq!(Page::new(1, 3).offset(), 0);
        assert_eq!(Page::new(3, 10).offset(), 20);
    }

    #[test]
    fn test_huge_cursor_saturates_instead_of_overflowing() {
        // A valid-looking cursor far past any real collection must not
        // wrap; it simply has no next page and an end-of-range offset.
        let cursor = Page::new(i64::MAX / 2, 3);
        assert!(cursor.is_valid());
        assert_eq!(cursor.next(Some(5)), None);
        assert_eq!(cursor.offset(), i64::MAX);
    }

    #[test]
    fn test_huge_page_size_previous_does_not_overflow() {
        let cursor = Page::new(2, i64::MAX);
        assert_eq!(cursor.previous(Some(5)), Some(Page::new(1, i64::MAX)));
    }
}
