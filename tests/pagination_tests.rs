//! Tests for the pagination cursor calculator
//!
//! # Test Coverage
//!
//! - Previous/next presence and absence at the collection edges
//! - Clamping of past-the-end cursors back onto the real last page
//! - Clamp-to-start for emptied collections
//! - The caller-checked validity predicate
//! - Bounds property: previous(next(cursor)) stays inside [1, last_page]

#![allow(clippy::unwrap_used, clippy::expect_used)]

use apiforge::pagination::Page;

#[test]
fn test_first_page_previous_always_absent() {
    for total in [None, Some(0), Some(1), Some(100)] {
        assert_eq!(Page::new(1, 3).previous(total), None);
    }
}

#[test]
fn test_previous_clamps_to_start_for_emptied_collection() {
    assert_eq!(Page::new(5, 3).previous(Some(0)), Some(Page::new(1, 3)));
}

#[test]
fn test_previous_clamps_onto_last_real_page() {
    // total 7, page_size 3 => pages 1..=3
    assert_eq!(Page::new(10, 3).previous(Some(7)), Some(Page::new(3, 3)));
    // in-range cursor decrements normally
    assert_eq!(Page::new(3, 3).previous(Some(7)), Some(Page::new(2, 3)));
}

#[test]
fn test_previous_unknown_total_decrements_unclamped() {
    assert_eq!(Page::new(10, 3).previous(None), Some(Page::new(9, 3)));
}

#[test]
fn test_next_present_until_total_consumed() {
    assert_eq!(Page::new(1, 3).next(Some(5)), Some(Page::new(2, 3)));
    // 2*3 = 6 >= 5, nothing beyond this page
    assert_eq!(Page::new(2, 3).next(Some(5)), None);
    assert_eq!(Page::new(2, 3).next(None), Some(Page::new(3, 3)));
}

#[test]
fn test_wire_sized_cursor_does_not_overflow() {
    // page and page_size come straight off the query string, so the
    // arithmetic has to survive any positive i64 the coercion lets through.
    let cursor = Page::new(i64::MAX / 2, 3);
    assert!(cursor.is_valid());
    assert_eq!(cursor.next(Some(7)), None);
    assert_eq!(cursor.offset(), i64::MAX);
    assert_eq!(cursor.previous(Some(7)), Some(Page::new(3, 3)));

    let wide = Page::new(3, i64::MAX);
    assert_eq!(wide.next(Some(7)), None);
    assert_eq!(wide.previous(Some(7)), Some(Page::new(1, i64::MAX)));
}

#[test]
fn test_validity_flags_non_positive_fields() {
    assert!(Page::new(1, 1).is_valid());
    assert!(!Page::new(0, 1).is_valid());
    assert!(!Page::new(1, -1).is_valid());
}

#[test]
fn test_round_trip_stays_in_bounds() {
    for page in 1..=12i64 {
        for page_size in 1..=5i64 {
            for total in 0..=30i64 {
                let cursor = Page::new(page, page_size);
                let last_page = if total == 0 {
                    1
                } else {
                    (total + page_size - 1) / page_size
                };
                if let Some(next) = cursor.next(Some(total)) {
                    if let Some(back) = next.previous(Some(total)) {
                        assert!(back.page >= 1, "page {page} size {page_size} total {total}");
                        assert!(
                            back.page <= last_page,
                            "page {page} size {page_size} total {total}"
                        );
                    }
                }
            }
        }
    }
}
