//! Page number strip

/// One slot in the page strip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Page(u32),
    /// Skipped range, shown as `...`
    Gap,
}

const MAX_VISIBLE: u32 = 5;

/// Page numbers to offer around `current`
///
/// Up to five consecutive pages starting two before `current`, plus the
/// first and last page with a gap marker where pages are skipped. Empty
/// when there is at most one page.
pub fn visible_pages(current: u32, total_pages: u32) -> Vec<PageItem> {
    if total_pages <= 1 {
        return Vec::new();
    }
    if total_pages <= MAX_VISIBLE {
        return (1..=total_pages).map(PageItem::Page).collect();
    }

    let start = current.saturating_sub(2).max(1);
    let end = (start + MAX_VISIBLE - 1).min(total_pages);
    let mut items = Vec::new();

    if start > 1 {
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Gap);
        }
    }

    items.extend((start..=end).map(PageItem::Page));

    if end < total_pages {
        if end < total_pages - 1 {
            items.push(PageItem::Gap);
        }
        items.push(PageItem::Page(total_pages));
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use PageItem::{Gap, Page};

    #[test]
    fn test_single_page_has_no_strip() {
        assert!(visible_pages(1, 0).is_empty());
        assert!(visible_pages(1, 1).is_empty());
    }

    #[test]
    fn test_short_range_lists_every_page() {
        assert_eq!(
            visible_pages(2, 4),
            vec![Page(1), Page(2), Page(3), Page(4)]
        );
    }

    #[test]
    fn test_window_at_start() {
        assert_eq!(
            visible_pages(1, 10),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Gap, Page(10)]
        );
    }

    #[test]
    fn test_window_in_the_middle() {
        assert_eq!(
            visible_pages(6, 20),
            vec![Page(1), Gap, Page(4), Page(5), Page(6), Page(7), Page(8), Gap, Page(20)]
        );
    }

    #[test]
    fn test_no_gap_next_to_first_or_last() {
        assert_eq!(
            visible_pages(4, 7),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Page(7)]
        );
    }

    #[test]
    fn test_window_near_end_is_clipped() {
        assert_eq!(
            visible_pages(10, 10),
            vec![Page(1), Gap, Page(8), Page(9), Page(10)]
        );
    }
}
