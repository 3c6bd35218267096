//! Pagination utilities
//!
//! Computes the page window the remote service reports alongside each page
//! of songs.

use crate::models::PaginationInfo;

/// Page size used when a request omits `limit`
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination metadata plus the slice offset into the full collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Metadata returned to the client
    pub info: PaginationInfo,
    /// Index of the first item on this page
    pub offset: usize,
}

/// Calculate pagination metadata from the collection size and requested window
///
/// Pages are not clamped: a page past the end yields an empty slice with
/// `has_next = false`. `page` and `limit` below 1 are treated as 1.
///
/// # Examples
/// ```
/// use songlib_common::pagination::calculate_pagination;
///
/// // 50 songs, 10 per page = 5 pages
/// let p = calculate_pagination(50, 2, 10);
/// assert_eq!(p.info.total_pages, 5);
/// assert_eq!(p.offset, 10);
/// assert!(p.info.has_next && p.info.has_prev);
/// ```
pub fn calculate_pagination(total: u32, page: u32, limit: u32) -> Pagination {
    let page = page.max(1);
    let limit = limit.max(1);
    let total_pages = total.div_ceil(limit);
    let offset = (page as usize - 1) * limit as usize;

    Pagination {
        info: PaginationInfo {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        },
        offset,
    }
}
