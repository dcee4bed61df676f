//! Offset/limit pagination for article listings
//!
//! The arithmetic here is range-tolerant: `paginate` accepts any page number and
//! simply reports what that page would look like. Whether a page actually exists
//! is a caller decision, made through [`parse_page_param`] and
//! [`ensure_page_exists`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum number of page links shown by pagination controls
pub const PAGE_WINDOW_SIZE: u64 = 5;

/// Caller-supplied page request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    /// Number of items per page
    pub page_size: u64,
}

impl PageRequest {
    /// Create a new page request
    pub fn new(page: u64, page_size: u64) -> Self {
        Self { page, page_size }
    }

    /// Number of leading items the data source must skip for this page
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// Page descriptor produced by [`paginate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// The requested page (not clamped)
    pub current_page: u64,
    /// Total number of pages, 0 when there are no items
    pub total_pages: u64,
    /// Total number of items reported by the data source
    pub total_items: u64,
    /// Whether a page follows the current one
    pub has_next_page: bool,
    /// Whether a page precedes the current one
    pub has_previous_page: bool,
    /// Page size used for the computation
    pub items_per_page: u64,
    /// Offset to request from the data source
    pub offset: u64,
}

impl PageInfo {
    /// Attach the fetched items to this descriptor
    pub fn with_items<T>(self, items: Vec<T>) -> PageResult<T> {
        PageResult { items, info: self }
    }
}

/// A page of items together with its descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    /// Items of the current page, in data-source order
    pub items: Vec<T>,
    /// Pagination descriptor
    #[serde(flatten)]
    pub info: PageInfo,
}

/// Compute the page descriptor for `page` of a collection of `total_items`
///
/// # Parameters
/// * `page` - 1-based page number; not validated here
/// * `page_size` - Items per page; values below 1 are treated as 1
/// * `total_items` - Total size of the collection
///
/// # Returns
/// * `PageInfo` - Offset, page count and neighbour flags
pub fn paginate(page: u64, page_size: u64, total_items: u64) -> PageInfo {
    let page_size = page_size.max(1);
    let total_pages = total_items.div_ceil(page_size);

    PageInfo {
        current_page: page,
        total_pages,
        total_items,
        has_next_page: page < total_pages,
        has_previous_page: page > 1,
        items_per_page: page_size,
        offset: PageRequest::new(page, page_size).offset(),
    }
}

/// Select the contiguous run of page numbers shown by pagination controls
///
/// At most [`PAGE_WINDOW_SIZE`] pages are returned, in increasing order. The
/// window starts at page 1 near the beginning, ends at the last page near the
/// end, and is centred on `current_page` otherwise.
pub fn page_window(current_page: u64, total_pages: u64) -> Vec<u64> {
    if total_pages <= PAGE_WINDOW_SIZE {
        return (1..=total_pages).collect();
    }

    let half = PAGE_WINDOW_SIZE / 2;
    let start = if current_page <= half + 1 {
        1
    } else if current_page >= total_pages - half {
        total_pages - PAGE_WINDOW_SIZE + 1
    } else {
        current_page - half
    };

    (start..start + PAGE_WINDOW_SIZE).collect()
}

/// Page numbers to pre-generate as standalone listing pages
///
/// Page 1 is served by the listing root, so generation starts at page 2.
pub fn static_page_params(total_pages: u64) -> Vec<u64> {
    (2..=total_pages).collect()
}

/// Errors raised by caller-side page policy
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// The requested page does not exist
    #[error("page not found: {0}")]
    NotFound(String),
}

/// Parse a page number taken from a URL segment
///
/// # Parameters
/// * `raw` - The raw path segment
/// * `min_page` - Smallest page number this route serves
///
/// # Returns
/// * `Ok(u64)` - The page number
/// * `Err(PageError::NotFound)` - Not an integer, or below `min_page`
pub fn parse_page_param(raw: &str, min_page: u64) -> Result<u64, PageError> {
    match raw.trim().parse::<u64>() {
        Ok(page) if page >= min_page.max(1) => Ok(page),
        _ => Err(PageError::NotFound(raw.to_string())),
    }
}

/// Reject pages beyond the end of the collection
pub fn ensure_page_exists(page: u64, info: &PageInfo) -> Result<(), PageError> {
    if page == 0 || page > info.total_pages {
        return Err(PageError::NotFound(page.to_string()));
    }
    Ok(())
}

/// Site-relative path of a listing page
///
/// Page 1 lives at the listing root (`/blog` or `/blog/{section}`); later pages
/// under `/page/{n}`.
pub fn page_path(section: Option<&str>, page: u64) -> String {
    let root = match section {
        Some(section) => format!("/blog/{}", section),
        None => "/blog".to_string(),
    };

    if page <= 1 {
        root
    } else {
        format!("{}/page/{}", root, page)
    }
}

/// Absolute URLs of the neighbouring pages, for `<link rel="prev|next">`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    /// Previous page URL, if any
    pub prev: Option<String>,
    /// Next page URL, if any
    pub next: Option<String>,
}

/// Build the prev/next links for a listing page
pub fn page_links(info: &PageInfo, base_url: &str, section: Option<&str>) -> PageLinks {
    let base_url = base_url.trim_end_matches('/');

    PageLinks {
        prev: info.has_previous_page.then(|| {
            format!(
                "{}{}",
                base_url,
                page_path(section, info.current_page - 1)
            )
        }),
        next: info.has_next_page.then(|| {
            format!(
                "{}{}",
                base_url,
                page_path(section, info.current_page + 1)
            )
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_middle_page() {
        let info = paginate(2, 6, 13);
        assert_eq!(info.offset, 6);
        assert_eq!(info.total_pages, 3);
        assert!(info.has_next_page);
        assert!(info.has_previous_page);
        assert_eq!(info.items_per_page, 6);
        assert_eq!(info.total_items, 13);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let info = paginate(1, 6, 0);
        assert_eq!(info.total_pages, 0);
        assert_eq!(info.offset, 0);
        assert!(!info.has_next_page);
        assert!(!info.has_previous_page);
    }

    #[test]
    fn test_paginate_first_page_has_no_previous() {
        for total in [0, 1, 5, 6, 7, 100] {
            for size in [1, 3, 6, 50] {
                assert!(!paginate(1, size, total).has_previous_page);
            }
        }
    }

    #[test]
    fn test_paginate_total_pages_is_ceiling() {
        assert_eq!(paginate(1, 6, 6).total_pages, 1);
        assert_eq!(paginate(1, 6, 7).total_pages, 2);
        assert_eq!(paginate(1, 1, 9).total_pages, 9);
        assert_eq!(paginate(1, 10, 1).total_pages, 1);
    }

    #[test]
    fn test_paginate_past_the_end_is_tolerated() {
        let info = paginate(9, 6, 13);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.offset, 48);
        assert!(!info.has_next_page);
        assert!(info.has_previous_page);
    }

    #[test]
    fn test_paginate_is_deterministic() {
        assert_eq!(paginate(3, 4, 22), paginate(3, 4, 22));
    }

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(1, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(3, 10), vec![1, 2, 3, 4, 5]);
        assert_eq!(page_window(4, 10), vec![2, 3, 4, 5, 6]);
        assert_eq!(page_window(5, 10), vec![3, 4, 5, 6, 7]);
        assert_eq!(page_window(8, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(10, 10), vec![6, 7, 8, 9, 10]);
        assert_eq!(page_window(2, 3), vec![1, 2, 3]);
        assert_eq!(page_window(1, 0), Vec::<u64>::new());
    }

    #[test]
    fn test_page_window_contains_current_page() {
        for total in 1..=12 {
            for current in 1..=total {
                let window = page_window(current, total);
                assert!(window.len() as u64 <= PAGE_WINDOW_SIZE);
                assert!(window.contains(&current));
                assert!(window.windows(2).all(|w| w[1] == w[0] + 1));
            }
        }
    }

    #[test]
    fn test_parse_page_param() {
        assert_eq!(parse_page_param("2", 2), Ok(2));
        assert_eq!(parse_page_param(" 7 ", 1), Ok(7));
        assert!(parse_page_param("1", 2).is_err());
        assert!(parse_page_param("0", 0).is_err());
        assert!(parse_page_param("abc", 1).is_err());
        assert!(parse_page_param("-3", 1).is_err());
        assert!(parse_page_param("2.5", 1).is_err());
    }

    #[test]
    fn test_ensure_page_exists() {
        let info = paginate(4, 6, 13);
        assert!(ensure_page_exists(3, &info).is_ok());
        assert_eq!(
            ensure_page_exists(4, &info),
            Err(PageError::NotFound("4".to_string()))
        );
        assert!(ensure_page_exists(1, &paginate(1, 6, 0)).is_err());
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path(None, 1), "/blog");
        assert_eq!(page_path(None, 3), "/blog/page/3");
        assert_eq!(page_path(Some("teknologi"), 1), "/blog/teknologi");
        assert_eq!(page_path(Some("teknologi"), 2), "/blog/teknologi/page/2");
    }

    #[test]
    fn test_page_links() {
        let links = page_links(&paginate(2, 6, 13), "https://example.com/", None);
        assert_eq!(links.prev.as_deref(), Some("https://example.com/blog"));
        assert_eq!(
            links.next.as_deref(),
            Some("https://example.com/blog/page/3")
        );

        let links = page_links(&paginate(3, 6, 13), "https://example.com", Some("komunikasi"));
        assert_eq!(
            links.prev.as_deref(),
            Some("https://example.com/blog/komunikasi/page/2")
        );
        assert_eq!(links.next, None);
    }

    #[test]
    fn test_static_page_params() {
        assert_eq!(static_page_params(4), vec![2, 3, 4]);
        assert!(static_page_params(1).is_empty());
        assert!(static_page_params(0).is_empty());
    }

    #[test]
    fn test_page_result_serializes_flat() {
        let result = paginate(1, 2, 3).with_items(vec!["a", "b"]);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["items"][1], "b");
        assert_eq!(json["totalPages"], 2);
        assert_eq!(json["hasNextPage"], true);
    }
}
