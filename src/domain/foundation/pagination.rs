//! Pagination value objects for list queries.

use serde::Serialize;

/// Requested page window. Page numbers are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;

    /// Builds a page request, substituting defaults for missing or zero values.
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(Self::DEFAULT_PAGE),
            limit: limit.filter(|l| *l > 0).unwrap_or(Self::DEFAULT_LIMIT),
        }
    }

    /// Number of rows to skip for this window.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl PageInfo {
    /// Computes metadata for a result window; `total_pages = ceil(total / limit)`.
    pub fn new(request: PageRequest, total: u64) -> Self {
        let limit = u64::from(request.limit);
        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages: (total + limit - 1) / limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn defaults_apply_when_params_missing() {
        let req = PageRequest::new(None, None);
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn zero_values_fall_back_to_defaults() {
        let req = PageRequest::new(Some(0), Some(0));
        assert_eq!(req.page, 1);
        assert_eq!(req.limit, 10);
    }

    #[test]
    fn offset_skips_previous_pages() {
        let req = PageRequest::new(Some(3), Some(10));
        assert_eq!(req.offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        let info = PageInfo::new(PageRequest::new(Some(2), Some(10)), 25);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total, 25);
        assert_eq!(info.page, 2);
    }

    #[test]
    fn total_pages_is_zero_for_empty_result() {
        let info = PageInfo::new(PageRequest::default(), 0);
        assert_eq!(info.total_pages, 0);
    }

    #[test]
    fn page_info_serializes_camel_case() {
        let info = PageInfo::new(PageRequest::default(), 1);
        let json = serde_json::to_value(info).unwrap();
        assert!(json.get("totalPages").is_some());
    }

    proptest! {
        #[test]
        fn total_pages_covers_all_items(total in 0u64..10_000, limit in 1u32..100) {
            let info = PageInfo::new(PageRequest::new(Some(1), Some(limit)), total);
            // Enough pages to hold every item, never a whole spare page.
            prop_assert!(info.total_pages * u64::from(limit) >= total);
            prop_assert!(info.total_pages.saturating_sub(1) * u64::from(limit) < total || total == 0);
        }
    }
}
