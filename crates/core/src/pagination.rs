//! Offset/limit pagination shared by every list endpoint.
//!
//! Clients address pages with a zero-based `page` index and a `size`; the
//! repository layer only ever sees the derived `LIMIT` / `OFFSET` pair.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Upper bound on the page size a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Clamp a user-provided page size to `1..=max`, falling back to `default`.
pub fn clamp_page_size(size: Option<i64>, default: i64, max: i64) -> i64 {
    size.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided page index to non-negative.
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(0).max(0)
}

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub size: i64,
}

impl PageRequest {
    /// Build a window from raw query values, applying the default clamps.
    pub fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self {
            page: clamp_page(page),
            size: clamp_page_size(size, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        }
    }

    pub fn limit(&self) -> i64 {
        self.size
    }

    /// Row offset of the first item. Saturates instead of overflowing on
    /// absurd page indexes.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub page: i64,
    pub size: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: i64, request: PageRequest) -> Self {
        let total_elements = total_elements.max(0);
        let total_pages = (total_elements + request.size - 1) / request.size;
        Self {
            content,
            total_elements,
            total_pages,
            page: request.page,
            size: request.size,
        }
    }

    /// Convert every item while keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            page: self.page,
            size: self.size,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
