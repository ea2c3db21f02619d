//! Shared query parameter types for API handlers.

use rental_core::pagination::PageRequest;
use rental_core::params::empty_as_none;
use serde::Deserialize;

/// Paging parameters (`?page=&size=`), accepted by every list endpoint.
///
/// `page` is zero-based. Values are clamped by [`PageRequest::new`].
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<i64>,
}

impl PaginationParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.size)
    }
}
