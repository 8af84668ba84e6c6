//! This module defines the common functionality for paging data.

use crate::{Error, params::parse_positive};

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of rows per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 1,
            default_page_size: 10,
        }
    }
}

/// Applies limit/offset paging to a filtered query and derives the page
/// count from a row count.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Paginator {
    page: u64,
    per_page: u64,
}

impl Paginator {
    /// Build a paginator from the raw `page` and `perPage` request values.
    ///
    /// # Errors
    /// Returns [Error::InvalidRequest] if either value is present but not a
    /// positive integer.
    pub fn new(
        page: Option<&str>,
        per_page: Option<&str>,
        config: &PaginationConfig,
    ) -> Result<Self, Error> {
        Ok(Self {
            page: parse_positive("page", page, config.default_page)?,
            per_page: parse_positive("perPage", per_page, config.default_page_size)?,
        })
    }

    /// The page requested by the client.
    pub fn page(&self) -> u64 {
        self.page
    }

    /// The maximum number of rows on a page.
    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// The number of pages needed to show `total` rows.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page)
    }

    /// The offset of the first row on the requested page.
    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.per_page
    }
}
