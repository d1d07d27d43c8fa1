// core/src/query/pagination.rs

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
  page: u64,
  limit: u64,
}

impl Default for PageRequest {
  fn default() -> Self {
    Self {
      page: DEFAULT_PAGE,
      limit: DEFAULT_LIMIT,
    }
  }
}

impl PageRequest {
  /// `page >= 1`, `limit >= 1`, and both the limit and the resulting offset
  /// must fit a signed 64-bit integer (what SQL `LIMIT` / `OFFSET` accept).
  pub fn new(page: u64, limit: u64) -> CatalogResult<Self> {
    if page == 0 {
      return Err(CatalogError::validation("page must be a positive integer"));
    }
    if limit == 0 || limit > i64::MAX as u64 {
      return Err(CatalogError::validation("limit must be a positive integer"));
    }
    let skip = (page - 1).checked_mul(limit);
    if !matches!(skip, Some(s) if s <= i64::MAX as u64) {
      return Err(CatalogError::validation("page is out of range"));
    }
    Ok(Self { page, limit })
  }

  pub fn page(&self) -> u64 {
    self.page
  }

  pub fn limit(&self) -> u64 {
    self.limit
  }

  /// The `(skip, limit)` pair handed to the store.
  pub fn window(&self) -> PageWindow {
    PageWindow {
      skip: (self.page - 1) * self.limit,
      limit: self.limit,
    }
  }

  /// Metadata for a result set of `total_items` filter matches.
  pub fn meta(&self, total_items: u64) -> PageMeta {
    PageMeta {
      total_items,
      current_page: self.page,
      total_pages: total_items.div_ceil(self.limit),
      items_per_page: self.limit,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
  pub skip: u64,
  pub limit: u64,
}

impl PageWindow {
  /// Applies the window to an already ordered sequence.
  pub fn slice<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
    let skip = usize::try_from(self.skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
    items.into_iter().skip(skip).take(limit).collect()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
  pub total_items: u64,
  pub current_page: u64,
  pub total_pages: u64,
  pub items_per_page: u64,
}
