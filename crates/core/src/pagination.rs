//! List query parameters and page metadata shared by every list endpoint.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Page size used when none is given.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size a list query will request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Clamp a user-provided page size to valid bounds.
pub fn clamp_page_size(size: Option<u32>) -> u32 {
    size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
}

/// Clamp a user-provided 1-based page index.
pub fn clamp_page_index(index: Option<u32>) -> u32 {
    index.unwrap_or(1).max(1)
}

/// `ceil(total_items / page_size)`; zero when the page size is zero.
pub fn total_pages(total_items: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = total_items.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Search and pagination parameters for a list request.
///
/// Serialized as `pageIndex`, `pageSize`, `includeDeleted`, `search`, plus
/// any entity-specific filter fields (`areaId`, `museumId`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-based page index.
    pub page_index: u32,
    pub page_size: u32,
    pub include_deleted: bool,
    pub search: Option<String>,
    pub filters: BTreeMap<String, String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page_index: 1,
            page_size: DEFAULT_PAGE_SIZE,
            include_deleted: false,
            search: None,
            filters: BTreeMap::new(),
        }
    }
}

impl ListQuery {
    pub fn new(page_index: u32, page_size: u32) -> Self {
        Self {
            page_index: clamp_page_index(Some(page_index)),
            page_size: clamp_page_size(Some(page_size)),
            ..Self::default()
        }
    }

    pub fn page(mut self, page_index: u32) -> Self {
        self.page_index = clamp_page_index(Some(page_index));
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = clamp_page_size(Some(page_size));
        self
    }

    pub fn include_deleted(mut self, include: bool) -> Self {
        self.include_deleted = include;
        self
    }

    /// Free-text search; blank input clears it.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        let term = term.into();
        self.search = if term.trim().is_empty() {
            None
        } else {
            Some(term.trim().to_string())
        };
        self
    }

    pub fn filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    /// Query-string pairs in wire order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("pageIndex".to_string(), self.page_index.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
            ("includeDeleted".to_string(), self.include_deleted.to_string()),
        ];
        if let Some(term) = &self.search {
            pairs.push(("search".to_string(), term.clone()));
        }
        for (field, value) in &self.filters {
            pairs.push((field.clone(), value.clone()));
        }
        pairs
    }
}

/// Page metadata exposed alongside a list of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page_index: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
}

impl Pagination {
    /// Build metadata, deriving `total_pages` from the item count.
    pub fn new(page_index: u32, page_size: u32, total_items: u64) -> Self {
        Self {
            page_index,
            page_size,
            total_items,
            total_pages: total_pages(total_items, page_size),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page_index > 1
    }
}

/// One page of entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(flatten)]
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn empty(query: &ListQuery) -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::new(query.page_index, query.page_size, 0),
        }
    }

    /// Normalize a list payload against the query that produced it.
    ///
    /// Paged payloads keep the server's counts (falling back to the query
    /// for missing fields); bare arrays are paged locally. The returned
    /// item count never exceeds the requested page size, even when the
    /// server reports a larger one.
    pub fn from_payload(payload: PagePayload<T>, query: &ListQuery) -> Self {
        match payload {
            PagePayload::Paged(raw) => {
                let page_index = raw.page_index.filter(|p| *p > 0).unwrap_or(query.page_index);
                let page_size = raw
                    .page_size
                    .filter(|s| *s > 0)
                    .map_or(query.page_size, |s| s.min(query.page_size));
                let mut items = raw.items;
                let total_items = raw.total_items.unwrap_or(items.len() as u64);
                items.truncate(page_size as usize);
                Self {
                    items,
                    pagination: Pagination::new(page_index, page_size, total_items),
                }
            }
            PagePayload::Bare(all) => {
                let total_items = all.len() as u64;
                let start = (query.page_index.saturating_sub(1) as usize)
                    .saturating_mul(query.page_size as usize);
                let items = all
                    .into_iter()
                    .skip(start)
                    .take(query.page_size as usize)
                    .collect();
                Self {
                    items,
                    pagination: Pagination::new(query.page_index, query.page_size, total_items),
                }
            }
        }
    }
}

/// A list payload as the server sends it: either paged or a bare array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PagePayload<T> {
    Paged(RawPage<T>),
    Bare(Vec<T>),
}

/// Paged list body. Field aliases cover the spellings the API uses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage<T> {
    #[serde(alias = "data", alias = "records")]
    pub items: Vec<T>,
    #[serde(default, alias = "pageNumber", alias = "currentPage")]
    pub page_index: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
    #[serde(default, alias = "totalCount", alias = "totalRecords")]
    pub total_items: Option<u64>,
}
