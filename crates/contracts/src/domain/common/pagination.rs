use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Page sizes offered by every table.
pub const LIMIT_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// Server-reported pagination, normalized from whatever envelope the
/// endpoint uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

impl Pagination {
    pub fn total_pages(&self) -> u32 {
        total_pages(self.total, self.limit)
    }
}

/// `ceil(total / limit)`, never less than one.
pub fn total_pages(total: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 1;
    }
    let pages = total.div_ceil(u64::from(limit));
    pages.clamp(1, u64::from(u32::MAX)) as u32
}

/// Query parameters a list page sends with every fetch.
///
/// `scope` addresses a nested collection (variants of one product) and is
/// part of the path, not of the query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub filters: BTreeMap<String, String>,
    pub scope: Option<String>,
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: String::new(),
            filters: BTreeMap::new(),
            scope: None,
        }
    }

    pub fn scoped(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            ..Self::new(1, LIMIT_OPTIONS[LIMIT_OPTIONS.len() - 1])
        }
    }

    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Changing the limit always restarts from the first page.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self.page = 1;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self.page = 1;
        self
    }

    /// Sets (or clears, for an empty value) a resource-specific filter.
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();
        if value.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, value);
        }
        self.page = 1;
        self
    }

    /// Flat parameter map sent as the query string. Empty values are dropped.
    pub fn params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        params.insert("page".to_string(), self.page.to_string());
        params.insert("limit".to_string(), self.limit.to_string());
        if !self.search.trim().is_empty() {
            params.insert("search".to_string(), self.search.clone());
        }
        for (key, value) in &self.filters {
            if !value.is_empty() {
                params.insert(key.clone(), value.clone());
            }
        }
        params
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::new(1, 50)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_has_floor_of_one() {
        assert_eq!(total_pages(0, 20), 1);
        assert_eq!(total_pages(15, 20), 1);
        assert_eq!(total_pages(20, 20), 1);
        assert_eq!(total_pages(21, 20), 2);
        assert_eq!(total_pages(1000, 50), 20);
        assert_eq!(total_pages(5, 0), 1);
    }

    #[test]
    fn limit_change_resets_page() {
        let q = ListQuery::new(3, 20).with_limit(50);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 50);
    }

    #[test]
    fn params_skip_empty_values() {
        let q = ListQuery::new(2, 20)
            .with_filter("shape", "RD")
            .with_filter("cut", "")
            .with_page(2);
        let params = q.params();
        assert_eq!(params.get("page").map(String::as_str), Some("2"));
        assert_eq!(params.get("limit").map(String::as_str), Some("20"));
        assert_eq!(params.get("shape").map(String::as_str), Some("RD"));
        assert!(!params.contains_key("cut"));
        assert!(!params.contains_key("search"));
    }

    #[test]
    fn clearing_a_filter_removes_it() {
        let q = ListQuery::default()
            .with_filter("color", "D")
            .with_filter("color", "");
        assert!(q.filters.is_empty());
    }

    #[test]
    fn page_and_limit_are_never_zero() {
        let q = ListQuery::new(0, 0);
        assert_eq!((q.page, q.limit), (1, 1));
    }
}
