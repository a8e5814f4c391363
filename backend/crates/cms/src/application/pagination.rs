//! Listing pagination
//!
//! `page` and `limit` query values; `all=true` disables paging.

use serde::{Deserialize, Serialize};

use crate::domain::repository::Window;

/// Raw query string values. Unparsable numbers fall back to the defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub all: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    All,
    Page { page: i64, limit: i64 },
}

impl PageQuery {
    pub fn resolve(&self, default_limit: i64) -> PageRequest {
        if self.all.as_deref() == Some("true") {
            return PageRequest::All;
        }
        PageRequest::Page {
            page: positive(self.page.as_deref()).unwrap_or(1),
            limit: positive(self.limit.as_deref()).unwrap_or(default_limit.max(1)),
        }
    }

    /// Like [`resolve`](Self::resolve), ignoring `all`
    pub fn resolve_paged(&self, default_limit: i64) -> (i64, i64) {
        let paged = PageQuery {
            all: None,
            ..self.clone()
        };
        match paged.resolve(default_limit) {
            PageRequest::Page { page, limit } => (page, limit),
            PageRequest::All => (1, default_limit.max(1)),
        }
    }
}

impl PageRequest {
    pub fn window(&self) -> Option<Window> {
        match *self {
            PageRequest::All => None,
            PageRequest::Page { page, limit } => Some(window(page, limit)),
        }
    }
}

pub fn window(page: i64, limit: i64) -> Window {
    Window {
        offset: (page - 1).saturating_mul(limit),
        limit,
    }
}

fn positive(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok().filter(|n| *n > 0)
}

/// Pagination block of a paged listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let total_pages = total_pages(total, limit);
        Self {
            current_page: page,
            total_pages,
            total_items: total,
            items_per_page: limit,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 0;
    }
    total / limit + i64::from(total % limit != 0)
}

/// Items plus the paging facts of one listing
#[derive(Debug, Clone)]
pub struct Listing<T> {
    pub items: Vec<T>,
    /// `None` for `all=true`
    pub pagination: Option<Pagination>,
    pub total_items: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<&str>, limit: Option<&str>, all: Option<&str>) -> PageQuery {
        PageQuery {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
            all: all.map(str::to_string),
        }
    }

    #[test]
    fn test_defaults_and_fallbacks() {
        assert_eq!(query(None, None, None).resolve(6), PageRequest::Page { page: 1, limit: 6 });
        assert_eq!(
            query(Some("abc"), Some("-3"), None).resolve(6),
            PageRequest::Page { page: 1, limit: 6 }
        );
        assert_eq!(
            query(Some("3"), Some("10"), Some("false")).resolve(6),
            PageRequest::Page { page: 3, limit: 10 }
        );
        assert_eq!(query(Some("3"), None, Some("true")).resolve(6), PageRequest::All);
    }

    #[test]
    fn test_window() {
        assert_eq!(PageRequest::All.window(), None);
        assert_eq!(
            PageRequest::Page { page: 3, limit: 6 }.window(),
            Some(Window { offset: 12, limit: 6 })
        );
    }

    #[test]
    fn test_pagination_block() {
        let p = Pagination::new(1, 6, 13);
        assert_eq!(p.total_pages, 3);
        assert!(p.has_next);
        assert!(!p.has_prev);

        let p = Pagination::new(3, 6, 13);
        assert!(!p.has_next);
        assert!(p.has_prev);

        let p = Pagination::new(1, 6, 0);
        assert_eq!(p.total_pages, 0);
        assert!(!p.has_next);
    }

    #[test]
    fn test_huge_limit_is_one_page() {
        let limit = positive(Some("9223372036854775807")).unwrap();
        assert_eq!(total_pages(2, limit), 1);
        assert_eq!(total_pages(i64::MAX, i64::MAX), 1);
        assert_eq!(total_pages(i64::MAX, 1), i64::MAX);

        let p = Pagination::new(1, limit, 2);
        assert_eq!(p.total_pages, 1);
        assert!(!p.has_next);
        assert_eq!(window(2, limit).offset, i64::MAX);
    }

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_value(Pagination::new(2, 5, 11)).unwrap();
        assert_eq!(json["currentPage"], 2);
        assert_eq!(json["totalPages"], 3);
        assert_eq!(json["itemsPerPage"], 5);
        assert_eq!(json["hasPrev"], true);
    }
}
