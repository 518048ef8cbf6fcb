//! Paging parameters and envelope for list endpoints.

use serde::{Deserialize, Serialize};

/// `?page=&per_page=` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    const MAX_PER_PAGE: i64 = 50;
    const DEFAULT_PER_PAGE: i64 = 20;

    pub fn limit(&self) -> i64 {
        self.per_page
            .unwrap_or(Self::DEFAULT_PER_PAGE)
            .clamp(1, Self::MAX_PER_PAGE)
    }

    pub fn current_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.current_page() - 1) * self.limit()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        let per_page = pagination.limit();
        Self {
            items,
            total,
            page: pagination.current_page(),
            per_page,
            total_pages: (total.max(0) + per_page - 1) / per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 20);
        assert_eq!(p.offset(), 0);
        assert_eq!(p.current_page(), 1);
    }

    #[test]
    fn clamps_and_offsets() {
        let p = Pagination {
            page: Some(0),
            per_page: Some(500),
        };
        assert_eq!(p.limit(), 50);
        assert_eq!(p.current_page(), 1);

        let p = Pagination {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(p.offset(), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        let p = Pagination {
            page: Some(1),
            per_page: Some(10),
        };
        let result = PagedResult::new(vec![1, 2, 3], 25, &p);
        assert_eq!(result.total_pages, 3);
        assert_eq!(PagedResult::<i32>::new(vec![], 0, &p).total_pages, 0);
    }
}
