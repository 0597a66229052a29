use serde::Deserialize;

use crate::db::{FieldFilter, FindQuery, SortSpec};

/// Page number used when `page` is absent or malformed.
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when `perPage` is absent or malformed.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Raw query-string parameters of the movie listing routes.
///
/// Every parameter is optional and kept as a string: malformed numeric
/// values fall back to the documented defaults instead of failing
/// extraction with a client error.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub key: Option<String>,
    pub value: Option<String>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "perPage")]
    pub per_page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
    /// Zero-based index of the first document on this page,
    /// `(page - 1) * per_page`.
    pub offset: usize,
}

impl ListParams {
    pub fn pagination(&self) -> Pagination {
        let page = parse_positive(&self.page, DEFAULT_PAGE);
        let per_page = parse_positive(&self.per_page, DEFAULT_PER_PAGE);

        Pagination {
            page,
            per_page,
            // Saturating so absurd page numbers cannot overflow.
            offset: (page - 1).saturating_mul(per_page),
        }
    }

    /// Filter and sort specs for the store. A pair only takes effect when
    /// both of its parameters are present and non-empty; a malformed
    /// `direction` disables sorting.
    pub fn find_query(&self) -> FindQuery {
        let filter = match (non_empty(&self.key), non_empty(&self.value)) {
            (Some(field), Some(value)) => Some(FieldFilter {
                field: field.to_string(),
                value: value.to_string(),
            }),
            _ => None,
        };

        let direction = non_empty(&self.direction).and_then(|s| s.parse::<i64>().ok());
        let sort = match (non_empty(&self.sort), direction) {
            (Some(field), Some(direction)) => Some(SortSpec {
                field: field.to_string(),
                direction,
            }),
            _ => None,
        };

        FindQuery { filter, sort }
    }
}

fn non_empty(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|s| !s.is_empty())
}

fn parse_positive(raw: &Option<String>, default: usize) -> usize {
    non_empty(raw)
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
}
