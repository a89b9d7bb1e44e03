pub mod admin;
pub mod api;
pub mod auth;
pub mod htmx;
pub mod public;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct PaginationParams {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

/// Resolves query parameters to `(page, per_page, offset)`, clamping the
/// page to 1 or more and the size to `1..=max_size`.
pub fn paginate(
    page: Option<usize>,
    per_page: Option<usize>,
    default_size: usize,
    max_size: usize,
) -> (usize, usize, usize) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(default_size).min(max_size).max(1);
    let offset = (page - 1).saturating_mul(per_page);
    (page, per_page, offset)
}

pub fn page_count(total: i64, per_page: usize) -> usize {
    let total = usize::try_from(total).unwrap_or(0);
    total.div_ceil(per_page.max(1)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_defaults() {
        assert_eq!(paginate(None, None, 10, 50), (1, 10, 0));
    }

    #[test]
    fn test_paginate_clamps() {
        assert_eq!(paginate(Some(0), Some(0), 10, 50), (1, 1, 0));
        assert_eq!(paginate(Some(3), Some(500), 10, 50), (3, 50, 100));
    }

    #[test]
    fn test_page_count() {
        assert_eq!(page_count(0, 25), 1);
        assert_eq!(page_count(25, 25), 1);
        assert_eq!(page_count(26, 25), 2);
        assert_eq!(page_count(101, 25), 5);
    }
}
