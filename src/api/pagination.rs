use crate::db::Document;

use super::params::Pagination;

/// Slice one page out of a fully materialized result list.
///
/// Out-of-range pages yield an empty slice rather than an error. The
/// second value reports whether this is the final page:
/// `page * per_page >= total_size`.
pub fn paginate(movies: Vec<Document>, pagination: &Pagination) -> (Vec<Document>, bool) {
    let total_size = movies.len();
    let is_last_page = pagination.page.saturating_mul(pagination.per_page) >= total_size;

    let page = movies
        .into_iter()
        .skip(pagination.offset)
        .take(pagination.per_page)
        .collect();

    (page, is_last_page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::params::ListParams;
    use serde_json::json;

    fn movies(n: usize) -> Vec<Document> {
        (0..n)
            .map(|i| match json!({"n": i}) {
                serde_json::Value::Object(map) => map,
                _ => unreachable!(),
            })
            .collect()
    }

    fn pagination(page: usize, per_page: usize) -> Pagination {
        Pagination {
            page,
            per_page,
            offset: (page - 1) * per_page,
        }
    }

    #[test]
    fn test_slice_length_is_bounded() {
        // 7 documents, pages of 3: lengths 3, 3, 1, then empty.
        for (page, expected_len, expected_last) in
            [(1, 3, false), (2, 3, false), (3, 1, true), (4, 0, true)]
        {
            let (slice, is_last) = paginate(movies(7), &pagination(page, 3));
            assert_eq!(slice.len(), expected_len, "page {}", page);
            assert_eq!(is_last, expected_last, "page {}", page);
        }
    }

    #[test]
    fn test_slice_keeps_order() {
        let (slice, _) = paginate(movies(7), &pagination(2, 3));

        let ns: Vec<u64> = slice.iter().map(|m| m["n"].as_u64().unwrap()).collect();
        assert_eq!(ns, vec![3, 4, 5]);
    }

    #[test]
    fn test_exact_fit_is_last_page() {
        let (slice, is_last) = paginate(movies(6), &pagination(2, 3));

        assert_eq!(slice.len(), 3);
        assert!(is_last);
    }

    #[test]
    fn test_empty_input() {
        let (slice, is_last) = paginate(Vec::new(), &ListParams::default().pagination());

        assert!(slice.is_empty());
        assert!(is_last);
    }
}
