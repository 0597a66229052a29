use serde::Serialize;
use serde_json::Value;

use crate::db::{Document, ID_FIELD};

use super::pagination::paginate;
use super::params::Pagination;

/// Public name of the document identifier field.
pub const PUBLIC_ID_FIELD: &str = "id";

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

/// Paginated movie listing envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse {
    pub result: Vec<Document>,
    pub page: usize,
    pub size: usize,
    pub total_pages: usize,
    pub total_size: usize,
    pub is_first_page: bool,
    pub is_last_page: bool,
}

impl ListResponse {
    /// Build the envelope from the full result list of a query.
    pub fn new(movies: Vec<Document>, pagination: &Pagination) -> Self {
        let total_size = movies.len();
        let (mut page_movies, is_last_page) = paginate(movies, pagination);

        for movie in &mut page_movies {
            rename_movie_id(movie);
        }

        ListResponse {
            page: pagination.page,
            size: page_movies.len(),
            total_pages: total_size.div_ceil(pagination.per_page),
            total_size,
            is_first_page: pagination.page == 1,
            is_last_page,
            result: page_movies,
        }
    }
}

/// Replace the store identifier with the public `id` field, always a
/// string. All other fields keep their relative order; documents without
/// an identifier pass through untouched.
pub fn rename_movie_id(movie: &mut Document) {
    let Some(raw) = movie.shift_remove(ID_FIELD) else {
        return;
    };

    let id = match raw {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    };

    movie.insert(PUBLIC_ID_FIELD.to_string(), Value::String(id));
}
