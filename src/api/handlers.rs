use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::server::AppState;

use super::error::ApiError;
use super::params::ListParams;
use super::types::{ListResponse, StatusResponse};

/// `GET /movies`: every site's collection, queried in the configured
/// order and concatenated before pagination.
pub async fn list_movies(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let query = params.find_query();
    let mut all_movies = Vec::new();

    for site in &state.config.sites {
        let movies = state.db.find_movies(&site.collection, &query).await?;
        all_movies.extend(movies);
    }

    Ok(Json(ListResponse::new(all_movies, &params.pagination())))
}

/// `GET /services/{service}/movies`: one site, validated against the
/// allow-list by its public hyphenated name.
pub async fn list_movies_by_service(
    State(state): State<AppState>,
    Path(service): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let Some(site) = state.config.find_site(&service) else {
        return Err(ApiError::UnknownSite(service));
    };

    let movies = state
        .db
        .find_movies(&site.collection, &params.find_query())
        .await?;

    Ok(Json(ListResponse::new(movies, &params.pagination())))
}

/// `GET /status`: unauthenticated health check.
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse { status: "ok" })
}
