use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::db::DbError;

/// Wire format for structured error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
    pub errors: Vec<ErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("site {0} not found")]
    UnknownSite(String),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            // No detail leaks on auth failure, just the challenge.
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                [(
                    header::WWW_AUTHENTICATE,
                    "Basic realm=\"Authentication Required\"",
                )],
                "Unauthorized",
            )
                .into_response(),
            ApiError::UnknownSite(site) => {
                let body = ErrorBody {
                    code: "BAD_REQUEST",
                    message: "Invalid request".to_string(),
                    errors: vec![ErrorDetail {
                        message: format!("Site {} not found", site),
                    }],
                };
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            ApiError::Db(err) => {
                tracing::error!("Store query failed: {}", err);
                let body = ErrorBody {
                    code: "INTERNAL_ERROR",
                    message: "An internal error occurred".to_string(),
                    errors: Vec::new(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}
