use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Basic, Authorization},
    TypedHeader,
};

use crate::api::error::ApiError;
use crate::server::AppState;

/// Single-user credential store. The configured password is hashed once at
/// startup; per-request verification goes through bcrypt's constant-time
/// comparison.
pub struct CredentialStore {
    username: String,
    password_hash: String,
}

impl CredentialStore {
    pub fn new(username: &str, password: &str) -> Result<Self, bcrypt::BcryptError> {
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
        Ok(Self {
            username: username.to_string(),
            password_hash,
        })
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        if username != self.username {
            return false;
        }
        bcrypt::verify(password, &self.password_hash).unwrap_or(false)
    }
}

/// Rejects requests that do not carry valid basic-auth credentials.
/// Applied to the movie routes only; `/status` stays open.
pub async fn require_basic_auth(
    State(state): State<AppState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match credentials {
        Some(TypedHeader(Authorization(basic)))
            if state.credentials.verify(basic.username(), basic.password()) =>
        {
            Ok(next.run(req).await)
        }
        _ => Err(ApiError::Unauthorized),
    }
}
