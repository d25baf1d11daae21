//! Token authentication.
//!
//! Protected handlers take [`RequireAuth`] as an argument. The extractor
//! reads the `Authorization` header as an opaque session token and
//! resolves it to a user. Missing, empty, and unknown tokens are all
//! rejected with the same response, so probing reveals nothing about
//! token validity.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::db::UserRepository;
use crate::error::AppError;
use crate::models::user::User;
use crate::state::AppState;

/// Extractor that authenticates the request and yields the current user.
#[derive(Debug)]
pub struct RequireAuth(pub User);

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or_else(unauthorized)?;

        let user = UserRepository::new(state.pool())
            .get_by_token(token)
            .await?
            .ok_or_else(unauthorized)?;

        Ok(Self(user))
    }
}

fn unauthorized() -> AppError {
    AppError::Unauthorized("Unauthorized".to_owned())
}
