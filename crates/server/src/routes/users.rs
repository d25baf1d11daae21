//! Account handlers.

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::extract::AppJson;
use crate::middleware::RequireAuth;
use crate::models::Data;
use crate::models::user::{
    LoginUserRequest, RegisterUserRequest, TokenResponse, UpdateUserRequest, UserResponse,
};
use crate::services::UserService;
use crate::state::AppState;

#[instrument(skip_all, fields(username = ?request.username))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(request): AppJson<RegisterUserRequest>,
) -> Result<Json<Data<UserResponse>>> {
    let response = UserService::new(state.pool()).register(request).await?;
    Ok(Json(Data::new(response)))
}

#[instrument(skip_all, fields(username = ?request.username))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginUserRequest>,
) -> Result<Json<Data<TokenResponse>>> {
    let response = UserService::new(state.pool()).login(request).await?;
    Ok(Json(Data::new(response)))
}

pub async fn current(RequireAuth(user): RequireAuth) -> Json<Data<UserResponse>> {
    Json(Data::new(UserService::current(user)))
}

#[instrument(skip_all, fields(username = %user.username))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppJson(request): AppJson<UpdateUserRequest>,
) -> Result<Json<Data<UserResponse>>> {
    let response = UserService::new(state.pool()).update(user, request).await?;
    Ok(Json(Data::new(response)))
}

#[instrument(skip_all, fields(username = %user.username))]
pub async fn logout(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Data<&'static str>>> {
    UserService::new(state.pool()).logout(&user).await?;
    Ok(Json(Data::new("OK")))
}
