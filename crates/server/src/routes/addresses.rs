//! Address handlers.

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::extract::{AppJson, AppPath};
use crate::middleware::RequireAuth;
use crate::models::Data;
use crate::models::address::{AddressRequest, AddressResponse};
use crate::services::AddressService;
use crate::state::AppState;

#[instrument(skip_all, fields(contact_id = contact_id))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath(contact_id): AppPath<i64>,
    AppJson(request): AppJson<AddressRequest>,
) -> Result<Json<Data<AddressResponse>>> {
    let response = AddressService::new(state.pool())
        .create(&user.username, contact_id, request)
        .await?;
    Ok(Json(Data::new(response)))
}

#[instrument(skip_all, fields(contact_id = contact_id))]
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath(contact_id): AppPath<i64>,
) -> Result<Json<Data<Vec<AddressResponse>>>> {
    let response = AddressService::new(state.pool())
        .list(&user.username, contact_id)
        .await?;
    Ok(Json(Data::new(response)))
}

#[instrument(skip_all, fields(contact_id = contact_id, address_id = address_id))]
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath((contact_id, address_id)): AppPath<(i64, i64)>,
) -> Result<Json<Data<AddressResponse>>> {
    let response = AddressService::new(state.pool())
        .get(&user.username, contact_id, address_id)
        .await?;
    Ok(Json(Data::new(response)))
}

#[instrument(skip_all, fields(contact_id = contact_id, address_id = address_id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath((contact_id, address_id)): AppPath<(i64, i64)>,
    AppJson(request): AppJson<AddressRequest>,
) -> Result<Json<Data<AddressResponse>>> {
    let response = AddressService::new(state.pool())
        .update(&user.username, contact_id, address_id, request)
        .await?;
    Ok(Json(Data::new(response)))
}

#[instrument(skip_all, fields(contact_id = contact_id, address_id = address_id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath((contact_id, address_id)): AppPath<(i64, i64)>,
) -> Result<Json<Data<&'static str>>> {
    AddressService::new(state.pool())
        .remove(&user.username, contact_id, address_id)
        .await?;
    Ok(Json(Data::new("OK")))
}
