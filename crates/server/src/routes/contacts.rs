//! Contact handlers.

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::RequireAuth;
use crate::models::Data;
use crate::models::contact::{ContactPage, ContactRequest, ContactResponse, SearchContactsQuery};
use crate::services::ContactService;
use crate::state::AppState;

#[instrument(skip_all, fields(username = %user.username))]
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppJson(request): AppJson<ContactRequest>,
) -> Result<Json<Data<ContactResponse>>> {
    let response = ContactService::new(state.pool())
        .create(&user.username, request)
        .await?;
    Ok(Json(Data::new(response)))
}

#[instrument(skip_all, fields(username = %user.username))]
pub async fn search(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppQuery(query): AppQuery<SearchContactsQuery>,
) -> Result<Json<ContactPage>> {
    let page = ContactService::new(state.pool())
        .search(&user.username, query)
        .await?;
    Ok(Json(page))
}

#[instrument(skip_all, fields(contact_id = contact_id))]
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath(contact_id): AppPath<i64>,
) -> Result<Json<Data<ContactResponse>>> {
    let response = ContactService::new(state.pool())
        .get(&user.username, contact_id)
        .await?;
    Ok(Json(Data::new(response)))
}

#[instrument(skip_all, fields(contact_id = contact_id))]
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath(contact_id): AppPath<i64>,
    AppJson(request): AppJson<ContactRequest>,
) -> Result<Json<Data<ContactResponse>>> {
    let response = ContactService::new(state.pool())
        .update(&user.username, contact_id, request)
        .await?;
    Ok(Json(Data::new(response)))
}

#[instrument(skip_all, fields(contact_id = contact_id))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    AppPath(contact_id): AppPath<i64>,
) -> Result<Json<Data<&'static str>>> {
    ContactService::new(state.pool())
        .remove(&user.username, contact_id)
        .await?;
    Ok(Json(Data::new("OK")))
}
