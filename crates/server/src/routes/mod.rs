//! HTTP route definitions.
//!
//! ```text
//! # Accounts
//! POST   /api/users                                  register
//! POST   /api/users/login                            log in, issue token
//! GET    /api/users/current                          current profile
//! PATCH  /api/users/current                          update profile
//! DELETE /api/users/logout                           log out
//!
//! # Contacts
//! POST   /api/contacts                               create contact
//! GET    /api/contacts                               search contacts
//! GET    /api/contacts/{contact_id}                  fetch contact
//! PUT    /api/contacts/{contact_id}                  replace contact
//! DELETE /api/contacts/{contact_id}                  delete contact
//!
//! # Addresses
//! POST   /api/contacts/{contact_id}/addresses                 create address
//! GET    /api/contacts/{contact_id}/addresses                 list addresses
//! GET    /api/contacts/{contact_id}/addresses/{address_id}    fetch address
//! PUT    /api/contacts/{contact_id}/addresses/{address_id}    replace address
//! DELETE /api/contacts/{contact_id}/addresses/{address_id}    delete address
//! ```
//!
//! Everything except registration and login requires a session token in
//! the `Authorization` header.

pub mod addresses;
pub mod contacts;
pub mod users;

use axum::Router;
use axum::routing::{delete, get, post};

use crate::state::AppState;

/// All API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/users", user_routes())
        .nest("/api/contacts", contact_routes())
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(users::register))
        .route("/login", post(users::login))
        .route("/current", get(users::current).patch(users::update))
        .route("/logout", delete(users::logout))
}

fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(contacts::create).get(contacts::search))
        .route(
            "/{contact_id}",
            get(contacts::get)
                .put(contacts::update)
                .delete(contacts::remove),
        )
        .route(
            "/{contact_id}/addresses",
            post(addresses::create).get(addresses::list),
        )
        .route(
            "/{contact_id}/addresses/{address_id}",
            get(addresses::get)
                .put(addresses::update)
                .delete(addresses::remove),
        )
}
