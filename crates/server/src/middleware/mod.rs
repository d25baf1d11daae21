//! Request middleware and extractors for protected routes.

pub mod auth;

pub use auth::RequireAuth;
