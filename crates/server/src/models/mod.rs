//! Data models: database rows, request payloads, and response shapes.

pub mod address;
pub mod contact;
pub mod user;

use serde::Serialize;

/// Standard success envelope wrapping a response body under `data`.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    #[must_use]
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}
