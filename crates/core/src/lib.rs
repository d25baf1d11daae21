//! Rolodex Core - Shared types library.
//!
//! This crate provides common types used across all Rolodex components:
//! - `server` - REST API for managing contacts and their addresses
//! - `integration-tests` - Black-box tests that exercise the HTTP surface
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, usernames, and emails
#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
