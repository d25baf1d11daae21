//! Business logic.
//!
//! Services sit between route handlers and repositories: they validate
//! payloads, enforce ownership, and map storage outcomes onto
//! application errors.

pub mod addresses;
pub mod contacts;
pub mod users;

pub use addresses::AddressService;
pub use contacts::ContactService;
pub use users::UserService;
