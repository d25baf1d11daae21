//! Contact models, including search parameters and pagination.

use rolodex_core::{ContactId, Email, Username};
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationErrors};

const FIRST_NAME_MAX_LENGTH: usize = 100;
const LAST_NAME_MAX_LENGTH: usize = 100;
const PHONE_MAX_LENGTH: usize = 200;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_SIZE: u32 = 10;
const MAX_SIZE: u32 = 100;

/// A contact row. Ownership is tracked by `username`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Contact {
    pub id: ContactId,
    pub username: Username,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
}

// ============================================================================
// Request payloads
// ============================================================================

/// Raw contact payload, shared by create and update since both carry the
/// full schema.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// A contact payload that passed validation.
#[derive(Debug)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
}

impl ContactRequest {
    /// Check every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the full message list when `first_name` is missing or any
    /// field fails its length or format check.
    pub fn validate(self) -> Result<NewContact, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let first_name = validation::required_text(
            &mut errors,
            "first_name",
            self.first_name.as_deref(),
            FIRST_NAME_MAX_LENGTH,
        );
        let last_name = validation::optional_text(
            &mut errors,
            "last_name",
            self.last_name.as_deref(),
            LAST_NAME_MAX_LENGTH,
        );
        let email = validation::optional_email(&mut errors, self.email.as_deref());
        let phone = validation::optional_text(
            &mut errors,
            "phone",
            self.phone.as_deref(),
            PHONE_MAX_LENGTH,
        );

        if let Some(first_name) = first_name
            && errors.is_empty()
        {
            Ok(NewContact {
                first_name,
                last_name,
                email,
                phone,
            })
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// Search
// ============================================================================

/// Raw search query string parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchContactsQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Search parameters that passed validation. Filters combine
/// conjunctively; absent filters match everything.
#[derive(Debug)]
pub struct ContactFilter {
    pub page: u32,
    pub size: u32,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl SearchContactsQuery {
    /// Apply defaults and range checks.
    ///
    /// # Errors
    ///
    /// Returns the full message list when `page` or `size` is out of range.
    pub fn validate(self) -> Result<ContactFilter, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let page = self.page.unwrap_or(DEFAULT_PAGE);
        if page == 0 {
            errors.push("page must be at least 1");
        }

        let size = self.size.unwrap_or(DEFAULT_SIZE);
        if !(1..=MAX_SIZE).contains(&size) {
            errors.push(format!("size must be between 1 and {MAX_SIZE}"));
        }

        if errors.is_empty() {
            Ok(ContactFilter {
                page,
                size,
                name: self.name.filter(|s| !s.is_empty()),
                email: self.email.filter(|s| !s.is_empty()),
                phone: self.phone.filter(|s| !s.is_empty()),
            })
        } else {
            Err(errors)
        }
    }
}

impl ContactFilter {
    /// Row offset of the first result on the requested page.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.size)
    }

    /// Number of pages needed to hold `total_item` results.
    #[must_use]
    pub fn total_pages(&self, total_item: u64) -> u64 {
        total_item.div_ceil(u64::from(self.size))
    }
}

// ============================================================================
// Response shapes
// ============================================================================

/// Public view of a contact.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub id: ContactId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}

/// Pagination metadata accompanying search results.
#[derive(Debug, Serialize)]
pub struct Paging {
    pub page: u32,
    pub total_item: u64,
    pub total_page: u64,
}

/// One page of search results.
#[derive(Debug, Serialize)]
pub struct ContactPage {
    pub data: Vec<ContactResponse>,
    pub paging: Paging,
}
