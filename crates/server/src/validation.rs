//! Input validation helpers.
//!
//! Request payloads deserialize with every field optional so that missing
//! fields reach the schema checks instead of failing in serde. Each payload
//! type walks its fields through these helpers, collecting every failure
//! message rather than stopping at the first.

use core::fmt;

use rolodex_core::{Email, EmailError, Username, UsernameError};

/// Field-level validation messages, in schema order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    /// An empty collection to push messages into.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// A collection holding a single message.
    #[must_use]
    pub fn single(message: impl Into<String>) -> Self {
        Self(vec![message.into()])
    }

    /// Record a failure message.
    pub fn push(&mut self, message: impl Into<String>) {
        self.0.push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the raw message list.
    #[must_use]
    pub fn into_messages(self) -> Vec<String> {
        self.0
    }

    /// The collected messages.
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// Required text field: must be present, non-empty, and within `max` bytes.
///
/// Returns the accepted value, or `None` after recording a message.
pub fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    match value {
        None | Some("") => {
            errors.push(format!("{field} is required"));
            None
        }
        Some(s) if s.len() > max => {
            errors.push(format!("{field} must be at most {max} characters"));
            None
        }
        Some(s) => Some(s.to_owned()),
    }
}

/// Optional text field: absent and empty are both treated as absent.
pub fn optional_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Option<String> {
    match value {
        None | Some("") => None,
        Some(s) if s.len() > max => {
            errors.push(format!("{field} must be at most {max} characters"));
            None
        }
        Some(s) => Some(s.to_owned()),
    }
}

/// Required username, parsed into the domain type.
pub fn required_username(errors: &mut ValidationErrors, value: Option<&str>) -> Option<Username> {
    let Some(s) = value.filter(|s| !s.is_empty()) else {
        errors.push("username is required");
        return None;
    };

    match Username::parse(s) {
        Ok(username) => Some(username),
        Err(UsernameError::TooLong { max }) => {
            errors.push(format!("username must be at most {max} characters"));
            None
        }
        Err(UsernameError::Empty) => {
            errors.push("username is required");
            None
        }
    }
}

/// Optional email, parsed into the domain type when present.
pub fn optional_email(errors: &mut ValidationErrors, value: Option<&str>) -> Option<Email> {
    let s = value.filter(|s| !s.is_empty())?;

    match Email::parse(s) {
        Ok(email) => Some(email),
        Err(EmailError::TooLong { max }) => {
            errors.push(format!("email must be at most {max} characters"));
            None
        }
        Err(_) => {
            errors.push("email must be a valid email address");
            None
        }
    }
}

/// Path ids must be positive integers.
///
/// # Errors
///
/// Returns a single-message failure naming `field`.
pub fn positive_id(field: &str, value: i64) -> Result<(), ValidationErrors> {
    if value >= 1 {
        Ok(())
    } else {
        Err(ValidationErrors::single(format!(
            "{field} must be a positive integer"
        )))
    }
}
