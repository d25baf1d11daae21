//! User account models.

use rolodex_core::Username;
use serde::{Deserialize, Serialize};

use crate::validation::{self, ValidationErrors};

const PASSWORD_MAX_LENGTH: usize = 100;
const NAME_MAX_LENGTH: usize = 100;

/// A user row.
///
/// Carries the password hash; never serialized directly. Responses go
/// through [`UserResponse`].
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub username: Username,
    pub password: String,
    pub name: String,
    pub token: Option<String>,
}

// ============================================================================
// Request payloads
// ============================================================================

/// Raw registration payload.
#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

/// A registration payload that passed validation.
#[derive(Debug)]
pub struct RegisterUser {
    pub username: Username,
    pub password: String,
    pub name: String,
}

impl RegisterUserRequest {
    /// Check every field, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the full message list when any field is missing, empty, or
    /// over its length limit.
    pub fn validate(self) -> Result<RegisterUser, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let username = validation::required_username(&mut errors, self.username.as_deref());
        let password = validation::required_text(
            &mut errors,
            "password",
            self.password.as_deref(),
            PASSWORD_MAX_LENGTH,
        );
        let name =
            validation::required_text(&mut errors, "name", self.name.as_deref(), NAME_MAX_LENGTH);

        if let Some(username) = username
            && let Some(password) = password
            && let Some(name) = name
            && errors.is_empty()
        {
            Ok(RegisterUser {
                username,
                password,
                name,
            })
        } else {
            Err(errors)
        }
    }
}

/// Raw login payload.
#[derive(Debug, Deserialize)]
pub struct LoginUserRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// A login payload that passed validation.
#[derive(Debug)]
pub struct LoginUser {
    pub username: Username,
    pub password: String,
}

impl LoginUserRequest {
    /// Check both credential fields, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the full message list when either field is missing, empty,
    /// or over its length limit.
    pub fn validate(self) -> Result<LoginUser, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let username = validation::required_username(&mut errors, self.username.as_deref());
        let password = validation::required_text(
            &mut errors,
            "password",
            self.password.as_deref(),
            PASSWORD_MAX_LENGTH,
        );

        if let Some(username) = username
            && let Some(password) = password
            && errors.is_empty()
        {
            Ok(LoginUser { username, password })
        } else {
            Err(errors)
        }
    }
}

/// Raw profile update payload. Both fields are optional; omitted fields
/// keep their current value.
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// A profile update that passed validation.
#[derive(Debug)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserRequest {
    /// Check the provided fields, collecting all failures.
    ///
    /// # Errors
    ///
    /// Returns the full message list when a provided field is empty or
    /// over its length limit.
    pub fn validate(self) -> Result<UpdateUser, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        // A provided-but-empty field is rejected; an omitted field is kept as-is.
        let name = if self.name.is_some() {
            validation::required_text(&mut errors, "name", self.name.as_deref(), NAME_MAX_LENGTH)
        } else {
            None
        };
        let password = if self.password.is_some() {
            validation::required_text(
                &mut errors,
                "password",
                self.password.as_deref(),
                PASSWORD_MAX_LENGTH,
            )
        } else {
            None
        };

        if errors.is_empty() {
            Ok(UpdateUser { name, password })
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// Response shapes
// ============================================================================

/// Public view of a user.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub username: Username,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            name: user.name,
        }
    }
}

/// Session token issued at login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
