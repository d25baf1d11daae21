//! Account management: registration, sessions, and profile updates.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db::{RepositoryError, UserRepository};
use crate::error::{AppError, Result};
use crate::models::user::{
    LoginUserRequest, RegisterUserRequest, TokenResponse, UpdateUserRequest, User, UserResponse,
};

/// Login failures use one message for unknown users and wrong passwords,
/// so responses do not reveal which usernames exist.
const BAD_CREDENTIALS: &str = "username or password is wrong";

/// Account operations.
pub struct UserService<'a> {
    users: UserRepository<'a>,
}

impl<'a> UserService<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new account, storing the password as an Argon2 hash.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad payload, or a conflict when
    /// the username is already taken.
    pub async fn register(&self, request: RegisterUserRequest) -> Result<UserResponse> {
        let registration = request.validate()?;
        let password_hash = hash_password(&registration.password)?;

        let user = self
            .users
            .create(&registration.username, &password_hash, &registration.name)
            .await
            .map_err(|error| match error {
                RepositoryError::Conflict(message) => AppError::Conflict(message),
                other => AppError::Database(other),
            })?;

        Ok(UserResponse::from(user))
    }

    /// Log in, issuing a fresh session token. Any previous token for the
    /// user stops working.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad payload, or an unauthorized
    /// error when the credentials do not match.
    pub async fn login(&self, request: LoginUserRequest) -> Result<TokenResponse> {
        let login = request.validate()?;

        let user = self
            .users
            .get_by_username(&login.username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(BAD_CREDENTIALS.to_owned()))?;

        verify_password(&login.password, &user.password)?;

        let token = Uuid::new_v4().to_string();
        self.users.set_token(&user.username, &token).await?;

        Ok(TokenResponse { token })
    }

    /// The authenticated user's own profile.
    #[must_use]
    pub fn current(user: User) -> UserResponse {
        UserResponse::from(user)
    }

    /// Update the profile. Omitted fields keep their current values, and
    /// the session token stays valid.
    ///
    /// # Errors
    ///
    /// Returns a validation error when a provided field is empty or over
    /// its length limit.
    pub async fn update(&self, user: User, request: UpdateUserRequest) -> Result<UserResponse> {
        let update = request.validate()?;

        let name = update.name.unwrap_or(user.name);
        let password_hash = match update.password {
            Some(password) => hash_password(&password)?,
            None => user.password,
        };

        self.users
            .update_profile(&user.username, &name, &password_hash)
            .await?;

        Ok(UserResponse {
            username: user.username,
            name,
        })
    }

    /// Log out, invalidating the session token.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn logout(&self, user: &User) -> Result<()> {
        self.users.clear_token(&user.username).await?;
        Ok(())
    }
}

// ============================================================================
// Password hashing
// ============================================================================

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::PasswordHash)?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed =
        PasswordHash::new(hash).map_err(|_| AppError::Unauthorized(BAD_CREDENTIALS.to_owned()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AppError::Unauthorized(BAD_CREDENTIALS.to_owned()))
}
