//! User persistence.

use rolodex_core::Username;
use sqlx::SqlitePool;

use super::RepositoryError;
use crate::models::user::User;

/// Queries against the `users` table.
pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new user.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] when the username is already
    /// taken.
    pub async fn create(
        &self,
        username: &Username,
        password_hash: &str,
        name: &str,
    ) -> Result<User, RepositoryError> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, password, name)
             VALUES (?, ?, ?)
             RETURNING username, password, name, token",
        )
        .bind(username.as_str())
        .bind(password_hash)
        .bind(name)
        .fetch_one(self.pool)
        .await
        .map_err(|error| {
            if is_unique_violation(&error) {
                RepositoryError::Conflict("username already exists".to_owned())
            } else {
                RepositoryError::Database(error)
            }
        })
    }

    /// Look up a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn get_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password, name, token FROM users WHERE username = ?",
        )
        .bind(username.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Look up a user by session token.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, password, name, token FROM users WHERE token = ?",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Store a fresh session token, replacing any existing one.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn set_token(
        &self,
        username: &Username,
        token: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET token = ? WHERE username = ?")
            .bind(token)
            .bind(username.as_str())
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Clear the session token, ending any active session.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn clear_token(&self, username: &Username) -> Result<(), RepositoryError> {
        sqlx::query("UPDATE users SET token = NULL WHERE username = ?")
            .bind(username.as_str())
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Overwrite the display name and password hash.
    ///
    /// Returns `false` when the user no longer exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the query fails.
    pub async fn update_profile(
        &self,
        username: &Username,
        name: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query("UPDATE users SET name = ?, password = ? WHERE username = ?")
            .bind(name)
            .bind(password_hash)
            .bind(username.as_str())
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_error) = error
        && db_error.is_unique_violation()
    {
        return true;
    }
    false
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn username(value: &str) -> Username {
        Username::parse(value).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        let created = repo.create(&username("eko"), "hash", "Eko").await.unwrap();
        assert_eq!(created.username.as_str(), "eko");
        assert_eq!(created.password, "hash");
        assert!(created.token.is_none());

        let fetched = repo.get_by_username(&username("eko")).await.unwrap();
        assert_eq!(fetched.unwrap().name, "Eko");
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        repo.create(&username("eko"), "hash", "Eko").await.unwrap();
        let error = repo
            .create(&username("eko"), "other-hash", "Other")
            .await
            .unwrap_err();
        assert!(matches!(error, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_is_none() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);

        assert!(repo.get_by_username(&username("ghost")).await.unwrap().is_none());
        assert!(repo.get_by_token("no-such-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_lifecycle() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        repo.create(&username("eko"), "hash", "Eko").await.unwrap();

        repo.set_token(&username("eko"), "token-1").await.unwrap();
        let user = repo.get_by_token("token-1").await.unwrap().unwrap();
        assert_eq!(user.username.as_str(), "eko");

        repo.clear_token(&username("eko")).await.unwrap();
        assert!(repo.get_by_token("token-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_profile() {
        let pool = test_pool().await;
        let repo = UserRepository::new(&pool);
        repo.create(&username("eko"), "hash", "Eko").await.unwrap();

        let updated = repo
            .update_profile(&username("eko"), "Eko Khannedy", "new-hash")
            .await
            .unwrap();
        assert!(updated);

        let user = repo.get_by_username(&username("eko")).await.unwrap().unwrap();
        assert_eq!(user.name, "Eko Khannedy");
        assert_eq!(user.password, "new-hash");

        let missing = repo
            .update_profile(&username("ghost"), "Ghost", "hash")
            .await
            .unwrap();
        assert!(!missing);
    }
}
