//! Database access layer.
//!
//! Tables:
//! - `users` keyed by username, carrying the password hash and session token
//! - `contacts` owned by a user
//! - `addresses` owned by a contact
//!
//! Schema migrations live in `migrations/` and run automatically at
//! startup via [`run_migrations`].

pub mod addresses;
pub mod contacts;
pub mod users;

pub use addresses::AddressRepository;
pub use contacts::ContactRepository;
pub use users::UserRepository;

use core::str::FromStr;
use core::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Errors surfaced by the repository layer.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Create a connection pool for the given database URL.
///
/// The database file is created when missing. In-memory databases are
/// clamped to a single connection that never expires, since each SQLite
/// connection would otherwise see its own empty database.
///
/// # Errors
///
/// Returns an error when the URL is malformed or the connection fails.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10));
    if is_in_memory(url) {
        pool_options = pool_options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }

    pool_options.connect_with(options).await
}

/// Apply any pending schema migrations.
///
/// # Errors
///
/// Returns an error when a migration fails to apply.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// A migrated single-connection in-memory database for tests.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database should connect");
    run_migrations(&pool)
        .await
        .expect("migrations should apply");
    pool
}
