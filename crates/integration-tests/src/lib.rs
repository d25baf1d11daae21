//! Integration tests for Rolodex.
//!
//! Each test spawns the full application on an ephemeral port with its
//! own in-memory `SQLite` database, then drives it over HTTP with
//! `reqwest`. No external services are required:
//!
//! ```bash
//! cargo test -p rolodex-integration-tests
//! ```

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use reqwest::{Client, StatusCode};
use secrecy::SecretString;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use rolodex_server::config::ServerConfig;
use rolodex_server::state::AppState;
use rolodex_server::{app, db};

/// A running server instance backed by a private in-memory database.
///
/// The server task is aborted when the value is dropped.
pub struct TestServer {
    addr: SocketAddr,
    client: Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Spawn the application on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics when the database or the listener cannot be set up.
    pub async fn spawn() -> Self {
        let config = ServerConfig {
            database_url: SecretString::from("sqlite::memory:"),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 0,
        };

        let pool = db::create_pool(&config.database_url)
            .await
            .expect("Failed to create database pool");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let router = app(AppState::new(config, pool));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Server stopped unexpectedly");
        });

        Self {
            addr,
            client: Client::new(),
            handle,
        }
    }

    /// Absolute URL for a path on this server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// The HTTP client to drive this server with.
    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

// ============================================================================
// Test data helpers
// ============================================================================

/// Register a user with a fixed password and log in, returning the
/// session token.
///
/// # Panics
///
/// Panics when either request fails.
pub async fn register_and_login(server: &TestServer, username: &str) -> String {
    let response = server
        .client()
        .post(server.url("/api/users"))
        .json(&json!({
            "username": username,
            "password": "test-password",
            "name": "Test User"
        }))
        .send()
        .await
        .expect("Failed to register user");
    assert_eq!(response.status(), StatusCode::OK);

    let response = server
        .client()
        .post(server.url("/api/users/login"))
        .json(&json!({
            "username": username,
            "password": "test-password"
        }))
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse login body");
    body["data"]["token"]
        .as_str()
        .expect("Login body should carry a token")
        .to_owned()
}

/// Create a contact with only a first name, returning its id.
///
/// # Panics
///
/// Panics when the request fails.
pub async fn create_contact(server: &TestServer, token: &str, first_name: &str) -> i64 {
    let response = server
        .client()
        .post(server.url("/api/contacts"))
        .header("Authorization", token)
        .json(&json!({ "first_name": first_name }))
        .send()
        .await
        .expect("Failed to create contact");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse contact body");
    body["data"]["id"]
        .as_i64()
        .expect("Contact body should carry an id")
}

/// Create a minimal address under a contact, returning its id.
///
/// # Panics
///
/// Panics when the request fails.
pub async fn create_address(server: &TestServer, token: &str, contact_id: i64) -> i64 {
    let response = server
        .client()
        .post(server.url(&format!("/api/contacts/{contact_id}/addresses")))
        .header("Authorization", token)
        .json(&json!({ "country": "Canada", "postal_code": "12345" }))
        .send()
        .await
        .expect("Failed to create address");
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = response.json().await.expect("Failed to parse address body");
    body["data"]["id"]
        .as_i64()
        .expect("Address body should carry an id")
}
