//! Rolodex server binary.
//!
//! A contact and address book REST API. Requests and responses use JSON
//! envelopes, state lives in SQLite via `sqlx`, and sessions are opaque
//! tokens carried in the `Authorization` header. The process itself is
//! stateless, so several instances can share one database file.

#![cfg_attr(not(test), forbid(unsafe_code))]

use rolodex_server::config::ServerConfig;
use rolodex_server::state::AppState;
use rolodex_server::{app, db};
use tokio::net::TcpListener;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() {
    let config = ServerConfig::from_env().expect("configuration should load");

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rolodex_server=info,tower_http=debug"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer())
        .init();

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("database pool should connect");
    db::run_migrations(&pool)
        .await
        .expect("migrations should apply");
    tracing::info!("database migrations applied");

    let addr = config.socket_addr();
    let state = AppState::new(config, pool);
    let router = app(state);

    let listener = TcpListener::bind(addr).await.expect("address should bind");
    tracing::info!(%addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server should run");
}

/// Resolves on `ctrl-c` or SIGTERM so in-flight requests can finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("ctrl-c handler should install");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("signal handler should install")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
