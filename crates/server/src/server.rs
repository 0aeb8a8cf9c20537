use std::sync::Arc;

use axum::{
    Json, Router,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use engine::Engine;

use crate::{accounts, auth, banks, notifications, reports, transfers, users};

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

#[derive(Serialize)]
struct Health {
    status: &'static str,
}

async fn ping() -> Json<Health> {
    Json(Health { status: "OK" })
}

/// Builds the full route table. CORS is wide open on every route; the
/// API is meant to sit behind whatever fronts it.
pub fn router(state: ServerState) -> Router {
    Router::new()
        .route("/api/ping", get(ping))
        .route("/api/users", post(users::create).get(users::list))
        .route("/api/users/{id}", get(users::get))
        .route("/api/accounts", post(accounts::create).get(accounts::list))
        .route("/api/accounts/{user_id}", get(accounts::for_user))
        .route("/api/contacts", get(users::contacts))
        .route("/api/transfer", post(transfers::transfer))
        .route("/api/transfer-account", post(transfers::transfer_account))
        .route("/api/notifications/{user_id}", get(notifications::list))
        .route("/api/reports/{user_id}", get(reports::get))
        .route("/api/banks", post(banks::create).get(banks::list))
        .route("/api/createUser", post(auth::create_user))
        .route("/api/login", post(auth::login))
        .route("/api/user/{email}", get(auth::user_by_email))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(engine: Engine) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:8080").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
