//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                   - Liveness check
//! GET  /health/ready             - Readiness check (verifies database)
//!
//! # Accounts
//! POST /api/signup               - Register (JSON)
//! POST /api/login                - Login (JSON)
//! GET  /api/user/{id}            - Sanitized account profile
//!
//! # Items
//! POST /api/items                - Report a lost/found item (multipart)
//! GET  /api/items?type=          - List items of one type, newest first
//! PUT  /api/items/{id}/returned  - Mark an item returned (owner only)
//!
//! # Static
//! GET  /uploads/*                - Uploaded item images
//! ```
//!
//! # Identity model
//!
//! There is no session or token layer. Item writes carry a `userId` in the
//! request body and the server trusts it verbatim, matching the original
//! deployment where a gateway in front of this API is expected to have
//! authenticated the caller. This is a known-weak model, not an oversight.

pub mod auth;
pub mod items;
pub mod profile;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create the `/api` routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
        .route("/user/{id}", get(profile::show))
        .route("/items", post(items::create).get(items::list))
        .route("/items/{id}/returned", put(items::mark_returned))
}

/// Build the complete application router.
///
/// Used by both `main` and the integration tests; observability layers
/// (trace, sentry) are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let cors = state.config().cors_origin.clone().map_or_else(
        || {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        },
        |origin| {
            CorsLayer::new()
                .allow_origin(origin)
                .allow_methods(Any)
                .allow_headers(Any)
        },
    );

    let uploads = ServeDir::new(state.config().upload_dir.clone());

    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api", api_routes())
        .nest_service("/uploads", uploads)
        .layer(cors)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
