//! Integration test harness for the Reclaim API.
//!
//! Tests drive the full router in-process via `tower::ServiceExt::oneshot`
//! against a throwaway `SQLite` database, so they need no running server and
//! no external services.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p reclaim-integration-tests
//! ```
//!
//! [`TestContext::new`] builds an [`AppState`] backed by a temp directory
//! (database file plus upload directory) and the same router the binary
//! serves. Argon2 costs are lowered so signup/login stay fast.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::PathBuf;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use reclaim_server::config::{AppConfig, Argon2Config};
use reclaim_server::state::AppState;
use reclaim_server::{db, routes};
use secrecy::SecretString;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

/// Multipart boundary used by [`multipart_form`].
pub const BOUNDARY: &str = "reclaim-test-boundary";

/// A fully wired application instance backed by a temp directory.
///
/// The temp directory (database file and upload dir) is removed when the
/// context is dropped.
pub struct TestContext {
    pub app: Router,
    pub state: AppState,
    _tmp: TempDir,
}

impl TestContext {
    /// Build a fresh application with an empty, migrated database.
    pub async fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let config = test_config(&tmp);

        let pool = db::create_pool(&config.database_url).await.unwrap();
        db::MIGRATOR.run(&pool).await.unwrap();

        let state = AppState::new(config, pool).unwrap();
        state.images().ensure_dir().await.unwrap();
        let app = routes::app(state.clone());

        Self {
            app,
            state,
            _tmp: tmp,
        }
    }

    /// Register an account and return the profile JSON from the response.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Value {
        let (status, body) = post_json(
            &self.app,
            "/api/signup",
            serde_json::json!({
                "name": name,
                "email": email,
                "mobile": "555-0100",
                "password": password,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "signup failed: {body}");
        body["user"].clone()
    }

    /// Report an item for `user_id` and return the item JSON.
    pub async fn report_item(&self, user_id: i64, item_type: &str, product_name: &str) -> Value {
        let fields = [
            ("type", item_type.to_string()),
            ("productName", product_name.to_string()),
            ("description", format!("{product_name} description")),
            ("date", "2024-05-01".to_string()),
            ("location", "Main library".to_string()),
            ("mobile", "555-0100".to_string()),
            ("userId", user_id.to_string()),
        ];
        let fields: Vec<(&str, &str)> = fields.iter().map(|(k, v)| (*k, v.as_str())).collect();
        let (status, body) = post_multipart(&self.app, "/api/items", &fields, None).await;
        assert_eq!(status, StatusCode::OK, "item report failed: {body}");
        body["item"].clone()
    }

    /// Fetch the sanitized profile for `user_id`.
    pub async fn profile(&self, user_id: i64) -> Value {
        let (status, body) = get(&self.app, &format!("/api/user/{user_id}")).await;
        assert_eq!(status, StatusCode::OK, "profile fetch failed: {body}");
        body
    }
}

fn test_config(tmp: &TempDir) -> AppConfig {
    let db_path = tmp.path().join("reclaim-test.db");
    AppConfig {
        database_url: SecretString::from(format!("sqlite://{}", db_path.display())),
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        upload_dir: tmp.path().join("uploads"),
        cors_origin: None,
        // Minimal costs keep the hash step out of the test runtime.
        argon2: Argon2Config {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        sentry_dsn: None,
        sentry_environment: None,
    }
}

// ============================================================================
// Request Helpers
// ============================================================================

/// Send a request to the router and decode the response body as JSON.
///
/// Empty bodies decode to `Value::Null`; non-JSON bodies decode to a JSON
/// string of the raw text.
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}

/// `GET` a path and decode the JSON response.
pub async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// `POST` a JSON body and decode the JSON response.
pub async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// `PUT` a JSON body and decode the JSON response.
pub async fn put_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("PUT")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

/// `POST` a multipart form built by [`multipart_form`].
pub async fn post_multipart(
    app: &Router,
    path: &str,
    fields: &[(&str, &str)],
    file: Option<(&str, &[u8])>,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_form(fields, file)))
        .unwrap();
    send(app, request).await
}

/// Encode text fields (and an optional `image` file part) as a multipart
/// form body using [`BOUNDARY`].
#[must_use]
pub fn multipart_form(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Absolute path of an uploaded image, given its `/uploads/...` URL path.
#[must_use]
pub fn uploaded_file_path(state: &AppState, image_url: &str) -> PathBuf {
    let name = image_url.trim_start_matches("/uploads/");
    state.config().upload_dir.join(name)
}
