//! Signup and login route handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::AccountProfile;
use crate::services::AuthService;
use crate::state::AppState;

/// Signup request body.
///
/// Fields default to empty so a missing key reports "x is required" instead
/// of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response carrying the sanitized account projection.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: AccountProfile,
}

/// Handle signup.
///
/// POST /api/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool(), state.hasher());

    let account = auth
        .signup(&req.name, &req.email, &req.mobile, &req.password)
        .await?;

    tracing::info!(account_id = %account.id, "account created");

    Ok(Json(AuthResponse {
        message: "Signup successful".to_owned(),
        user: account.into(),
    }))
}

/// Handle login.
///
/// POST /api/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool(), state.hasher());

    let account = auth.login(&req.email, &req.password).await?;

    Ok(Json(AuthResponse {
        message: "Login successful".to_owned(),
        user: account.into(),
    }))
}
