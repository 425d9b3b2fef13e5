//! Account profile route handler.

use axum::{
    Json,
    extract::{Path, State},
};

use reclaim_core::AccountId;

use crate::error::Result;
use crate::models::AccountProfile;
use crate::services::AuthService;
use crate::state::AppState;

/// Return the sanitized profile for an account.
///
/// GET /api/user/{id}
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<AccountProfile>> {
    let auth = AuthService::new(state.pool(), state.hasher());

    let account = auth.get_profile(AccountId::new(id)).await?;

    Ok(Json(account.into()))
}
