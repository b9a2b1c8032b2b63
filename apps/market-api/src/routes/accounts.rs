//! Fisherman registration and login.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tidal_core::{LoginRequest, RegisterFisherman, User};

use crate::error::ApiResult;
use crate::AppState;

/// `{ "user": User | null }`. A wrong password and an unknown email both
/// come back as `null` with status 200.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: Option<User>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterFisherman>,
) -> ApiResult<(StatusCode, Json<User>)> {
    let user = state.db.users().register(&input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state.db.users().login(&input).await?;
    Ok(Json(LoginResponse { user }))
}
