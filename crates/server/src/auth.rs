//! User store endpoints: registration, login, email lookup.

use api_types::auth::{LoginNew, LoginResult, RegisterNew, RegisterResult, UserLookup};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::EngineError;

use crate::{ServerError, server::ServerState};

pub async fn create_user(
    State(state): State<ServerState>,
    Json(payload): Json<RegisterNew>,
) -> Result<Json<RegisterResult>, ServerError> {
    let success = state
        .engine
        .create_user(&payload.name, &payload.email, &payload.password)
        .await?;
    Ok(Json(RegisterResult { success }))
}

pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginNew>,
) -> Result<Json<LoginResult>, ServerError> {
    let user = state
        .engine
        .check_authentication(&payload.email, &payload.password)
        .await?;

    Ok(Json(match user {
        Some(user) => LoginResult {
            success: true,
            name: Some(user.display_name()),
        },
        None => LoginResult {
            success: false,
            name: None,
        },
    }))
}

pub async fn user_by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> Result<Json<UserLookup>, ServerError> {
    let user = state
        .engine
        .user_by_email(&email)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound("user not exists".to_string()))?;

    Ok(Json(UserLookup {
        name: user.display_name(),
        email,
    }))
}
