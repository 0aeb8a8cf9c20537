//! User profile endpoints and the derived contacts view.

use api_types::user::{ContactView, UserNew, UserView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState, to_amount, to_money};

pub(crate) fn user_view(user: engine::User) -> UserView {
    UserView {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        balance: to_amount(user.balance),
        created_at: user.created_at,
        active: user.active,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let balance = payload.balance.map(to_money).unwrap_or_default();
    let user = state
        .engine
        .create_user_profile(&payload.first_name, &payload.last_name, balance)
        .await?;

    Ok((StatusCode::CREATED, Json(user_view(user))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserView>>, ServerError> {
    let users = state.engine.users().await?;
    Ok(Json(users.into_iter().map(user_view).collect()))
}

pub async fn get(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<UserView>, ServerError> {
    let user = state.engine.user(&id).await?;
    Ok(Json(user_view(user)))
}

pub async fn contacts(
    State(state): State<ServerState>,
) -> Result<Json<Vec<ContactView>>, ServerError> {
    let contacts = state.engine.contacts().await?;
    Ok(Json(
        contacts
            .into_iter()
            .map(|contact| ContactView {
                id: contact.id,
                name: contact.name,
                payment_id: contact.payment_id,
            })
            .collect(),
    ))
}
