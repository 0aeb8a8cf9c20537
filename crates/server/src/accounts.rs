//! Account endpoints.

use api_types::account::{AccountNew, AccountView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{ServerError, server::ServerState, to_amount, to_money};

fn account_view(account: engine::Account) -> AccountView {
    AccountView {
        id: account.id,
        user_id: account.user_id,
        account_number: account.account_number,
        bank_name: account.bank_name,
        balance: to_amount(account.balance),
        account_type: account.account_type,
        created_at: account.created_at,
        active: account.active,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AccountNew>,
) -> Result<(StatusCode, Json<AccountView>), ServerError> {
    let balance = payload.balance.map(to_money).unwrap_or_default();
    let account = state
        .engine
        .create_account(
            &payload.user_id,
            &payload.account_number,
            &payload.bank_name,
            balance,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(account_view(account))))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state.engine.accounts().await?;
    Ok(Json(accounts.into_iter().map(account_view).collect()))
}

pub async fn for_user(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<AccountView>>, ServerError> {
    let accounts = state.engine.accounts_for_user(&user_id).await?;
    Ok(Json(accounts.into_iter().map(account_view).collect()))
}
