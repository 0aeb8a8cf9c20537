//! Transfer endpoints for the two ledger paths.

use api_types::transaction::{
    TransactionKind as ApiKind, TransactionStatus as ApiStatus, TransactionView,
    TransferAccountNew, TransferNew,
};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState, to_amount, to_money};

fn map_status(status: engine::TransactionStatus) -> ApiStatus {
    match status {
        engine::TransactionStatus::Pending => ApiStatus::Pending,
        engine::TransactionStatus::Success => ApiStatus::Success,
        engine::TransactionStatus::Failed => ApiStatus::Failed,
    }
}

fn map_kind(kind: engine::TransactionKind) -> ApiKind {
    match kind {
        engine::TransactionKind::Transfer => ApiKind::Transfer,
        engine::TransactionKind::Deposit => ApiKind::Deposit,
        engine::TransactionKind::Withdrawal => ApiKind::Withdrawal,
    }
}

pub(crate) fn transaction_view(tx: engine::Transaction) -> TransactionView {
    TransactionView {
        id: tx.id,
        from_id: tx.from_id,
        to_id: tx.to_id,
        from_user_id: tx.from_user_id,
        to_user_id: tx.to_user_id,
        amount: to_amount(tx.amount),
        timestamp: tx.timestamp,
        status: map_status(tx.status),
        kind: map_kind(tx.kind),
        description: tx.description,
    }
}

pub async fn transfer(
    State(state): State<ServerState>,
    Json(payload): Json<TransferNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .transfer(
            &payload.from_user_id,
            &payload.to_user_id,
            to_money(payload.amount),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(transaction_view(tx))))
}

pub async fn transfer_account(
    State(state): State<ServerState>,
    Json(payload): Json<TransferAccountNew>,
) -> Result<(StatusCode, Json<TransactionView>), ServerError> {
    let tx = state
        .engine
        .transfer_accounts(
            &payload.from_account_id,
            &payload.to_account_id,
            to_money(payload.amount),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(transaction_view(tx))))
}
