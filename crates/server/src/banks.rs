//! Bank reference data endpoints.

use api_types::bank::{BankNew, BankView};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::{ServerError, server::ServerState};

fn bank_view(bank: engine::Bank) -> BankView {
    BankView {
        name: bank.name,
        routing_code: bank.routing_code,
        branch: bank.branch,
        address: bank.address,
        established_at: bank.established_at,
        active: bank.active,
    }
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BankNew>,
) -> Result<(StatusCode, Json<BankView>), ServerError> {
    let bank = state
        .engine
        .register_bank(
            &payload.name,
            &payload.routing_code,
            &payload.branch,
            &payload.address,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(bank_view(bank))))
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<BankView>>, ServerError> {
    let banks = state.engine.banks().await?;
    Ok(Json(banks.into_iter().map(bank_view).collect()))
}
