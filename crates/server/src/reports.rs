//! Per-user report endpoint.

use api_types::report::ReportView;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState, to_amount, transfers::transaction_view};

pub async fn get(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<ReportView>, ServerError> {
    let report = state.engine.report(&user_id).await?;

    Ok(Json(ReportView {
        user_id: report.user_id,
        total_transactions: report.total_transactions,
        total_sent: to_amount(report.total_sent),
        total_received: to_amount(report.total_received),
        current_balance: to_amount(report.current_balance),
        transactions: report
            .transactions
            .into_iter()
            .map(transaction_view)
            .collect(),
    }))
}
