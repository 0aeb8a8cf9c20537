//! Notification endpoint, most recent first.

use api_types::notification::NotificationView;
use axum::{
    Json,
    extract::{Path, State},
};

use crate::{ServerError, server::ServerState};

pub async fn list(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<NotificationView>>, ServerError> {
    let notes = state.engine.notifications(&user_id).await?;
    Ok(Json(
        notes
            .into_iter()
            .map(|note| NotificationView {
                message: note.message,
                timestamp: note.timestamp,
            })
            .collect(),
    ))
}
