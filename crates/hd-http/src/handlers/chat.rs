use std::sync::Arc;

use axum::{extract::State, Json};

use hd_core::domain::{ChatRequest, ChatResponse};

use crate::{error::ApiError, AppState};

/// `POST /chat/`: resolve one message. The notification is scheduled by the
/// service and never awaited here.
pub async fn handle_chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let resp = state.chat.handle(req).await?;
    Ok(Json(resp))
}
