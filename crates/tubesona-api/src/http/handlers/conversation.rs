//! Conversation history endpoint.

use axum::Json;
use axum::extract::{Path, State};
use serde::Serialize;

use tubesona_types::chat::ChatMessage;

use crate::http::error::AppError;
use crate::state::AppState;

/// Response body for a conversation read.
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub conversation_id: String,
    pub messages: Vec<ChatMessage>,
}

/// GET /api/v1/conversations/{id} - Read a conversation's history.
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationResponse>, AppError> {
    match state.chat_service.conversation(&id) {
        Some(conversation) => Ok(Json(ConversationResponse {
            conversation_id: conversation.id.0,
            messages: conversation.messages,
        })),
        None => Err(AppError::NotFound("Conversation not found".to_string())),
    }
}
