//! Chat endpoint.
//!
//! POST /api/v1/chat always answers 200: the chat service contains every
//! failure internally and degrades to a fallback reply with an `error`
//! field instead of an error status.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use tubesona_types::chat::{ChatReply, HistoryEntry};

use crate::state::AppState;

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Channel reference: raw ID, handle, or URL.
    pub channel: String,
    /// The user message to answer in the channel's voice.
    pub message: String,
    /// Prior turns from a stateless client, oldest first.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// POST /api/v1/chat - Chat with a channel persona.
pub async fn chat(State(state): State<AppState>, Json(body): Json<ChatRequest>) -> Json<ChatReply> {
    let reply = state
        .chat_service
        .process_message(&body.channel, &body.message, &body.history)
        .await;
    Json(reply)
}
