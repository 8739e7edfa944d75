//! Channel lookup and search endpoints.
//!
//! These are the only paths where lookup failures reach the client
//! directly: NotFound maps to 404, provider failures to 500.

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use tubesona_types::channel::{ChannelMetadata, ChannelSearchHit};

use crate::http::error::AppError;
use crate::state::AppState;

/// Query parameters for channel search.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    5
}

/// GET /api/v1/channels/{identifier} - Fetch channel metadata.
///
/// Accepts anything the resolver understands: a channel ID, a handle
/// (with or without `@`), or a channel URL.
pub async fn get_channel(
    State(state): State<AppState>,
    Path(identifier): Path<String>,
) -> Result<Json<ChannelMetadata>, AppError> {
    let metadata = state.chat_service.channel_metadata(&identifier).await?;
    Ok(Json((*metadata).clone()))
}

/// GET /api/v1/channels/search - Search channels by name.
pub async fn search_channels(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ChannelSearchHit>>, AppError> {
    let hits = state.youtube.search_channels(&query.q, query.limit).await?;
    Ok(Json(hits))
}
