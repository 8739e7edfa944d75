//! Application state wiring the services together.
//!
//! The chat service is generic over its providers; AppState pins the
//! generics to the concrete infra implementations and owns the single
//! per-process instance of each (no ambient globals).

use std::sync::Arc;

use tubesona_core::chat::ChatService;
use tubesona_infra::config::Settings;
use tubesona_infra::llm::OpenAiCompletionProvider;
use tubesona_infra::youtube::YouTubeClient;

/// Chat service generics pinned to the infra implementations.
pub type ConcreteChatService = ChatService<YouTubeClient, OpenAiCompletionProvider>;

/// Shared application state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub chat_service: Arc<ConcreteChatService>,
    /// Direct client handle for the search endpoint; clones share the
    /// connection pool with the chat service's provider.
    pub youtube: YouTubeClient,
}

impl AppState {
    /// Wire the services from resolved settings.
    pub fn from_settings(settings: &Settings) -> Self {
        let youtube = YouTubeClient::new(settings.youtube_api_key.clone());
        let generator = OpenAiCompletionProvider::new(&settings.openai_api_key, &settings.generation);
        let chat_service = ChatService::new(youtube.clone(), generator);

        Self {
            chat_service: Arc::new(chat_service),
            youtube,
        }
    }
}
