//! Chat service orchestrating one conversational turn end to end.
//!
//! ChatService owns the metadata cache and conversation store and
//! coordinates resolve -> populate -> create -> append -> assemble ->
//! generate -> append. External failures degrade to a user-visible
//! fallback reply; the service never returns an error to the transport
//! layer for the chat path.

use std::sync::Arc;

use tracing::{info, warn};

use tubesona_types::channel::{ChannelKey, ChannelMetadata};
use tubesona_types::chat::{
    ChatReply, Conversation, ConversationContext, ConversationId, HistoryEntry, MessageRole,
};
use tubesona_types::error::LookupError;

use crate::cache::MetadataCache;
use crate::context;
use crate::llm::CompletionProvider;
use crate::provider::MetadataProvider;
use crate::resolver;
use crate::store::{self, ConversationStore};

/// Fixed reply text for a degraded chat turn.
const DEGRADED_REPLY: &str =
    "I'm having trouble connecting to the YouTuber's content. Please try again later.";

/// Conversation id reported when the reference resolves to an empty key
/// and no identity can be derived.
const UNRESOLVED_CONVERSATION: &str = "conv_unresolved";

/// Orchestrates chat turns against a channel persona.
///
/// Generic over the metadata and completion providers so the core stays
/// free of network crates; tubesona-api pins the generics to the infra
/// implementations.
pub struct ChatService<M, G> {
    cache: MetadataCache<M>,
    store: ConversationStore,
    generator: G,
}

impl<M: MetadataProvider, G: CompletionProvider> ChatService<M, G> {
    /// Create a chat service owning a fresh cache and store.
    pub fn new(metadata_provider: M, generator: G) -> Self {
        Self {
            cache: MetadataCache::new(metadata_provider),
            store: ConversationStore::new(),
            generator,
        }
    }

    /// Process one user message and produce an in-character reply.
    ///
    /// Any failure up to prompt assembly short-circuits to a degraded
    /// reply carrying the failure detail in `error`; the call itself
    /// never fails. Generation-provider failures degrade inside the
    /// provider (fixed fallback text) and are not retried here.
    pub async fn process_message(
        &self,
        reference: &str,
        user_message: &str,
        external_history: &[HistoryEntry],
    ) -> ChatReply {
        let key = resolver::resolve(reference);
        match self.chat_turn(&key, user_message, external_history).await {
            Ok(reply) => reply,
            Err(err) => {
                warn!(channel = %key, error = %err, "chat turn degraded");
                let conversation_id = if key.is_empty() {
                    UNRESOLVED_CONVERSATION.to_string()
                } else {
                    store::conversation_id(&key).0
                };
                ChatReply {
                    conversation_id,
                    response: DEGRADED_REPLY.to_string(),
                    channel_info: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn chat_turn(
        &self,
        key: &ChannelKey,
        user_message: &str,
        external_history: &[HistoryEntry],
    ) -> Result<ChatReply, LookupError> {
        let metadata = self.cache.get_or_populate(key).await?;

        let id = self
            .store
            .get_or_create(key, ConversationContext::from_metadata(&metadata));
        self.store
            .append_message(&id, MessageRole::User, user_message.to_string());

        let snapshot = self
            .store
            .snapshot(&id)
            .ok_or_else(|| LookupError::Provider("conversation missing after creation".to_string()))?;
        let assembled = context::assemble(&snapshot, external_history);

        let response = self
            .generator
            .complete(
                &assembled.style,
                &assembled.summary,
                &assembled.history,
                &assembled.prompt,
            )
            .await;

        self.store
            .append_message(&id, MessageRole::Assistant, response.clone());
        info!(channel = %key, conversation = %id, "chat turn completed");

        Ok(ChatReply {
            conversation_id: id.0.clone(),
            response,
            channel_info: Some((*metadata).clone()),
            error: None,
        })
    }

    /// Access the metadata cache.
    pub fn cache(&self) -> &MetadataCache<M> {
        &self.cache
    }

    /// Look up a conversation by id for the read-only API surface.
    pub fn conversation(&self, id: &str) -> Option<Conversation> {
        self.store.snapshot(&ConversationId::from(id))
    }

    /// Resolve a reference and return its (possibly freshly populated)
    /// channel metadata. Used by the direct channel lookup endpoint,
    /// where `NotFound`/`Provider` map to 404/500.
    pub async fn channel_metadata(
        &self,
        reference: &str,
    ) -> Result<Arc<ChannelMetadata>, LookupError> {
        self.cache.get_or_populate(&resolver::resolve(reference)).await
    }
}
