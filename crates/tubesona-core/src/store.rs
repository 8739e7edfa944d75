//! In-memory conversation store.
//!
//! One conversation per channel per process, identified deterministically
//! by a SHA-256 derivation of the channel key. Message history is
//! append-only; concurrent appends to one conversation are serialized by
//! the map's per-entry write guard.

use chrono::Utc;
use dashmap::DashMap;
use sha2::{Digest, Sha256};

use tubesona_types::channel::ChannelKey;
use tubesona_types::chat::{
    ChatMessage, Conversation, ConversationContext, ConversationId, MessageRole,
};

/// Derive the conversation identity for a channel.
///
/// `conv_` plus the first 16 bytes of SHA-256(channel_key), hex-encoded.
/// Deterministic and collision-free for practical purposes, so distinct
/// channels can never share a conversation.
pub fn conversation_id(channel_key: &ChannelKey) -> ConversationId {
    let digest = Sha256::digest(channel_key.as_str().as_bytes());
    let hex = format!("{digest:x}");
    ConversationId(format!("conv_{}", &hex[..32]))
}

/// Process-lifetime store of conversations keyed by [`ConversationId`].
#[derive(Default)]
pub struct ConversationStore {
    conversations: DashMap<ConversationId, Conversation>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the conversation id for `channel_key`, creating the
    /// conversation on first call.
    ///
    /// `context` is the snapshot taken from the metadata cache; it is
    /// stored once at creation and never re-synced. Later calls for the
    /// same channel ignore `context` and return the existing id.
    pub fn get_or_create(
        &self,
        channel_key: &ChannelKey,
        context: ConversationContext,
    ) -> ConversationId {
        let id = conversation_id(channel_key);
        self.conversations.entry(id.clone()).or_insert_with(|| Conversation {
            id: id.clone(),
            channel_key: channel_key.clone(),
            started_at: Utc::now(),
            messages: Vec::new(),
            context,
        });
        id
    }

    /// Append a message to a conversation's history.
    ///
    /// The entry's write guard serializes concurrent appends, so append
    /// order is well-defined per conversation. Returns false if the
    /// conversation does not exist.
    pub fn append_message(&self, id: &ConversationId, role: MessageRole, content: String) -> bool {
        match self.conversations.get_mut(id) {
            Some(mut conversation) => {
                conversation.messages.push(ChatMessage {
                    role,
                    content,
                    created_at: Utc::now(),
                });
                true
            }
            None => false,
        }
    }

    /// Clone out a conversation for read-side use (assembly, API reads).
    pub fn snapshot(&self, id: &ConversationId) -> Option<Conversation> {
        self.conversations.get(id).map(|c| c.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversation_id_is_deterministic() {
        let key = ChannelKey::from("UC_test123");
        assert_eq!(conversation_id(&key), conversation_id(&key));
    }

    #[test]
    fn test_conversation_id_distinct_per_channel() {
        let a = conversation_id(&ChannelKey::from("UC_alpha"));
        let b = conversation_id(&ChannelKey::from("UC_beta"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_conversation_id_shape() {
        let id = conversation_id(&ChannelKey::from("UC_test123"));
        let hex = id.as_str().strip_prefix("conv_").unwrap();
        assert_eq!(hex.len(), 32);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_get_or_create_returns_same_conversation() {
        let store = ConversationStore::new();
        let key = ChannelKey::from("UCchan");

        let first = store.get_or_create(&key, ConversationContext::default());
        let second = store.get_or_create(
            &key,
            ConversationContext {
                channel_title: "Ignored".to_string(),
                ..Default::default()
            },
        );

        assert_eq!(first, second);
        // The original snapshot is kept; creation-time context is not re-synced.
        let conversation = store.snapshot(&first).unwrap();
        assert_eq!(conversation.context.channel_title, "");
    }

    #[test]
    fn test_append_preserves_order() {
        let store = ConversationStore::new();
        let id = store.get_or_create(&ChannelKey::from("UCchan"), ConversationContext::default());

        assert!(store.append_message(&id, MessageRole::User, "one".to_string()));
        assert!(store.append_message(&id, MessageRole::Assistant, "two".to_string()));
        assert!(store.append_message(&id, MessageRole::User, "three".to_string()));

        let conversation = store.snapshot(&id).unwrap();
        let contents: Vec<&str> = conversation
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, ["one", "two", "three"]);
        assert_eq!(conversation.messages[1].role, MessageRole::Assistant);
    }

    #[test]
    fn test_append_to_unknown_conversation_is_rejected() {
        let store = ConversationStore::new();
        let id = ConversationId::from("conv_missing");
        assert!(!store.append_message(&id, MessageRole::User, "hello".to_string()));
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let store = ConversationStore::new();
        let id = store.get_or_create(&ChannelKey::from("UCchan"), ConversationContext::default());
        let before = store.snapshot(&id).unwrap();
        store.append_message(&id, MessageRole::User, "later".to_string());
        assert!(before.messages.is_empty());
        assert_eq!(store.snapshot(&id).unwrap().messages.len(), 1);
    }
}
