//! Conversation and message types for Tubesona.
//!
//! A conversation binds a channel to an append-only message history and a
//! context snapshot taken from the metadata cache at creation time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::channel::{ChannelKey, ChannelMetadata, TranscriptSample, VideoSummary};

/// Role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Stable identity of a conversation.
///
/// Derived deterministically from the channel key -- one live conversation
/// per channel per process. The derivation is collision-free for practical
/// purposes (SHA-256 based), so distinct channels never share a
/// conversation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ConversationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A single message within a conversation.
///
/// Ordering is append order, which is the sole consistency guarantee.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A prior turn supplied by a stateless client alongside its request.
///
/// Prepended to the stored history when the prompt context is assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: MessageRole,
    pub content: String,
}

/// Per-conversation snapshot of channel context.
///
/// Copied from the metadata cache entry when the conversation is created
/// and never re-synced afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationContext {
    pub channel_title: String,
    pub channel_description: String,
    /// Bounded prefix of the channel's recent uploads (first 5).
    pub videos: Vec<VideoSummary>,
    pub transcript_samples: Vec<TranscriptSample>,
}

/// Number of recent videos carried into a conversation's context snapshot.
pub const CONTEXT_VIDEO_LIMIT: usize = 5;

impl ConversationContext {
    /// Build a context snapshot from a cached metadata entry.
    pub fn from_metadata(metadata: &ChannelMetadata) -> Self {
        Self {
            channel_title: metadata.title.clone(),
            channel_description: metadata.description.clone(),
            videos: metadata
                .videos
                .iter()
                .take(CONTEXT_VIDEO_LIMIT)
                .cloned()
                .collect(),
            transcript_samples: metadata.transcript_samples.clone(),
        }
    }
}

/// A conversation between a user and a channel persona.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub channel_key: ChannelKey,
    pub started_at: DateTime<Utc>,
    /// Append-only message history. Grows unboundedly in the store; only a
    /// bounded tail is used per generation call.
    pub messages: Vec<ChatMessage>,
    pub context: ConversationContext,
}

/// Outcome of one orchestrated chat turn.
///
/// On the degraded path `channel_info` is `None`, `error` carries the
/// failure detail, and `response` is a fixed apology -- the orchestrator
/// never propagates an error to the transport layer.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub conversation_id: String,
    pub response: String,
    pub channel_info: Option<ChannelMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let s = role.to_string();
            let parsed: MessageRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_serde() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
        let parsed: MessageRole = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, MessageRole::Assistant);
    }

    #[test]
    fn test_message_role_rejects_unknown() {
        assert!("moderator".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_context_from_metadata_bounds_videos() {
        let videos: Vec<VideoSummary> = (0..8)
            .map(|i| VideoSummary {
                id: format!("v{i}"),
                title: format!("Video {i}"),
                description: String::new(),
                published_at: String::new(),
                thumbnail: String::new(),
            })
            .collect();
        let metadata = ChannelMetadata {
            id: "UC1".to_string(),
            title: "Chan".to_string(),
            description: "Desc".to_string(),
            thumbnail: String::new(),
            subscriber_count: "0".to_string(),
            video_count: "8".to_string(),
            view_count: "0".to_string(),
            videos,
            transcript_samples: Vec::new(),
        };

        let context = ConversationContext::from_metadata(&metadata);
        assert_eq!(context.channel_title, "Chan");
        assert_eq!(context.videos.len(), CONTEXT_VIDEO_LIMIT);
        assert_eq!(context.videos[0].id, "v0");
    }

    #[test]
    fn test_chat_reply_error_field_omitted_when_none() {
        let reply = ChatReply {
            conversation_id: "conv_x".to_string(),
            response: "hi".to_string(),
            channel_info: None,
            error: None,
        };
        let json = serde_json::to_string(&reply).unwrap();
        assert!(!json.contains("\"error\""));
    }
}
