//! Prompt context assembly.
//!
//! Turns a conversation plus any client-supplied prior turns into the
//! bounded inputs handed to the completion provider: a capped history
//! tail, the synthesized style description, a channel summary, and the
//! current prompt. Pure with respect to its inputs.

use tubesona_types::chat::{Conversation, ConversationContext, HistoryEntry};

use crate::llm::HISTORY_LIMIT;
use crate::style;

/// Number of recent video titles named in the channel summary.
const SUMMARY_VIDEO_LIMIT: usize = 3;

/// Everything the completion provider needs for one generation call.
#[derive(Debug, Clone)]
pub struct AssembledPrompt {
    /// Prior turns, oldest first, capped at [`HISTORY_LIMIT`] entries.
    pub history: Vec<HistoryEntry>,
    /// Synthesized style description of the channel persona.
    pub style: String,
    /// Channel title/description/recent-video summary lines.
    pub summary: String,
    /// The user message being answered (the most recently appended
    /// message, which the orchestrator appends before assembling).
    pub prompt: String,
}

/// Assemble the bounded generation context for a conversation.
///
/// History is `external_history` followed by the conversation's stored
/// messages excluding the current prompt, then truncated to the last
/// [`HISTORY_LIMIT`] entries -- oldest dropped first, chronological order
/// preserved. Does not mutate the conversation.
pub fn assemble(conversation: &Conversation, external_history: &[HistoryEntry]) -> AssembledPrompt {
    let (prompt, stored) = match conversation.messages.split_last() {
        Some((current, rest)) => (current.content.clone(), rest),
        None => (String::new(), &[][..]),
    };

    let mut history: Vec<HistoryEntry> = external_history
        .iter()
        .cloned()
        .chain(stored.iter().map(|m| HistoryEntry {
            role: m.role,
            content: m.content.clone(),
        }))
        .collect();
    if history.len() > HISTORY_LIMIT {
        history.drain(..history.len() - HISTORY_LIMIT);
    }

    AssembledPrompt {
        history,
        style: style::synthesize(&conversation.context),
        summary: summarize(&conversation.context),
        prompt,
    }
}

/// Newline-joined summary naming the channel and its recent uploads.
///
/// Each line is emitted only when the underlying field is non-empty.
fn summarize(context: &ConversationContext) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !context.channel_title.is_empty() {
        parts.push(format!("Channel title: {}", context.channel_title));
    }
    if !context.channel_description.is_empty() {
        parts.push(format!(
            "Channel description: {}",
            context.channel_description
        ));
    }

    let titles: Vec<&str> = context
        .videos
        .iter()
        .take(SUMMARY_VIDEO_LIMIT)
        .map(|v| v.title.as_str())
        .filter(|t| !t.is_empty())
        .collect();
    if !titles.is_empty() {
        parts.push(format!("Recent videos: {}", titles.join(", ")));
    }

    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use tubesona_types::channel::{ChannelKey, VideoSummary};
    use tubesona_types::chat::{ChatMessage, ConversationId, MessageRole};

    fn message(role: MessageRole, content: &str) -> ChatMessage {
        ChatMessage {
            role,
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    fn entry(role: MessageRole, content: &str) -> HistoryEntry {
        HistoryEntry {
            role,
            content: content.to_string(),
        }
    }

    fn conversation(messages: Vec<ChatMessage>) -> Conversation {
        Conversation {
            id: ConversationId::from("conv_test"),
            channel_key: ChannelKey::from("UCtest"),
            started_at: Utc::now(),
            messages,
            context: ConversationContext::default(),
        }
    }

    #[test]
    fn test_prompt_is_latest_message_and_excluded_from_history() {
        let convo = conversation(vec![
            message(MessageRole::User, "first"),
            message(MessageRole::Assistant, "reply"),
            message(MessageRole::User, "current question"),
        ]);

        let assembled = assemble(&convo, &[]);
        assert_eq!(assembled.prompt, "current question");
        assert_eq!(assembled.history.len(), 2);
        assert_eq!(assembled.history[0].content, "first");
        assert_eq!(assembled.history[1].content, "reply");
    }

    #[test]
    fn test_external_history_precedes_stored() {
        let convo = conversation(vec![
            message(MessageRole::User, "stored"),
            message(MessageRole::User, "current"),
        ]);
        let external = vec![entry(MessageRole::User, "from client")];

        let assembled = assemble(&convo, &external);
        let contents: Vec<&str> = assembled.history.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, ["from client", "stored"]);
    }

    #[test]
    fn test_history_capped_at_six_dropping_oldest() {
        let mut messages = Vec::new();
        for i in 0..10 {
            messages.push(message(MessageRole::User, &format!("m{i}")));
        }
        messages.push(message(MessageRole::User, "current"));
        let convo = conversation(messages);

        let assembled = assemble(&convo, &[entry(MessageRole::User, "ext")]);
        assert_eq!(assembled.history.len(), HISTORY_LIMIT);
        // 11 candidates (1 external + 10 stored); the oldest 5 are dropped.
        let contents: Vec<&str> = assembled.history.iter().map(|e| e.content.as_str()).collect();
        assert_eq!(contents, ["m4", "m5", "m6", "m7", "m8", "m9"]);
    }

    #[test]
    fn test_empty_conversation_assembles_empty() {
        let assembled = assemble(&conversation(Vec::new()), &[]);
        assert_eq!(assembled.prompt, "");
        assert!(assembled.history.is_empty());
        assert_eq!(assembled.style, "");
        assert_eq!(assembled.summary, "");
    }

    #[test]
    fn test_summary_names_title_description_and_videos() {
        let mut convo = conversation(vec![message(MessageRole::User, "q")]);
        convo.context.channel_title = "Test Channel".to_string();
        convo.context.channel_description = "About testing".to_string();
        convo.context.videos = (1..=4)
            .map(|i| VideoSummary {
                id: format!("v{i}"),
                title: format!("Video {i}"),
                description: String::new(),
                published_at: String::new(),
                thumbnail: String::new(),
            })
            .collect();

        let assembled = assemble(&convo, &[]);
        assert_eq!(
            assembled.summary,
            "Channel title: Test Channel\n\
             Channel description: About testing\n\
             Recent videos: Video 1, Video 2, Video 3"
        );
    }

    #[test]
    fn test_assemble_does_not_mutate_conversation() {
        let convo = conversation(vec![message(MessageRole::User, "q")]);
        let before = convo.messages.len();
        let _ = assemble(&convo, &[entry(MessageRole::User, "x")]);
        assert_eq!(convo.messages.len(), before);
    }
}
