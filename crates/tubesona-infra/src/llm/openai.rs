//! OpenAiCompletionProvider -- concrete [`CompletionProvider`] backed by
//! the OpenAI chat completions API via [`async_openai`].
//!
//! Owns the degrade contract required by the orchestrator: any internal
//! failure (request build, network, empty choice) is logged and swallowed
//! into a fixed fallback reply. The orchestrator never sees an error and
//! never retries.

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionRequestAssistantMessage, ChatCompletionRequestAssistantMessageContent,
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
    ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessage,
    ChatCompletionRequestUserMessageContent, CreateChatCompletionRequest,
};
use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use tubesona_core::llm::{CompletionProvider, HISTORY_LIMIT};
use tubesona_types::chat::{HistoryEntry, MessageRole};
use tubesona_types::config::GenerationConfig;

/// Fixed reply when generation fails for any reason.
const GENERATION_FALLBACK: &str =
    "I'm having trouble generating a response right now. Please try again later.";

/// OpenAI chat-completion provider.
pub struct OpenAiCompletionProvider {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

// OpenAiCompletionProvider intentionally does NOT derive Debug to prevent
// accidental exposure of the API key inside the async-openai client.

impl OpenAiCompletionProvider {
    /// Create a provider from an API key and generation settings.
    pub fn new(api_key: &SecretString, generation: &GenerationConfig) -> Self {
        let config = OpenAIConfig::new().with_api_key(api_key.expose_secret());
        Self {
            client: Client::with_config(config),
            model: generation.model.clone(),
            temperature: generation.temperature,
            max_tokens: generation.max_tokens,
        }
    }

    fn build_request(
        &self,
        style_context: &str,
        summary: &str,
        history: &[HistoryEntry],
        prompt: &str,
    ) -> CreateChatCompletionRequest {
        let mut messages: Vec<ChatCompletionRequestMessage> =
            vec![ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessage {
                    content: ChatCompletionRequestSystemMessageContent::Text(system_prompt(
                        style_context,
                        summary,
                    )),
                    name: None,
                },
            )];

        // Cap history to the most recent entries; the assembler does the
        // same upstream, so this is the provider honoring its own contract
        // for callers that skip assembly.
        let tail_start = history.len().saturating_sub(HISTORY_LIMIT);
        for entry in &history[tail_start..] {
            messages.push(history_message(entry));
        }

        messages.push(ChatCompletionRequestMessage::User(
            ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(prompt.to_string()),
                name: None,
            },
        ));

        CreateChatCompletionRequest {
            model: self.model.clone(),
            messages,
            max_completion_tokens: Some(self.max_tokens),
            temperature: Some(self.temperature as f32),
            ..Default::default()
        }
    }
}

fn history_message(entry: &HistoryEntry) -> ChatCompletionRequestMessage {
    match entry.role {
        MessageRole::User => {
            ChatCompletionRequestMessage::User(ChatCompletionRequestUserMessage {
                content: ChatCompletionRequestUserMessageContent::Text(entry.content.clone()),
                name: None,
            })
        }
        MessageRole::Assistant => {
            #[allow(deprecated)]
            ChatCompletionRequestMessage::Assistant(ChatCompletionRequestAssistantMessage {
                content: Some(ChatCompletionRequestAssistantMessageContent::Text(
                    entry.content.clone(),
                )),
                refusal: None,
                name: None,
                audio: None,
                tool_calls: None,
                function_call: None,
            })
        }
    }
}

/// Persona instructions plus whatever channel context is available.
fn system_prompt(style_context: &str, summary: &str) -> String {
    let mut prompt = String::from(
        "You are an AI that mimics the style and personality of a specific YouTuber. \
         Respond to the user's questions in a way that matches the YouTuber's tone, \
         vocabulary, and speaking patterns. Be engaging and natural in your responses.\n\n",
    );

    if !style_context.is_empty() {
        prompt.push_str(&format!("YouTuber's style and background: {style_context}\n\n"));
    }
    if !summary.is_empty() {
        prompt.push_str(&format!("Additional context about the YouTuber: {summary}\n\n"));
    }

    prompt.push_str(
        "Remember to keep your responses concise and in the first person perspective. \
         If you don't know the answer to something, it's okay to say so in a way that \
         matches the YouTuber's style.",
    );
    prompt
}

impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(
        &self,
        style_context: &str,
        summary: &str,
        history: &[HistoryEntry],
        prompt: &str,
    ) -> String {
        let request = self.build_request(style_context, summary, history, prompt);

        match self.client.chat().create(request).await {
            Ok(response) => {
                let content = response
                    .choices
                    .first()
                    .and_then(|c| c.message.content.clone())
                    .map(|c| c.trim().to_string())
                    .unwrap_or_default();
                if content.is_empty() {
                    warn!(model = %self.model, "completion returned no content, using fallback");
                    GENERATION_FALLBACK.to_string()
                } else {
                    content
                }
            }
            Err(err) => {
                warn!(model = %self.model, error = %err, "completion failed, using fallback");
                GENERATION_FALLBACK.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(role: MessageRole, content: &str) -> HistoryEntry {
        HistoryEntry {
            role,
            content: content.to_string(),
        }
    }

    fn provider() -> OpenAiCompletionProvider {
        OpenAiCompletionProvider::new(
            &SecretString::from("sk-test"),
            &GenerationConfig {
                model: "gpt-4o-mini".to_string(),
                temperature: 0.7,
                max_tokens: 1000,
            },
        )
    }

    #[test]
    fn test_system_prompt_includes_style_and_summary() {
        let prompt = system_prompt("very energetic", "Channel title: Test");
        assert!(prompt.contains("YouTuber's style and background: very energetic"));
        assert!(prompt.contains("Additional context about the YouTuber: Channel title: Test"));
        assert!(prompt.starts_with("You are an AI that mimics"));
        assert!(prompt.ends_with("matches the YouTuber's style."));
    }

    #[test]
    fn test_system_prompt_omits_empty_sections() {
        let prompt = system_prompt("", "");
        assert!(!prompt.contains("style and background"));
        assert!(!prompt.contains("Additional context"));
    }

    #[test]
    fn test_build_request_shape() {
        let history = vec![
            entry(MessageRole::User, "hi"),
            entry(MessageRole::Assistant, "hello!"),
        ];
        let request = provider().build_request("style", "summary", &history, "question");

        assert_eq!(request.model, "gpt-4o-mini");
        assert_eq!(request.max_completion_tokens, Some(1000));
        // system + 2 history + prompt
        assert_eq!(request.messages.len(), 4);
        assert!(matches!(
            request.messages[0],
            ChatCompletionRequestMessage::System(_)
        ));
        assert!(matches!(
            request.messages[2],
            ChatCompletionRequestMessage::Assistant(_)
        ));
        assert!(matches!(
            request.messages[3],
            ChatCompletionRequestMessage::User(_)
        ));
    }

    #[test]
    fn test_build_request_caps_history() {
        let history: Vec<HistoryEntry> = (0..10)
            .map(|i| entry(MessageRole::User, &format!("m{i}")))
            .collect();
        let request = provider().build_request("", "", &history, "now");

        // system + capped history + prompt
        assert_eq!(request.messages.len(), 1 + HISTORY_LIMIT + 1);
        // The oldest entries are the ones dropped.
        let first_history = &request.messages[1];
        match first_history {
            ChatCompletionRequestMessage::User(user) => match &user.content {
                ChatCompletionRequestUserMessageContent::Text(text) => {
                    assert_eq!(text, "m4");
                }
                other => panic!("unexpected content: {other:?}"),
            },
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
