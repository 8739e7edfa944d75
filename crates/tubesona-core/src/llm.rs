//! CompletionProvider trait definition.
//!
//! The abstraction over the text-generation backend. Implementations live
//! in tubesona-infra (e.g., `OpenAiCompletionProvider`).
//!
//! `complete` is deliberately infallible at this interface: the provider
//! owns its own degrade contract and returns a fixed fallback string on
//! any internal failure. The orchestrator never retries it.

use tubesona_types::chat::HistoryEntry;

/// Maximum number of history entries a provider may send upstream.
pub const HISTORY_LIMIT: usize = 6;

/// Text-generation backend producing an in-character reply.
pub trait CompletionProvider: Send + Sync {
    /// Generate a reply to `prompt` in the persona described by
    /// `style_context`, with `summary` as additional channel context.
    ///
    /// Implementations cap `history` to the last [`HISTORY_LIMIT`] entries,
    /// respect their configured maximum output length, and on failure
    /// return a fixed fallback string rather than an error.
    fn complete(
        &self,
        style_context: &str,
        summary: &str,
        history: &[HistoryEntry],
        prompt: &str,
    ) -> impl std::future::Future<Output = String> + Send;
}
