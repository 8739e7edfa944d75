//! MetadataProvider trait definition.
//!
//! The abstraction over the external channel metadata/transcript source.
//! Implementations live in tubesona-infra (e.g., `YouTubeClient`).
//! Uses native async fn in traits (RPITIT, Rust 2024 edition).

use tubesona_types::channel::ChannelFetch;
use tubesona_types::error::{LookupError, TranscriptError};

/// External source of channel metadata and video transcripts.
pub trait MetadataProvider: Send + Sync {
    /// Fetch a channel's metadata and its recent uploads (bounded to 10).
    ///
    /// Fails with [`LookupError::NotFound`] when the identifier does not
    /// resolve to a real channel (including an empty identifier), and
    /// [`LookupError::Provider`] on any other failure. The recent-videos
    /// sub-fetch degrades to an empty list instead of failing the call.
    fn fetch_channel(
        &self,
        identifier: &str,
    ) -> impl std::future::Future<Output = Result<ChannelFetch, LookupError>> + Send;

    /// Fetch the transcript text for a single video.
    ///
    /// Fails with [`TranscriptError::Unavailable`] when no transcript
    /// exists in any language. Callers treat any error as "omit this
    /// sample" -- transcript failures never escalate.
    fn fetch_transcript(
        &self,
        video_id: &str,
    ) -> impl std::future::Future<Output = Result<String, TranscriptError>> + Send;
}
