//! Per-channel metadata cache.
//!
//! Populated at most once per [`ChannelKey`] via the metadata provider and
//! kept for the process lifetime -- no refresh, no eviction. Transcript
//! sampling happens here, at population time, and is strictly best-effort:
//! a failed sample is omitted, never fatal.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use tubesona_types::channel::{ChannelKey, ChannelMetadata, TranscriptSample, VideoSummary};
use tubesona_types::error::LookupError;

use crate::provider::MetadataProvider;

/// Number of recent videos whose transcripts are sampled per channel.
const TRANSCRIPT_SAMPLE_LIMIT: usize = 3;

/// Character budget per stored transcript excerpt.
const TRANSCRIPT_EXCERPT_CHARS: usize = 2000;

/// Process-lifetime cache of channel metadata keyed by [`ChannelKey`].
///
/// Concurrent first-access for the same key may populate twice; the last
/// writer wins and the values are equivalent, so no per-key lock is taken
/// around population. Failed populations are never cached -- the next call
/// for the same key retries the provider.
pub struct MetadataCache<P> {
    provider: P,
    entries: DashMap<ChannelKey, Arc<ChannelMetadata>>,
}

impl<P: MetadataProvider> MetadataCache<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            entries: DashMap::new(),
        }
    }

    /// Access the underlying metadata provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Return the cached metadata for `key`, populating it on first access.
    ///
    /// On a miss this fetches the channel (with its recent uploads) and
    /// samples transcripts for the first [`TRANSCRIPT_SAMPLE_LIMIT`]
    /// videos. Each sample attempt is independent; failures are logged and
    /// skipped.
    pub async fn get_or_populate(
        &self,
        key: &ChannelKey,
    ) -> Result<Arc<ChannelMetadata>, LookupError> {
        if let Some(entry) = self.entries.get(key) {
            debug!(channel = %key, "metadata cache hit");
            return Ok(Arc::clone(entry.value()));
        }

        if key.is_empty() {
            return Err(LookupError::NotFound(String::new()));
        }

        let fetch = self.provider.fetch_channel(key.as_str()).await?;
        let samples = self.sample_transcripts(&fetch.videos).await;
        debug!(
            channel = %key,
            videos = fetch.videos.len(),
            samples = samples.len(),
            "metadata cache populated"
        );

        let metadata = Arc::new(fetch.into_metadata(samples));
        self.entries.insert(key.clone(), Arc::clone(&metadata));
        Ok(metadata)
    }

    /// Sample transcripts for the first few videos, skipping failures.
    async fn sample_transcripts(&self, videos: &[VideoSummary]) -> Vec<TranscriptSample> {
        let mut samples = Vec::new();
        for video in videos.iter().take(TRANSCRIPT_SAMPLE_LIMIT) {
            match self.provider.fetch_transcript(&video.id).await {
                Ok(text) if !text.is_empty() => samples.push(TranscriptSample {
                    video_title: video.title.clone(),
                    excerpt: truncate_chars(&text, TRANSCRIPT_EXCERPT_CHARS),
                }),
                Ok(_) => debug!(video_id = %video.id, "empty transcript, skipping sample"),
                Err(err) => {
                    warn!(video_id = %video.id, error = %err, "transcript unavailable, skipping sample");
                }
            }
        }
        samples
    }
}

/// Truncate to a character budget without splitting a code point.
fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        text.chars().take(limit).collect()
    }
}
