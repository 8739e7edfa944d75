//! Channel metadata types for Tubesona.
//!
//! A channel is identified by a [`ChannelKey`] derived from whatever
//! reference the user supplied (raw ID, handle, or URL). Metadata is
//! fetched once per key and cached for the process lifetime.

use serde::{Deserialize, Serialize};

use std::fmt;

/// Canonical cache key for a channel.
///
/// Derived deterministically from a user-supplied reference by the
/// resolver: the same reference (modulo surface formatting) always maps
/// to the same key within a process run. The key is not guaranteed to
/// name a real channel -- the metadata provider rejects unknown keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelKey(pub String);

impl ChannelKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChannelKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ChannelKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A single video in a channel's recent uploads.
///
/// Ordered by upload recency as returned by the provider. Consumers only
/// take bounded prefixes (first 3-5), never the whole list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    /// RFC 3339 timestamp string as returned by the provider.
    pub published_at: String,
    pub thumbnail: String,
}

/// A bounded excerpt of one video's transcript.
///
/// At most 3 samples are kept per channel, computed once at metadata
/// population time. Videos whose transcript fetch fails are simply absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptSample {
    pub video_title: String,
    /// Transcript text truncated to a fixed length at population time.
    pub excerpt: String,
}

/// Raw channel data as returned by the metadata provider.
///
/// Carries everything except transcript samples, which the metadata cache
/// gathers separately (transcript retrieval is best-effort and must not
/// fail the channel fetch).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelFetch {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    /// Provider-supplied count, kept as a string (the upstream API returns
    /// counts as strings).
    pub subscriber_count: String,
    pub video_count: String,
    pub view_count: String,
    /// Recent uploads, newest first, bounded to 10 by the provider.
    pub videos: Vec<VideoSummary>,
}

impl ChannelFetch {
    /// Attach transcript samples, producing the cacheable metadata record.
    pub fn into_metadata(self, transcript_samples: Vec<TranscriptSample>) -> ChannelMetadata {
        ChannelMetadata {
            id: self.id,
            title: self.title,
            description: self.description,
            thumbnail: self.thumbnail,
            subscriber_count: self.subscriber_count,
            video_count: self.video_count,
            view_count: self.view_count,
            videos: self.videos,
            transcript_samples,
        }
    }
}

/// Fully assembled channel metadata as stored in the cache.
///
/// Immutable once inserted: there is no refresh or invalidation within a
/// process run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMetadata {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub subscriber_count: String,
    pub video_count: String,
    pub view_count: String,
    pub videos: Vec<VideoSummary>,
    #[serde(default)]
    pub transcript_samples: Vec<TranscriptSample>,
}

/// One result from a channel search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSearchHit {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
}
