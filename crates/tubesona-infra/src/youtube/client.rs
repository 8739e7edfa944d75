//! YouTubeClient -- concrete [`MetadataProvider`] implementation.
//!
//! Talks to the YouTube Data API v3 (`/channels`, `/search`,
//! `/playlistItems`) and to the public timedtext endpoint for
//! transcripts. The API key is wrapped in [`secrecy::SecretString`] and
//! only exposed when building request query strings.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use tubesona_core::provider::MetadataProvider;
use tubesona_types::channel::{ChannelFetch, ChannelSearchHit, VideoSummary};
use tubesona_types::error::{LookupError, TranscriptError};

use super::types::{
    ChannelListResponse, PlaylistItemsResponse, SearchListResponse, TimedTextResponse,
};

/// Number of recent uploads fetched per channel.
const RECENT_VIDEO_LIMIT: u32 = 10;

/// YouTube Data API v3 client.
///
/// Cloneable: the inner reqwest client is reference-counted, so clones
/// share one connection pool.
#[derive(Clone)]
pub struct YouTubeClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    timedtext_url: String,
}

// YouTubeClient intentionally does NOT derive Debug so the API key can
// never end up in logs or panic output.

impl YouTubeClient {
    /// Create a new client against the production endpoints.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://www.googleapis.com/youtube/v3".to_string(),
            timedtext_url: "https://video.google.com/timedtext".to_string(),
        }
    }

    /// Override the Data API base URL (for tests and proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Override the timedtext endpoint URL (for tests and proxies).
    pub fn with_timedtext_url(mut self, timedtext_url: String) -> Self {
        self.timedtext_url = timedtext_url;
        self
    }

    /// Search for channels matching a freeform query.
    pub async fn search_channels(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<ChannelSearchHit>, LookupError> {
        let max = max_results.to_string();
        let response: SearchListResponse = self
            .get_json(
                &format!("{}/search", self.base_url),
                &[
                    ("part", "snippet"),
                    ("q", query),
                    ("type", "channel"),
                    ("maxResults", &max),
                    ("key", self.api_key.expose_secret()),
                ],
            )
            .await?;

        Ok(response
            .items
            .into_iter()
            .filter(|item| !item.id.channel_id.is_empty())
            .map(|item| ChannelSearchHit {
                id: item.id.channel_id,
                title: item.snippet.title,
                description: item.snippet.description,
                thumbnail: item.snippet.thumbnails.high.url,
            })
            .collect())
    }

    /// Resolve a handle or freeform name to a channel id via search.
    async fn resolve_channel_id(&self, handle: &str) -> Result<String, LookupError> {
        let hits = self.search_channels(handle, 1).await?;
        match hits.into_iter().next() {
            Some(hit) => Ok(hit.id),
            None => Err(LookupError::NotFound(handle.to_string())),
        }
    }

    /// Fetch a channel's recent uploads from its uploads playlist.
    ///
    /// Degrades to an empty list on any failure -- a channel without a
    /// readable uploads playlist still resolves.
    async fn fetch_recent_videos(&self, playlist_id: &str) -> Vec<VideoSummary> {
        let max = RECENT_VIDEO_LIMIT.to_string();
        let result: Result<PlaylistItemsResponse, LookupError> = self
            .get_json(
                &format!("{}/playlistItems", self.base_url),
                &[
                    ("part", "snippet,contentDetails"),
                    ("playlistId", playlist_id),
                    ("maxResults", &max),
                    ("key", self.api_key.expose_secret()),
                ],
            )
            .await;

        match result {
            Ok(response) => response
                .items
                .into_iter()
                .filter(|item| !item.content_details.video_id.is_empty())
                .map(|item| VideoSummary {
                    id: item.content_details.video_id,
                    title: item.snippet.title,
                    description: item.snippet.description,
                    published_at: item.snippet.published_at,
                    thumbnail: item.snippet.thumbnails.high.url,
                })
                .collect(),
            Err(err) => {
                warn!(playlist_id, error = %err, "recent videos fetch failed, continuing without");
                Vec::new()
            }
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| LookupError::Provider(format!("http request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Provider(format!(
                "youtube api returned status {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| LookupError::Provider(format!("malformed youtube api response: {e}")))
    }
}

/// Trim whitespace and a leading `@`; `None` when nothing remains.
fn normalized(identifier: &str) -> Option<&str> {
    let identifier = identifier.trim();
    let identifier = identifier.strip_prefix('@').unwrap_or(identifier);
    if identifier.is_empty() {
        None
    } else {
        Some(identifier)
    }
}

impl MetadataProvider for YouTubeClient {
    async fn fetch_channel(&self, identifier: &str) -> Result<ChannelFetch, LookupError> {
        let Some(identifier) = normalized(identifier) else {
            return Err(LookupError::NotFound(identifier.trim().to_string()));
        };

        // Channel ids start with "UC"; anything else is a handle or name
        // that goes through search resolution first.
        let channel_id = if identifier.starts_with("UC") {
            identifier.to_string()
        } else {
            self.resolve_channel_id(identifier).await?
        };

        let response: ChannelListResponse = self
            .get_json(
                &format!("{}/channels", self.base_url),
                &[
                    ("part", "snippet,statistics,contentDetails"),
                    ("id", &channel_id),
                    ("key", self.api_key.expose_secret()),
                ],
            )
            .await?;

        let Some(item) = response.items.into_iter().next() else {
            return Err(LookupError::NotFound(identifier.to_string()));
        };

        let uploads = item.content_details.related_playlists.uploads;
        let videos = if uploads.is_empty() {
            Vec::new()
        } else {
            self.fetch_recent_videos(&uploads).await
        };

        Ok(ChannelFetch {
            id: item.id,
            title: item.snippet.title,
            description: item.snippet.description,
            thumbnail: item.snippet.thumbnails.high.url,
            subscriber_count: item.statistics.subscriber_count,
            video_count: item.statistics.video_count,
            view_count: item.statistics.view_count,
            videos,
        })
    }

    async fn fetch_transcript(&self, video_id: &str) -> Result<String, TranscriptError> {
        let response = self
            .client
            .get(&self.timedtext_url)
            .query(&[("v", video_id), ("lang", "en"), ("fmt", "json3")])
            .send()
            .await
            .map_err(|e| TranscriptError::Fetch {
                video_id: video_id.to_string(),
                detail: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(TranscriptError::Unavailable(video_id.to_string()));
        }

        let body = response.text().await.map_err(|e| TranscriptError::Fetch {
            video_id: video_id.to_string(),
            detail: e.to_string(),
        })?;

        match parse_transcript(&body) {
            Some(text) => Ok(text),
            None => Err(TranscriptError::Unavailable(video_id.to_string())),
        }
    }
}

/// Join the caption segments of a timedtext json3 body into one string.
///
/// Returns `None` for an empty body, an unparseable body, or a body with
/// no text segments -- the timedtext endpoint answers 200 with an empty
/// body when a video has no captions.
fn parse_transcript(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    let response: TimedTextResponse = serde_json::from_str(body).ok()?;

    let text = response
        .events
        .iter()
        .flat_map(|event| event.segs.iter())
        .map(|seg| seg.utf8.trim())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if text.is_empty() { None } else { Some(text) }
}
