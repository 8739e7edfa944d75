//! Wire types for the YouTube Data API v3 and the timedtext endpoint.
//!
//! Every field defaults when absent: the API omits keys freely (private
//! statistics, missing thumbnails), and a partial record is still usable.

use serde::Deserialize;

/// Response of `GET /channels`.
#[derive(Debug, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ChannelItem {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub snippet: Snippet,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default, rename = "contentDetails")]
    pub content_details: ContentDetails,
}

#[derive(Debug, Default, Deserialize)]
pub struct Snippet {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "publishedAt")]
    pub published_at: String,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub high: Thumbnail,
}

#[derive(Debug, Default, Deserialize)]
pub struct Thumbnail {
    #[serde(default)]
    pub url: String,
}

/// Channel statistics. The API returns counts as strings.
#[derive(Debug, Default, Deserialize)]
pub struct Statistics {
    #[serde(default, rename = "subscriberCount")]
    pub subscriber_count: String,
    #[serde(default, rename = "videoCount")]
    pub video_count: String,
    #[serde(default, rename = "viewCount")]
    pub view_count: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContentDetails {
    #[serde(default, rename = "relatedPlaylists")]
    pub related_playlists: RelatedPlaylists,
}

#[derive(Debug, Default, Deserialize)]
pub struct RelatedPlaylists {
    /// Playlist id of the channel's uploads; empty if not exposed.
    #[serde(default)]
    pub uploads: String,
}

/// Response of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchItem {
    #[serde(default)]
    pub id: SearchId,
    #[serde(default)]
    pub snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchId {
    #[serde(default, rename = "channelId")]
    pub channel_id: String,
}

/// Response of `GET /playlistItems`.
#[derive(Debug, Deserialize)]
pub struct PlaylistItemsResponse {
    #[serde(default)]
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaylistItem {
    #[serde(default, rename = "contentDetails")]
    pub content_details: PlaylistContentDetails,
    #[serde(default)]
    pub snippet: Snippet,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlaylistContentDetails {
    #[serde(default, rename = "videoId")]
    pub video_id: String,
}

/// Response of the timedtext endpoint with `fmt=json3`.
#[derive(Debug, Deserialize)]
pub struct TimedTextResponse {
    #[serde(default)]
    pub events: Vec<TimedTextEvent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimedTextEvent {
    #[serde(default)]
    pub segs: Vec<TimedTextSegment>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimedTextSegment {
    #[serde(default)]
    pub utf8: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_list_response_full() {
        let json = r#"{
            "items": [{
                "id": "UCabc",
                "snippet": {
                    "title": "Test Channel",
                    "description": "About tests",
                    "thumbnails": { "high": { "url": "https://img/ch.jpg" } }
                },
                "statistics": {
                    "subscriberCount": "1234",
                    "videoCount": "56",
                    "viewCount": "78901"
                },
                "contentDetails": {
                    "relatedPlaylists": { "uploads": "UUabc" }
                }
            }]
        }"#;
        let response: ChannelListResponse = serde_json::from_str(json).unwrap();
        let item = &response.items[0];
        assert_eq!(item.id, "UCabc");
        assert_eq!(item.snippet.title, "Test Channel");
        assert_eq!(item.snippet.thumbnails.high.url, "https://img/ch.jpg");
        assert_eq!(item.statistics.subscriber_count, "1234");
        assert_eq!(item.content_details.related_playlists.uploads, "UUabc");
    }

    #[test]
    fn test_channel_list_response_sparse() {
        // Hidden statistics and missing thumbnails must not fail parsing.
        let json = r#"{ "items": [{ "id": "UCabc", "snippet": { "title": "T" } }] }"#;
        let response: ChannelListResponse = serde_json::from_str(json).unwrap();
        let item = &response.items[0];
        assert_eq!(item.statistics.subscriber_count, "");
        assert_eq!(item.content_details.related_playlists.uploads, "");
    }

    #[test]
    fn test_channel_list_response_empty() {
        let response: ChannelListResponse = serde_json::from_str("{}").unwrap();
        assert!(response.items.is_empty());
    }

    #[test]
    fn test_search_list_response() {
        let json = r#"{
            "items": [{
                "id": { "kind": "youtube#channel", "channelId": "UCxyz" },
                "snippet": { "title": "Hit", "description": "d" }
            }]
        }"#;
        let response: SearchListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items[0].id.channel_id, "UCxyz");
        assert_eq!(response.items[0].snippet.title, "Hit");
    }

    #[test]
    fn test_playlist_items_response() {
        let json = r#"{
            "items": [
                {
                    "contentDetails": { "videoId": "v1" },
                    "snippet": { "title": "First", "publishedAt": "2024-05-01T00:00:00Z" }
                },
                { "snippet": { "title": "No video id" } }
            ]
        }"#;
        let response: PlaylistItemsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.items[0].content_details.video_id, "v1");
        assert_eq!(response.items[0].snippet.published_at, "2024-05-01T00:00:00Z");
        assert_eq!(response.items[1].content_details.video_id, "");
    }

    #[test]
    fn test_timedtext_response() {
        let json = r#"{
            "events": [
                { "tStartMs": 0, "segs": [{ "utf8": "hello" }, { "utf8": " there" }] },
                { "tStartMs": 900 },
                { "segs": [{ "utf8": "everyone" }] }
            ]
        }"#;
        let response: TimedTextResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.events.len(), 3);
        assert_eq!(response.events[0].segs[1].utf8, " there");
        assert!(response.events[1].segs.is_empty());
    }
}
