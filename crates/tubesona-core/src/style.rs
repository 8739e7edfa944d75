//! Style synthesis.
//!
//! Distills a channel's context snapshot into a bounded natural-language
//! description of the creator's voice, used as part of the generation
//! system prompt. Pure and heuristic: topic tags come from substring
//! checks over video titles, speech patterns from transcript excerpts.

use tubesona_types::chat::ConversationContext;
use tubesona_types::channel::VideoSummary;

/// Number of video titles scanned for topic tags.
const TITLE_SCAN_LIMIT: usize = 5;

/// Number of transcript samples quoted in the style description.
const SAMPLE_LIMIT: usize = 2;

/// Character budget per quoted transcript excerpt.
const EXCERPT_CHARS: usize = 300;

/// Synthesize a style description from a conversation's context snapshot.
///
/// Never fails; empty inputs yield an empty string. Output order: channel
/// description, style heading, topic-tag sentence, then up to
/// [`SAMPLE_LIMIT`] quoted excerpts, newline-joined.
pub fn synthesize(context: &ConversationContext) -> String {
    let mut parts: Vec<String> = Vec::new();

    if !context.channel_description.is_empty() {
        parts.push(format!(
            "Channel description: {}",
            context.channel_description
        ));
    }

    if !context.transcript_samples.is_empty() {
        parts.push("The YouTuber's speaking style is characterized by:".to_string());

        let tags = topic_tags(&context.videos);
        if !tags.is_empty() {
            parts.push(format!("Common content types: {}.", tags.join(", ")));
        }

        parts.push("Sample of the YouTuber's speech patterns:".to_string());
        for sample in context.transcript_samples.iter().take(SAMPLE_LIMIT) {
            parts.push(format!(
                "From '{}': {}...",
                sample.video_title,
                truncate_chars(&sample.excerpt, EXCERPT_CHARS)
            ));
        }
    }

    parts.join("\n")
}

/// Tag content types by case-insensitive substring checks on video titles.
///
/// Deduplicated in insertion order so the output is deterministic.
fn topic_tags(videos: &[VideoSummary]) -> Vec<&'static str> {
    let mut tags: Vec<&'static str> = Vec::new();
    for video in videos.iter().take(TITLE_SCAN_LIMIT) {
        let title = video.title.to_lowercase();
        let mut add = |tag: &'static str| {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        };
        if title.contains("how to") {
            add("tutorial-style explanations");
        }
        if title.contains("review") {
            add("product reviews");
        }
        if title.contains("vs ") {
            add("comparisons");
        }
        if title.contains('?') {
            add("question-and-answer format");
        }
    }
    tags
}

fn truncate_chars(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        text.to_string()
    } else {
        text.chars().take(limit).collect()
    }
}
