//! Channel reference resolution.
//!
//! Normalizes whatever the user typed -- a raw channel ID, a handle, or
//! one of several URL shapes -- into a canonical [`ChannelKey`]. Purely
//! syntactic: no network calls, never fails. Handle-to-ID resolution
//! beyond stripping the `@` happens in the metadata provider.

use tubesona_types::channel::ChannelKey;

/// Resolve a user-supplied channel reference to a canonical key.
///
/// Recognized URL shapes:
/// - `.../channel/<id>` -- the segment after `channel/`
/// - `.../c/<name>` or `.../user/<name>` -- the final path segment
///
/// Anything without a `youtube.com`/`youtu.be` substring is treated as
/// already canonical (an ID or handle) and returned unchanged, minus a
/// leading `@`. Unrecognized URL shapes fall back to the reference as-is;
/// the worst case is a key the downstream lookup rejects as not found.
pub fn resolve(reference: &str) -> ChannelKey {
    let reference = reference.trim();
    let reference = reference.strip_prefix('@').unwrap_or(reference);

    if !reference.contains("youtube.com") && !reference.contains("youtu.be") {
        return ChannelKey::from(reference);
    }

    if let Some((_, rest)) = reference.split_once("channel/") {
        return ChannelKey::from(strip_query(rest));
    }

    if reference.contains("/c/") || reference.contains("/user/") {
        let last = reference.rsplit('/').next().unwrap_or(reference);
        return ChannelKey::from(strip_query(last));
    }

    ChannelKey::from(reference)
}

fn strip_query(segment: &str) -> &str {
    segment.split('?').next().unwrap_or(segment)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_id_passes_through() {
        assert_eq!(resolve("UC_test123").as_str(), "UC_test123");
    }

    #[test]
    fn test_handle_strips_at_sign() {
        assert_eq!(resolve("@somecreator").as_str(), "somecreator");
        assert_eq!(resolve("somecreator").as_str(), "somecreator");
    }

    #[test]
    fn test_channel_url() {
        assert_eq!(
            resolve("https://www.youtube.com/channel/UCabc123").as_str(),
            "UCabc123"
        );
    }

    #[test]
    fn test_channel_url_with_query() {
        assert_eq!(
            resolve("https://www.youtube.com/channel/UCabc123?view=videos").as_str(),
            "UCabc123"
        );
    }

    #[test]
    fn test_c_url_takes_final_segment() {
        assert_eq!(
            resolve("https://www.youtube.com/c/SomeCreator").as_str(),
            "SomeCreator"
        );
    }

    #[test]
    fn test_user_url_with_query() {
        assert_eq!(
            resolve("https://www.youtube.com/user/OldSchool?tab=about").as_str(),
            "OldSchool"
        );
    }

    #[test]
    fn test_unrecognized_url_shape_returned_unchanged() {
        let reference = "https://youtu.be/dQw4w9WgXcQ";
        assert_eq!(resolve(reference).as_str(), reference);
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(resolve("  UCabc  ").as_str(), "UCabc");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for reference in [
            "UC_test123",
            "@handle",
            "https://www.youtube.com/channel/UCabc?x=1",
            "not a channel at all",
        ] {
            assert_eq!(resolve(reference), resolve(reference));
        }
    }
}
