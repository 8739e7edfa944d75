use thiserror::Error;

/// Errors from channel metadata lookup.
///
/// `NotFound` is user-correctable and maps to HTTP 404 at the API
/// boundary; `Provider` is a transient upstream failure and maps to 500
/// with a generic message (the detail is logged, never exposed).
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("channel not found: '{0}'")]
    NotFound(String),

    #[error("metadata provider error: {0}")]
    Provider(String),
}

/// Errors from transcript retrieval.
///
/// Expected and non-fatal: a failed transcript fetch only omits that
/// video's sample from the channel's style context.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("no transcript available for video '{0}'")]
    Unavailable(String),

    #[error("transcript fetch failed for video '{video_id}': {detail}")]
    Fetch { video_id: String, detail: String },
}

/// Errors raised while loading service configuration.
///
/// Fatal at service construction time, never per-request.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required configuration: {0}")]
    MissingKey(&'static str),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
