//! YouTube Data API v3 client.
//!
//! Implements [`tubesona_core::provider::MetadataProvider`]: channel
//! metadata with recent uploads, channel search, and transcript retrieval
//! via the public timedtext endpoint.

pub mod client;
pub mod types;

pub use client::YouTubeClient;
