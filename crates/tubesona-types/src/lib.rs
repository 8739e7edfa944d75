//! Shared domain types for Tubesona.
//!
//! This crate contains the core domain types used across the Tubesona
//! service: channels, conversations, messages, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod channel;
pub mod chat;
pub mod config;
pub mod error;
