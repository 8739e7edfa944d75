//! Request handlers for the REST API.

pub mod channel;
pub mod chat;
pub mod conversation;
