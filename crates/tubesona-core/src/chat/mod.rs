//! Chat orchestration: the session manager tying resolver, cache, store,
//! and prompt assembly together.

pub mod service;

pub use service::ChatService;
