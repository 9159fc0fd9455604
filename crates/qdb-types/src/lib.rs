//! Shared domain models for the QDB history extractor.
//!
//! Everything here is derived from the container and never written back.
pub mod models;

pub use models::{Conversation, NormalizedMessage, Participant, SenderRole};
