//! Core types for the loan assistant
//!
//! This crate provides the vocabulary shared by every other crate:
//! - Conversation turns and feedback sentiment
//! - Built-in intent tags
//! - Long-term user profiles
//! - Error types

pub mod conversation;
pub mod error;
pub mod intents;
pub mod profile;

pub use conversation::{ConversationTurn, HistoryEntry, Sentiment};
pub use error::{Error, Result};
pub use profile::{ProfileUpdate, UserProfile};
