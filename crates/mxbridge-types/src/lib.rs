//! Shared types for the Matrix → Telegram formatting pipeline
//!
//! This crate provides the data model used across the formatter: message
//! entities (annotation ranges over UTF-16 code-unit addressed text), the
//! converted message value, bridged identities, Matrix event-content types
//! for reply handling, and the error taxonomy.

pub mod content;
pub mod entity;
pub mod errors;
pub mod identity;

// Re-export commonly used types
pub use content::{InReplyTo, MessageContent, RelatesTo};
pub use entity::{clip_to_length, validate, Entity, EntityKind, FormattedMessage};
pub use errors::{FormatError, Result};
pub use identity::{Identity, TelegramId};
