//! Message entities — annotation ranges over a code-unit-addressed string

use serde::{Deserialize, Serialize};

use crate::identity::TelegramId;

/// Formatting or semantic annotation kind carried by an [`Entity`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Pre { language: String },
    TextUrl { url: String },
    /// A bot command prefix, e.g. `/roll`.
    BotCommand,
    /// Mention of a user by public `@username`.
    MentionUsername,
    /// Mention of a user without a username, by numeric id.
    MentionId { user_id: TelegramId },
}

/// An annotation over a contiguous range of a message's text.
///
/// `offset` and `length` count UTF-16 code units of the text as it will
/// appear on the wire. A character outside the Basic Multilingual Plane
/// (a surrogate pair on the wire) counts as two units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub offset: usize,
    pub length: usize,
    #[serde(flatten)]
    pub kind: EntityKind,
}

impl Entity {
    /// Create an entity covering `length` code units starting at `offset`.
    ///
    /// Zero-length entities are a programming error, not a recoverable
    /// condition.
    pub fn new(offset: usize, length: usize, kind: EntityKind) -> Self {
        assert!(length > 0, "entity length must be positive");
        Self {
            offset,
            length,
            kind,
        }
    }

    /// End of the annotated range (exclusive), in code units.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// Clip entities against a length cap, preserving order.
///
/// Entities starting at or past `max_len` are dropped; an entity straddling
/// the cap is shrunk to end exactly at it; entities fully inside pass
/// through unchanged.
pub fn clip_to_length(entities: Vec<Entity>, max_len: usize) -> Vec<Entity> {
    entities
        .into_iter()
        .filter_map(|mut entity| {
            if entity.offset >= max_len {
                return None;
            }
            if entity.end() > max_len {
                entity.length = max_len - entity.offset;
            }
            Some(entity)
        })
        .collect()
}

/// Check the bounds invariant: every entity has positive length and ends
/// within a text of `text_len` code units.
pub fn validate(entities: &[Entity], text_len: usize) -> bool {
    entities
        .iter()
        .all(|entity| entity.length > 0 && entity.end() <= text_len)
}

/// A message converted for the wire: plain text plus its entity list.
///
/// Entity offsets are valid for `text` re-expressed in UTF-16 code units.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormattedMessage {
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<Entity>,
}
