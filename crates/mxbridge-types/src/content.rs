//! Matrix event-content types used for reply-target extraction
//!
//! Only the fields the formatter reads are modeled; unknown fields are
//! ignored on deserialization so arbitrary client content parses cleanly.

use serde::{Deserialize, Serialize};

/// Body of an `m.room.message` event, as far as the formatter cares.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageContent {
    #[serde(default)]
    pub body: String,
    /// Set to `org.matrix.custom.html` when `formatted_body` carries markup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_body: Option<String>,
    #[serde(
        rename = "m.relates_to",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub relates_to: Option<RelatesTo>,
}

/// The `m.relates_to` relation block.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RelatesTo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
    #[serde(
        rename = "m.in_reply_to",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub in_reply_to: Option<InReplyTo>,
}

/// The `m.in_reply_to` block inside a relation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InReplyTo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_id: Option<String>,
}
