//! Message length bounding
//!
//! Telegram rejects messages over its code-unit cap. Instead of failing,
//! an over-long message is cut and a fixed marker is appended, with every
//! surviving entity clipped so its range stays valid.

#[cfg(test)]
#[path = "bound_tests.rs"]
mod bound_tests;

use tracing::debug;

use mxbridge_types::{clip_to_length, Entity, EntityKind};

use crate::codec;

/// Telegram's message cap in UTF-16 code units.
pub const MAX_LENGTH: usize = 4096;

/// Marker appended in place of the removed tail.
pub const CUTOFF_TEXT: &str = " [message cut]";

/// Truncate `(text, entities)` to at most `max_len` code units.
///
/// Input within the cap passes through unchanged. Otherwise the text is cut
/// to `max_len - len(marker)` units and the marker appended, so the result
/// is exactly `max_len` units; entities are clipped to the kept prefix and
/// an Italic entity covering the marker is pushed last. Idempotent.
pub fn bound(text: String, entities: Vec<Entity>, max_len: usize) -> (String, Vec<Entity>) {
    let total = codec::wire_len(&text);
    if total <= max_len {
        return (text, entities);
    }

    let marker_len = codec::wire_len(CUTOFF_TEXT);
    assert!(max_len > marker_len, "length cap smaller than cutoff marker");
    let keep = max_len - marker_len;
    debug!(total, max_len, keep, "cutting over-long message");

    let mut out = codec::truncate_wire(&text, keep);
    out.push_str(CUTOFF_TEXT);

    let mut entities = clip_to_length(entities, keep);
    entities.push(Entity::new(keep, marker_len, EntityKind::Italic));
    (out, entities)
}
