//! UTF-16 wire-encoding helpers
//!
//! Telegram addresses entity offsets in UTF-16 code units; Rust strings are
//! UTF-8. Everything here converts between the two while keeping track of
//! where each code-point boundary lands in code-unit space. Measuring
//! offsets in `char`s instead of code units desynchronizes entities the
//! moment a message contains a character outside the Basic Multilingual
//! Plane, e.g. an emoji.

#[cfg(test)]
#[path = "codec_tests.rs"]
mod codec_tests;

use mxbridge_types::{Entity, FormatError, Result};

/// The length of a string as Telegram counts it.
///
/// A character outside the BMP occupies a surrogate pair on the wire and
/// counts as two code units.
pub fn wire_len(text: &str) -> usize {
    text.encode_utf16().count()
}

/// Re-express `text` as the UTF-16 code-unit sequence sent on the wire.
pub fn to_wire_units(text: &str) -> Vec<u16> {
    text.encode_utf16().collect()
}

/// Inverse of [`to_wire_units`].
///
/// Exact for any sequence produced by it: `from_wire_units(&to_wire_units(t))`
/// recovers `t` for every string, surrogate pairs included.
pub fn from_wire_units(units: &[u16]) -> Result<String> {
    String::from_utf16(units).map_err(FormatError::from)
}

/// Truncate `text` to its first `keep` code units.
///
/// A cut landing inside a surrogate pair leaves U+FFFD for the orphaned
/// unit, so the result is always exactly `min(keep, wire_len)` units long.
pub fn truncate_wire(text: &str, keep: usize) -> String {
    let units = to_wire_units(text);
    if units.len() <= keep {
        return text.to_string();
    }
    String::from_utf16_lossy(&units[..keep])
}

/// Maps code-point offsets of a string to UTF-16 code-unit offsets.
#[derive(Debug, Clone)]
pub struct OffsetMap {
    /// `cumulative[i]` is the number of code units before the `i`-th char;
    /// the final element is the total wire length.
    cumulative: Vec<usize>,
}

impl OffsetMap {
    pub fn new(text: &str) -> Self {
        let mut cumulative = Vec::with_capacity(text.len() + 1);
        let mut units = 0;
        cumulative.push(0);
        for ch in text.chars() {
            units += ch.len_utf16();
            cumulative.push(units);
        }
        Self { cumulative }
    }

    /// Code-unit offset of the boundary after the first `char_offset` code
    /// points. `None` past the end of the text.
    pub fn code_unit_offset(&self, char_offset: usize) -> Option<usize> {
        self.cumulative.get(char_offset).copied()
    }

    /// Total length in code units.
    pub fn wire_len(&self) -> usize {
        self.cumulative.last().copied().unwrap_or(0)
    }
}

/// Convert entities whose offsets count code points of `text` into wire
/// (UTF-16 code unit) offsets over the same text.
///
/// Returns `None` when an entity references a boundary past the end of the
/// text, which means the producer broke its offset contract.
pub fn to_wire_offsets(text: &str, entities: Vec<Entity>) -> Option<Vec<Entity>> {
    let map = OffsetMap::new(text);
    entities
        .into_iter()
        .map(|entity| {
            let offset = map.code_unit_offset(entity.offset)?;
            let end = map.code_unit_offset(entity.offset + entity.length)?;
            Some(Entity {
                offset,
                length: end - offset,
                kind: entity.kind,
            })
        })
        .collect()
}
