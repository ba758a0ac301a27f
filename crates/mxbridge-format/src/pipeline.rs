//! Pipeline orchestration — the two public formatting entry points

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod pipeline_tests;

use tracing::warn;

use mxbridge_types::{entity, Entity, FormatError, FormattedMessage, Result};

use crate::bound;
use crate::codec;
use crate::config::CompiledConfig;
use crate::mention::DisplayNameDirectory;
use crate::preprocess;

/// Turns tag soup into a first-pass `(text, entities)` pair.
///
/// Injected collaborator: this crate does not parse markup itself. Entity
/// offsets and lengths in the returned pair count code points (`char`s) of
/// the returned text; the pipeline converts them to UTF-16 wire offsets.
pub trait MarkupTokenizer {
    type Error: std::error::Error + Send + Sync;

    fn tokenize(&self, markup: &str) -> std::result::Result<(String, Vec<Entity>), Self::Error>;
}

/// Message formatter: preprocess → tokenize → normalize → trim → bound.
///
/// Owns an immutable configuration snapshot plus the identity directory and
/// markup tokenizer. Stateless across calls; a shared reference can be used
/// from any number of threads.
pub struct Formatter<D, T> {
    config: CompiledConfig,
    directory: D,
    tokenizer: T,
}

impl<D, T> Formatter<D, T>
where
    D: DisplayNameDirectory,
    T: MarkupTokenizer,
{
    pub fn new(config: CompiledConfig, directory: D, tokenizer: T) -> Self {
        Self {
            config,
            directory,
            tokenizer,
        }
    }

    /// Convert a rich-markup message body into text plus entities.
    ///
    /// Any tokenizer or rewrite failure is reported as a single
    /// [`FormatError::ConversionFailed`] carrying the original input; no
    /// partial result is returned.
    pub fn format_markup(&self, html: &str) -> Result<FormattedMessage> {
        let prepared = preprocess::preprocess_markup(&self.config, &self.directory, html);

        let (text, entities) = self
            .tokenizer
            .tokenize(&prepared)
            .map_err(|e| conversion_failed(html, e))?;

        let entities = codec::to_wire_offsets(&text, entities)
            .ok_or_else(|| conversion_failed(html, "tokenizer entity offsets out of range"))?;

        let (text, entities) =
            trim_text(text, entities).map_err(|reason| conversion_failed(html, reason))?;

        // Strip anything a misbehaving tokenizer left pointing past the end;
        // the steps above keep well-formed entities in bounds already.
        let text_len = codec::wire_len(&text);
        let entities: Vec<Entity> = entities
            .into_iter()
            .filter(|e| {
                let in_bounds = e.end() <= text_len;
                if !in_bounds {
                    warn!(offset = e.offset, length = e.length, text_len, "dropping stale entity");
                }
                in_bounds
            })
            .collect();

        let (text, entities) = bound::bound(text, entities, self.config.max_message_length);

        let final_len = codec::wire_len(&text);
        if !entity::validate(&entities, final_len) {
            return Err(FormatError::InternalFault(format!(
                "entity bounds invariant violated after bounding (text_len={final_len})"
            )));
        }
        Ok(FormattedMessage { text, entities })
    }

    /// Convert a plain-text message body. Never fails.
    pub fn format_plain(&self, text: &str) -> FormattedMessage {
        let (text, entities) = preprocess::preprocess_plain(&self.config, &self.directory, text);
        let (text, entities) = if self.config.bound_plain_messages {
            bound::bound(text, entities, self.config.max_message_length)
        } else {
            (text, entities)
        };
        FormattedMessage { text, entities }
    }
}

fn conversion_failed(input: &str, reason: impl std::fmt::Display) -> FormatError {
    FormatError::ConversionFailed {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

/// Trim surrounding whitespace from the tokenized text, shifting entity
/// offsets left by the removed lead.
///
/// The tokenizer must not annotate the whitespace it emits at the edges; an
/// entity intersecting a trimmed edge is a contract violation and is
/// rejected rather than silently clipped.
fn trim_text(
    text: String,
    mut entities: Vec<Entity>,
) -> std::result::Result<(String, Vec<Entity>), String> {
    let without_lead = text.trim_start();
    let lead = codec::wire_len(&text[..text.len() - without_lead.len()]);
    let trimmed = without_lead.trim_end();
    let trimmed_len = codec::wire_len(trimmed);

    for entity in &entities {
        if entity.offset < lead || entity.end() > lead + trimmed_len {
            return Err(format!(
                "entity at {}+{} overlaps trimmed whitespace",
                entity.offset, entity.length
            ));
        }
    }
    for entity in &mut entities {
        entity.offset -= lead;
    }
    Ok((trimmed.to_string(), entities))
}
