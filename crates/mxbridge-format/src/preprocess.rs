//! Inbound text rewrites applied before tokenization
//!
//! Order matters: the command wrap must see the raw leading `!`, the
//! escaped-command unescape must run after it so `\!foo` survives as a
//! literal, and mention bridging runs last over the already-normalized
//! text so the offsets it records are final.

#[cfg(test)]
#[path = "preprocess_tests.rs"]
mod preprocess_tests;

use regex::Regex;
use std::sync::LazyLock;

use mxbridge_types::Entity;

use crate::config::CompiledConfig;
use crate::mention::{self, DisplayNameDirectory};

/// Leading bot command: `!cmd` at the very start of the message.
static COMMAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^!([A-Za-z0-9@]+)").unwrap());

/// Escaped literal command: `\!cmd` at the very start of the message.
static NOT_COMMAND: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\\(![A-Za-z0-9@]+)").unwrap());

const TAB_EXPANSION: &str = "    ";

/// Markup-path rewrites, applied to raw markup before the tokenizer runs.
///
/// The leading command is wrapped in a `<command>` element so the tokenizer
/// treats it as an atomic, non-formattable unit and serializes it back as a
/// command prefix.
pub(crate) fn preprocess_markup<D: DisplayNameDirectory>(
    config: &CompiledConfig,
    directory: &D,
    html: &str,
) -> String {
    let html = COMMAND.replace(html, "<command>$1</command>");
    let html = html.replace('\t', TAB_EXPANSION);
    let html = NOT_COMMAND.replace(&html, "$1");

    if config.plaintext_highlights {
        mention::bridge_mentions_to_markup(&config.mention_pattern, &html, directory)
    } else {
        html.into_owned()
    }
}

/// Plain-text-path rewrites. No tokenizer stage follows, so the command is
/// rewritten straight to the `/` prefix Telegram recognizes and mention
/// entities are synthesized directly.
pub(crate) fn preprocess_plain<D: DisplayNameDirectory>(
    config: &CompiledConfig,
    directory: &D,
    text: &str,
) -> (String, Vec<Entity>) {
    let text = COMMAND.replace(text, "/$1");
    let text = text.replace('\t', TAB_EXPANSION);
    let text = NOT_COMMAND.replace(&text, "$1");

    if config.plaintext_highlights {
        mention::bridge_mentions_to_text(&config.mention_pattern, &text, directory)
    } else {
        (text.into_owned(), Vec::new())
    }
}
