//! Display-name mention resolution
//!
//! Rewrites plaintext occurrences of bridged display names. The markup
//! path turns them into `matrix.to` anchors for the tokenizer to re-parse;
//! the plain-text path substitutes the mention text directly and
//! synthesizes the entity itself. Both paths share the same directory
//! lookup and differ only in what they do with a resolved identity.

use regex::Regex;
use tracing::debug;

use mxbridge_types::{Entity, EntityKind, Identity};

use crate::codec;

/// Look up a bridged identity by the display name shown on the Matrix side.
///
/// One trait, one operation — implement this over the puppet registry, or
/// use [`crate::mocks::MockDirectory`] in tests.
pub trait DisplayNameDirectory {
    fn find_by_display_name(&self, name: &str) -> Option<Identity>;
}

/// What a resolved identity substitutes into plain text.
///
/// A user with a public username becomes `@username`; one without keeps the
/// display name verbatim and is mentioned by numeric id.
fn substitution(identity: &Identity) -> (String, EntityKind) {
    match &identity.username {
        Some(username) => (format!("@{username}"), EntityKind::MentionUsername),
        None => (
            identity.display_name.clone(),
            EntityKind::MentionId {
                user_id: identity.telegram_id,
            },
        ),
    }
}

/// Rewrite display-name occurrences in raw markup into `matrix.to` anchors
/// the tokenizer understands. Unresolved names pass through untouched.
pub(crate) fn bridge_mentions_to_markup<D: DisplayNameDirectory>(
    pattern: &Regex,
    html: &str,
    directory: &D,
) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for caps in pattern.captures_iter(html) {
        let whole = caps.get(0).unwrap();
        let boundary = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let name = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        out.push_str(&html[last..whole.start()]);
        match directory.find_by_display_name(name) {
            Some(identity) => {
                debug!(name, mxid = %identity.mxid, "bridging plaintext mention to markup");
                out.push_str(boundary);
                out.push_str(&format!(
                    "<a href='https://matrix.to/#/{}'>{}</a>",
                    identity.mxid, identity.display_name
                ));
            }
            None => out.push_str(whole.as_str()),
        }
        last = whole.end();
    }
    out.push_str(&html[last..]);
    out
}

/// Rewrite display-name occurrences in plain text, synthesizing mention
/// entities as a left-to-right fold over the match spans.
///
/// Entity offsets and lengths are UTF-16 code units over the rewritten
/// output and span exactly the substituted mention text.
pub(crate) fn bridge_mentions_to_text<D: DisplayNameDirectory>(
    pattern: &Regex,
    text: &str,
    directory: &D,
) -> (String, Vec<Entity>) {
    let mut out = String::with_capacity(text.len());
    // wire length of `out`, tracked incrementally to avoid rescanning
    let mut out_units = 0usize;
    let mut entities = Vec::new();
    let mut last = 0;

    for caps in pattern.captures_iter(text) {
        let whole = caps.get(0).unwrap();
        let boundary = caps.get(1).map(|m| m.as_str()).unwrap_or("");
        let name = caps.get(2).map(|m| m.as_str()).unwrap_or("");

        let gap = &text[last..whole.start()];
        out.push_str(gap);
        out_units += codec::wire_len(gap);

        let resolved = directory
            .find_by_display_name(name)
            .map(|identity| substitution(&identity))
            .filter(|(substitution, _)| !substitution.is_empty());
        match resolved {
            Some((substitution, kind)) => {
                out.push_str(boundary);
                out_units += codec::wire_len(boundary);

                let length = codec::wire_len(&substitution);
                debug!(name, offset = out_units, length, "bridging plaintext mention");
                entities.push(Entity::new(out_units, length, kind));
                out.push_str(&substitution);
                out_units += length;
            }
            None => {
                out.push_str(whole.as_str());
                out_units += codec::wire_len(whole.as_str());
            }
        }
        last = whole.end();
    }
    out.push_str(&text[last..]);
    (out, entities)
}
