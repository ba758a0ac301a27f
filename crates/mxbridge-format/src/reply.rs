//! Reply-target extraction from Matrix event content
//!
//! Resolves which Telegram message a Matrix reply points at, trimming the
//! quoted-reply fallback from the content on the way. Persistence of the
//! Matrix-to-Telegram message id mapping stays behind [`MessageIdStore`];
//! the fallback text manipulation stays behind [`ReplyFallbackTrimmer`].

#[cfg(test)]
#[path = "reply_tests.rs"]
mod reply_tests;

use mxbridge_types::{MessageContent, TelegramId};

/// `format` value marking HTML-formatted content.
pub const MATRIX_HTML_FORMAT: &str = "org.matrix.custom.html";

const REL_TYPE_REFERENCE: &str = "m.reference";

/// Strips the quoted-reply fallback from message bodies before formatting.
/// Two variants because the fallback is encoded differently in markup and
/// plain text.
pub trait ReplyFallbackTrimmer {
    fn trim_html(&self, formatted_body: &str) -> String;
    fn trim_text(&self, body: &str) -> String;
}

/// Lookup of a Matrix event id to the bridged Telegram message id within a
/// Telegram user space.
pub trait MessageIdStore {
    fn remote_id(
        &self,
        event_id: &str,
        room_id: Option<&str>,
        space: TelegramId,
    ) -> Option<TelegramId>;
}

/// Resolve the Telegram message a Matrix reply points at.
///
/// Returns `None` — never an error — when the reply metadata is missing or
/// malformed; a missing `format` field simply means no markup trimming.
/// Trims the reply fallback from `body` (and from `formatted_body` when the
/// content is HTML-formatted) in place, so the caller formats the bare
/// message afterwards.
pub fn extract_reply_target<S, R>(
    content: &mut MessageContent,
    space: TelegramId,
    room_id: Option<&str>,
    store: &S,
    trimmer: &R,
) -> Option<TelegramId>
where
    S: MessageIdStore,
    R: ReplyFallbackTrimmer,
{
    let relates_to = content.relates_to.as_ref()?;

    // rel_type m.reference carries the target inline; the classic reply
    // shape nests it under m.in_reply_to
    let (event_id, reply_room) = if relates_to.rel_type.as_deref() == Some(REL_TYPE_REFERENCE) {
        (relates_to.event_id.clone()?, relates_to.room_id.clone())
    } else {
        let reply = relates_to.in_reply_to.as_ref()?;
        (reply.event_id.clone()?, reply.room_id.clone())
    };
    let room_id = room_id.map(str::to_string).or(reply_room);

    if content.format.as_deref() == Some(MATRIX_HTML_FORMAT) {
        if let Some(formatted) = content.formatted_body.take() {
            content.formatted_body = Some(trimmer.trim_html(&formatted));
        }
    }
    content.body = trimmer.trim_text(&content.body);

    store.remote_id(&event_id, room_id.as_deref(), space)
}
