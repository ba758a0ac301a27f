//! Mock collaborators for unit testing without a homeserver, a puppet
//! registry, or a real markup tokenizer.
//!
//! Also usable from downstream crates' tests; nothing here touches I/O.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use mxbridge_types::{Entity, Identity, TelegramId};

use crate::mention::DisplayNameDirectory;
use crate::pipeline::MarkupTokenizer;
use crate::reply::{MessageIdStore, ReplyFallbackTrimmer};

// ── MockDirectory ─────────────────────────────────────────────────────────────

/// In-memory display-name directory.
#[derive(Clone, Default)]
pub struct MockDirectory {
    entries: HashMap<String, Identity>,
}

impl MockDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identity, keyed by its display name.
    pub fn insert(&mut self, identity: Identity) {
        self.entries
            .insert(identity.display_name.clone(), identity);
    }
}

impl DisplayNameDirectory for MockDirectory {
    fn find_by_display_name(&self, name: &str) -> Option<Identity> {
        self.entries.get(name).cloned()
    }
}

// ── MockTokenizer ─────────────────────────────────────────────────────────────

#[derive(Debug, thiserror::Error)]
#[error("mock tokenizer failure")]
pub struct MockTokenizerError;

/// Tokenizer that records every markup string it receives.
///
/// Replies with the canned `(text, entities)` pair set via [`respond_with`],
/// or echoes its input with no entities by default. Entity offsets in the
/// canned response count code points, per the `MarkupTokenizer` contract.
///
/// [`respond_with`]: MockTokenizer::respond_with
#[derive(Clone, Default)]
pub struct MockTokenizer {
    received: Arc<Mutex<Vec<String>>>,
    response: Arc<Mutex<Option<(String, Vec<Entity>)>>>,
    fail: Arc<Mutex<bool>>,
}

impl MockTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, text: impl Into<String>, entities: Vec<Entity>) {
        *self.response.lock().unwrap() = Some((text.into(), entities));
    }

    /// Make every subsequent `tokenize` call fail.
    pub fn fail(&self) {
        *self.fail.lock().unwrap() = true;
    }

    /// Markup strings received so far, in call order.
    pub fn received(&self) -> Vec<String> {
        self.received.lock().unwrap().clone()
    }
}

impl MarkupTokenizer for MockTokenizer {
    type Error = MockTokenizerError;

    fn tokenize(&self, markup: &str) -> Result<(String, Vec<Entity>), Self::Error> {
        self.received.lock().unwrap().push(markup.to_string());
        if *self.fail.lock().unwrap() {
            return Err(MockTokenizerError);
        }
        Ok(self
            .response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or_else(|| (markup.to_string(), Vec::new())))
    }
}

// ── MockReplyTrimmer ──────────────────────────────────────────────────────────

/// Trimmer mimicking the Matrix reply-fallback shapes: an `<mx-reply>`
/// element in markup, leading `> `-quoted lines in plain text.
#[derive(Clone, Default)]
pub struct MockReplyTrimmer;

impl ReplyFallbackTrimmer for MockReplyTrimmer {
    fn trim_html(&self, formatted_body: &str) -> String {
        match formatted_body.split_once("</mx-reply>") {
            Some((_, rest)) => rest.to_string(),
            None => formatted_body.to_string(),
        }
    }

    fn trim_text(&self, body: &str) -> String {
        body.lines()
            .skip_while(|line| line.starts_with("> "))
            .skip_while(|line| line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ── MockMessageStore ──────────────────────────────────────────────────────────

/// In-memory Matrix event id → Telegram message id mapping.
#[derive(Clone, Default)]
pub struct MockMessageStore {
    entries: Arc<Mutex<HashMap<(String, i64), TelegramId>>>,
}

impl MockMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, event_id: impl Into<String>, space: TelegramId, tgid: TelegramId) {
        self.entries
            .lock()
            .unwrap()
            .insert((event_id.into(), space.0), tgid);
    }
}

impl MessageIdStore for MockMessageStore {
    fn remote_id(
        &self,
        event_id: &str,
        _room_id: Option<&str>,
        space: TelegramId,
    ) -> Option<TelegramId> {
        self.entries
            .lock()
            .unwrap()
            .get(&(event_id.to_string(), space.0))
            .copied()
    }
}
