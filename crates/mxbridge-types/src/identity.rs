//! Bridged user identities

use serde::{Deserialize, Serialize};

/// Telegram-side numeric identifier (user or message).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TelegramId(pub i64);

impl std::fmt::Display for TelegramId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// Directory entry for a bridged user, looked up by display name.
///
/// The formatter only consumes these values; it never constructs or stores
/// them itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Matrix user id of the ghost/puppet, e.g. `@telegram_12345:example.com`.
    pub mxid: String,
    /// Display name as shown on the Matrix side.
    pub display_name: String,
    /// Public Telegram username, if the user has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Telegram user id.
    pub telegram_id: TelegramId,
}
