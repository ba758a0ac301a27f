//! Formatter configuration
//!
//! Loaded once at startup and compiled into an immutable [`CompiledConfig`]
//! snapshot owned by each `Formatter`. Concurrent formatting calls share
//! the snapshot read-only; there is no process-wide mutable pattern state
//! to reinitialize.

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;

/// Formatter configuration as loaded from file or environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// Display name template with a `{displayname}` placeholder, as used
    /// for ghost users on the Matrix side.
    #[serde(default = "default_displayname_template")]
    pub displayname_template: String,
    /// Rewrite plaintext occurrences of ghost display names into mentions.
    #[serde(default)]
    pub plaintext_highlights: bool,
    /// Telegram message cap in UTF-16 code units.
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    /// Apply the length cap to plain-text messages too, not only to the
    /// markup path.
    #[serde(default = "default_true")]
    pub bound_plain_messages: bool,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            displayname_template: default_displayname_template(),
            plaintext_highlights: false,
            max_message_length: default_max_message_length(),
            bound_plain_messages: true,
        }
    }
}

impl FormatConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: FormatConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path))?;

        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let displayname_template = std::env::var("MXBRIDGE_DISPLAYNAME_TEMPLATE")
            .unwrap_or_else(|_| default_displayname_template());

        let plaintext_highlights = std::env::var("MXBRIDGE_PLAINTEXT_HIGHLIGHTS")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        FormatConfig {
            displayname_template,
            plaintext_highlights,
            ..FormatConfig::default()
        }
    }

    /// Compile into the immutable snapshot a `Formatter` owns for its
    /// lifetime.
    pub fn compile(&self) -> Result<CompiledConfig> {
        let mention_pattern = compile_mention_pattern(&self.displayname_template)
            .with_context(|| {
                format!(
                    "Failed to compile displayname template: {}",
                    self.displayname_template
                )
            })?;

        Ok(CompiledConfig {
            mention_pattern,
            plaintext_highlights: self.plaintext_highlights,
            max_message_length: self.max_message_length,
            bound_plain_messages: self.bound_plain_messages,
        })
    }
}

/// Immutable, compiled configuration snapshot.
#[derive(Debug, Clone)]
pub struct CompiledConfig {
    /// Matches `(boundary, templated display name)` in plaintext.
    pub(crate) mention_pattern: Regex,
    pub(crate) plaintext_highlights: bool,
    pub(crate) max_message_length: usize,
    pub(crate) bound_plain_messages: bool,
}

/// Build the plaintext-mention pattern from the display name template.
///
/// The template is taken literally except for the `{displayname}`
/// placeholder, which matches any name text. Group 1 captures the leading
/// boundary, group 2 the templated display name to look up.
fn compile_mention_pattern(template: &str) -> std::result::Result<Regex, regex::Error> {
    let escaped = regex::escape(template);
    let body = escaped.replace(&regex::escape("{displayname}"), "[^>]+");
    Regex::new(&format!(r"(^|\W)({body})"))
}

fn default_displayname_template() -> String {
    "{displayname} (Telegram)".to_string()
}

fn default_max_message_length() -> usize {
    4096
}

fn default_true() -> bool {
    true
}
