//! # mxbridge-format
//!
//! Converts Matrix rich-text message bodies into Telegram's representation:
//! a plain-text body plus a list of entities, `(offset, length, kind)`
//! ranges counted in UTF-16 code units.
//!
//! The pipeline is synchronous and stateless across calls. A [`Formatter`]
//! owns an immutable configuration snapshot plus two injected
//! collaborators: a [`mention::DisplayNameDirectory`] for identity lookups
//! and a [`pipeline::MarkupTokenizer`] that turns markup into a first-pass
//! `(text, entities)` pair.
//!
//! ## Quick start
//!
//! ```rust
//! use mxbridge_format::config::FormatConfig;
//! use mxbridge_format::mocks::{MockDirectory, MockTokenizer};
//! use mxbridge_format::Formatter;
//!
//! let config = FormatConfig::default().compile().unwrap();
//! let formatter = Formatter::new(config, MockDirectory::new(), MockTokenizer::new());
//!
//! let message = formatter.format_plain("hello\tworld");
//! assert_eq!(message.text, "hello    world");
//! ```

pub mod bound;
pub mod codec;
pub mod config;
pub mod mention;
pub mod mocks;
pub mod pipeline;
pub mod preprocess;
pub mod reply;

pub use config::{CompiledConfig, FormatConfig};
pub use mention::DisplayNameDirectory;
pub use pipeline::{Formatter, MarkupTokenizer};
pub use reply::{extract_reply_target, MessageIdStore, ReplyFallbackTrimmer};
