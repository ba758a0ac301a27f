//! Unit tests for the pipeline entry points, using mock collaborators

#[cfg(test)]
mod tests {
    use crate::bound::CUTOFF_TEXT;
    use crate::codec::wire_len;
    use crate::config::{CompiledConfig, FormatConfig};
    use crate::mocks::{MockDirectory, MockTokenizer};
    use crate::pipeline::Formatter;
    use mxbridge_types::{Entity, EntityKind, FormatError, Identity, TelegramId};

    fn config() -> CompiledConfig {
        FormatConfig {
            displayname_template: "Alice".to_string(),
            ..FormatConfig::default()
        }
        .compile()
        .unwrap()
    }

    fn formatter(tokenizer: MockTokenizer) -> Formatter<MockDirectory, MockTokenizer> {
        Formatter::new(config(), MockDirectory::new(), tokenizer)
    }

    // ── Markup path ───────────────────────────────────────────────────────────

    #[test]
    fn markup_is_preprocessed_before_tokenization() {
        let tokenizer = MockTokenizer::new();
        let formatter = formatter(tokenizer.clone());

        formatter.format_markup("!foo bar").unwrap();
        assert_eq!(tokenizer.received(), vec!["<command>foo</command> bar"]);
    }

    #[test]
    fn tokenizer_failure_maps_to_conversion_failed_with_original_input() {
        let tokenizer = MockTokenizer::new();
        tokenizer.fail();
        let formatter = formatter(tokenizer);

        let err = formatter.format_markup("!foo bar").unwrap_err();
        match err {
            FormatError::ConversionFailed { input, .. } => assert_eq!(input, "!foo bar"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn tokenizer_entities_are_normalized_to_wire_offsets() {
        let tokenizer = MockTokenizer::new();
        // bold over "bold" in "🦀 bold": char offsets (2, 4)
        tokenizer.respond_with("🦀 bold", vec![Entity::new(2, 4, EntityKind::Bold)]);
        let formatter = formatter(tokenizer);

        let message = formatter.format_markup("ignored").unwrap();
        assert_eq!(message.text, "🦀 bold");
        assert_eq!(message.entities, vec![Entity::new(3, 4, EntityKind::Bold)]);
    }

    #[test]
    fn out_of_range_tokenizer_offsets_are_rejected() {
        let tokenizer = MockTokenizer::new();
        tokenizer.respond_with("short", vec![Entity::new(3, 10, EntityKind::Bold)]);
        let formatter = formatter(tokenizer);

        assert!(matches!(
            formatter.format_markup("x").unwrap_err(),
            FormatError::ConversionFailed { .. }
        ));
    }

    #[test]
    fn surrounding_whitespace_is_trimmed_and_offsets_shifted() {
        let tokenizer = MockTokenizer::new();
        tokenizer.respond_with("  hello  ", vec![Entity::new(2, 5, EntityKind::Bold)]);
        let formatter = formatter(tokenizer);

        let message = formatter.format_markup("x").unwrap();
        assert_eq!(message.text, "hello");
        assert_eq!(message.entities, vec![Entity::new(0, 5, EntityKind::Bold)]);
    }

    #[test]
    fn entity_over_trimmed_edge_is_rejected() {
        let tokenizer = MockTokenizer::new();
        // annotates the leading whitespace the trim would remove
        tokenizer.respond_with("  hello", vec![Entity::new(0, 7, EntityKind::Bold)]);
        let formatter = formatter(tokenizer);

        assert!(matches!(
            formatter.format_markup("x").unwrap_err(),
            FormatError::ConversionFailed { .. }
        ));
    }

    #[test]
    fn oversized_markup_result_is_bounded() {
        let tokenizer = MockTokenizer::new();
        tokenizer.respond_with(
            "a".repeat(5000),
            vec![Entity::new(0, 5000, EntityKind::Bold)],
        );
        let formatter = formatter(tokenizer);

        let message = formatter.format_markup("x").unwrap();
        assert_eq!(wire_len(&message.text), 4096);
        assert!(message.text.ends_with(CUTOFF_TEXT));
        assert_eq!(
            message.entities,
            vec![
                Entity::new(0, 4082, EntityKind::Bold),
                Entity::new(4082, 14, EntityKind::Italic),
            ]
        );
    }

    // ── Plain-text path ───────────────────────────────────────────────────────

    #[test]
    fn plain_path_rewrites_commands_and_tabs() {
        let formatter = formatter(MockTokenizer::new());
        let message = formatter.format_plain("!roll\t2d6");
        assert_eq!(message.text, "/roll    2d6");
        assert!(message.entities.is_empty());
    }

    #[test]
    fn plain_path_bridges_mentions_when_enabled() {
        let config = FormatConfig {
            displayname_template: "Alice".to_string(),
            plaintext_highlights: true,
            ..FormatConfig::default()
        }
        .compile()
        .unwrap();
        let mut directory = MockDirectory::new();
        directory.insert(Identity {
            mxid: "@telegram_100:example.com".to_string(),
            display_name: "Alice".to_string(),
            username: Some("alice123".to_string()),
            telegram_id: TelegramId(100),
        });
        let formatter = Formatter::new(config, directory, MockTokenizer::new());

        let message = formatter.format_plain("hi Alice!");
        assert_eq!(message.text, "hi @alice123!");
        assert_eq!(
            message.entities,
            vec![Entity::new(3, 9, EntityKind::MentionUsername)]
        );
    }

    #[test]
    fn plain_path_is_bounded_by_default() {
        let formatter = formatter(MockTokenizer::new());
        let message = formatter.format_plain(&"a".repeat(5000));
        assert_eq!(wire_len(&message.text), 4096);
        assert_eq!(
            message.entities,
            vec![Entity::new(4082, 14, EntityKind::Italic)]
        );
    }

    #[test]
    fn plain_path_bounding_can_be_disabled() {
        let config = FormatConfig {
            displayname_template: "Alice".to_string(),
            bound_plain_messages: false,
            ..FormatConfig::default()
        }
        .compile()
        .unwrap();
        let formatter = Formatter::new(config, MockDirectory::new(), MockTokenizer::new());

        let message = formatter.format_plain(&"a".repeat(5000));
        assert_eq!(wire_len(&message.text), 5000);
        assert!(message.entities.is_empty());
    }
}
