//! Unit tests for configuration loading and pattern compilation

#[cfg(test)]
mod tests {
    use crate::config::FormatConfig;

    #[test]
    fn defaults_match_protocol_constants() {
        let config = FormatConfig::default();
        assert_eq!(config.displayname_template, "{displayname} (Telegram)");
        assert!(!config.plaintext_highlights);
        assert_eq!(config.max_message_length, 4096);
        assert!(config.bound_plain_messages);
    }

    #[test]
    fn parses_partial_toml_with_defaults() {
        let config: FormatConfig = toml::from_str(
            r#"
            plaintext_highlights = true
            "#,
        )
        .unwrap();
        assert!(config.plaintext_highlights);
        assert_eq!(config.displayname_template, "{displayname} (Telegram)");
        assert_eq!(config.max_message_length, 4096);
    }

    #[test]
    fn parses_full_toml() {
        let config: FormatConfig = toml::from_str(
            r#"
            displayname_template = "{displayname} [tg]"
            plaintext_highlights = true
            max_message_length = 2048
            bound_plain_messages = false
            "#,
        )
        .unwrap();
        assert_eq!(config.displayname_template, "{displayname} [tg]");
        assert_eq!(config.max_message_length, 2048);
        assert!(!config.bound_plain_messages);
    }

    #[test]
    fn from_file_reads_toml() {
        let path = std::env::temp_dir().join("mxbridge-format-config-test.toml");
        std::fs::write(&path, "plaintext_highlights = true\n").unwrap();
        let config = FormatConfig::from_file(path.to_str().unwrap()).unwrap();
        assert!(config.plaintext_highlights);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn from_file_missing_is_an_error() {
        assert!(FormatConfig::from_file("/nonexistent/mxbridge.toml").is_err());
    }

    #[test]
    fn template_placeholder_becomes_wildcard() {
        let config = FormatConfig {
            displayname_template: "{displayname} (Telegram)".to_string(),
            ..FormatConfig::default()
        };
        let compiled = config.compile().unwrap();

        let caps = compiled
            .mention_pattern
            .captures("Alice (Telegram) says hi")
            .unwrap();
        assert_eq!(&caps[2], "Alice (Telegram)");
    }

    #[test]
    fn template_metacharacters_are_literal() {
        let config = FormatConfig {
            displayname_template: "{displayname} [tg]".to_string(),
            ..FormatConfig::default()
        };
        let compiled = config.compile().unwrap();

        assert!(compiled.mention_pattern.is_match("Bob [tg] here"));
        assert!(!compiled.mention_pattern.is_match("Bob Xtg] here"));
    }

    #[test]
    fn literal_template_captures_boundary_and_name() {
        let config = FormatConfig {
            displayname_template: "Alice".to_string(),
            ..FormatConfig::default()
        };
        let compiled = config.compile().unwrap();

        let caps = compiled.mention_pattern.captures("hi Alice!").unwrap();
        assert_eq!(&caps[1], " ");
        assert_eq!(&caps[2], "Alice");
    }
}
