#[cfg(test)]
mod tests {

    mod slug_tests {
        use crate::services::slug::{build_slug, extract_fragment, normalize, MAX_TOKEN_LEN};

        #[test]
        fn test_normalize_basic() {
            assert_eq!(normalize("Hello World"), "hello-world");
        }

        #[test]
        fn test_normalize_special_characters() {
            assert_eq!(normalize("Hello, World!"), "hello-world");
        }

        #[test]
        fn test_normalize_keeps_underscores() {
            assert_eq!(normalize("snake_case title"), "snake_case-title");
        }

        #[test]
        fn test_normalize_drops_accented_letters() {
            assert_eq!(normalize("Café au lait"), "caf-au-lait");
        }

        #[test]
        fn test_normalize_non_latin_script() {
            assert_eq!(normalize("日本語のタイトル"), "");
        }

        #[test]
        fn test_normalize_multiple_spaces() {
            assert_eq!(normalize("Hello   World"), "hello-world");
        }

        #[test]
        fn test_normalize_leading_trailing_spaces() {
            assert_eq!(normalize("  Hello World  "), "hello-world");
        }

        #[test]
        fn test_normalize_edge_hyphens() {
            assert_eq!(normalize("- hello -"), "hello");
        }

        #[test]
        fn test_normalize_mixed_separator_runs() {
            assert_eq!(normalize("a -- b"), "a-b");
        }

        #[test]
        fn test_normalize_empty_and_symbols_only() {
            assert_eq!(normalize(""), "");
            assert_eq!(normalize("   ***   "), "");
        }

        #[test]
        fn test_normalize_truncates_to_max() {
            let token = normalize(&"a".repeat(200));
            assert_eq!(token.len(), MAX_TOKEN_LEN);
        }

        #[test]
        fn test_normalize_truncation_no_trailing_hyphen() {
            // The 61st character of the intermediate token is a hyphen, so
            // the cut would otherwise leave one dangling.
            let title = format!("{} {}", "a".repeat(59), "bbb");
            assert_eq!(normalize(&title), "a".repeat(59));
        }

        #[test]
        fn test_normalize_idempotent() {
            let samples = [
                "Senior Backend Engineer",
                "  Mixed: Symbols & Things #42!  ",
                "- hello -",
                "日本語 mixed latin",
                "",
            ];
            for title in samples {
                let once = normalize(title);
                assert_eq!(normalize(&once), once, "not idempotent for {:?}", title);
            }
        }

        #[test]
        fn test_normalize_output_charset() {
            let token = normalize("  Mixed: Symbols & Things #42!  ");
            assert_eq!(token, "mixed-symbols-things-42");
            assert!(token
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
        }

        #[test]
        fn test_build_slug_basic() {
            assert_eq!(
                build_slug("Senior Backend Engineer", "abcdef1234567890"),
                "senior-backend-engineer-abcdef12"
            );
        }

        #[test]
        fn test_build_slug_empty_token() {
            assert_eq!(build_slug("   ***   ", "xy"), "-xy");
        }

        #[test]
        fn test_build_slug_short_record_id() {
            assert_eq!(build_slug("Hello", "abc"), "hello-abc");
        }

        #[test]
        fn test_build_slug_fragment_verbatim() {
            // The fragment is embedded as-is, no case folding.
            assert_eq!(build_slug("About Us", "ABCdef123"), "about-us-ABCdef12");
        }

        #[test]
        fn test_build_slug_deterministic() {
            let a = build_slug("Senior Backend Engineer", "abcdef1234567890");
            let b = build_slug("Senior Backend Engineer", "abcdef1234567890");
            assert_eq!(a, b);
        }

        #[test]
        fn test_extract_fragment_round_trip() {
            assert_eq!(
                extract_fragment("senior-backend-engineer-abcdef12"),
                Some("abcdef12")
            );
        }

        #[test]
        fn test_extract_fragment_short_last_segment() {
            assert_eq!(extract_fragment("no-id-here"), None);
        }

        #[test]
        fn test_extract_fragment_empty() {
            assert_eq!(extract_fragment(""), None);
        }

        #[test]
        fn test_extract_fragment_no_hyphen_long_tail() {
            // Ambiguity by construction: a bare token that looks like a
            // fragment is reported as one.
            assert_eq!(
                extract_fragment("abcdefgh12345678"),
                Some("abcdefgh12345678")
            );
        }

        #[test]
        fn test_extract_fragment_rejects_non_alphanumeric() {
            assert_eq!(extract_fragment("post-abcdef1_"), None);
        }

        #[test]
        fn test_extract_fragment_minimum_length() {
            assert_eq!(extract_fragment("x-abcd1234"), Some("abcd1234"));
            assert_eq!(extract_fragment("x-abcd123"), None);
        }

        #[test]
        fn test_extract_fragment_returns_whole_last_segment() {
            assert_eq!(
                extract_fragment("title-abcdefgh1234"),
                Some("abcdefgh1234")
            );
        }
    }

    mod visitor_tests {
        use crate::services::visitors::{browser_family, visitor_key};

        #[test]
        fn test_visitor_key_deterministic() {
            let a = visitor_key("203.0.113.5", "Mozilla/5.0 Firefox/120.0", "salt");
            let b = visitor_key("203.0.113.5", "Mozilla/5.0 Firefox/120.0", "salt");
            assert_eq!(a, b);
        }

        #[test]
        fn test_visitor_key_is_short_hex() {
            let key = visitor_key("203.0.113.5", "Mozilla/5.0 Firefox/120.0", "salt");
            assert_eq!(key.len(), 16);
            assert!(key.chars().all(|c| c.is_ascii_hexdigit()));
        }

        #[test]
        fn test_visitor_key_salt_changes_key() {
            let a = visitor_key("203.0.113.5", "Mozilla/5.0 Firefox/120.0", "salt-a");
            let b = visitor_key("203.0.113.5", "Mozilla/5.0 Firefox/120.0", "salt-b");
            assert_ne!(a, b);
        }

        #[test]
        fn test_visitor_key_coarsens_ipv4() {
            // Same /16, same browser family: identical keys.
            let a = visitor_key("203.0.113.5", "Mozilla/5.0 Firefox/120.0", "salt");
            let b = visitor_key("203.0.114.200", "Mozilla/5.0 Firefox/121.0", "salt");
            assert_eq!(a, b);
        }

        #[test]
        fn test_browser_family() {
            assert_eq!(browser_family("Mozilla/5.0 Firefox/120.0"), "Firefox");
            assert_eq!(browser_family("Mozilla/5.0 Chrome/120.0 Edg/120.0"), "Edge");
            assert_eq!(browser_family("Mozilla/5.0 Chrome/120.0 Safari/537"), "Chrome");
            assert_eq!(browser_family("Mozilla/5.0 Version/17 Safari/605"), "Safari");
            assert_eq!(browser_family("curl/8.4.0"), "Other");
        }
    }

    mod config_tests {
        use crate::Config;

        #[test]
        fn test_config_minimal_with_defaults() {
            let config: Config = toml::from_str(
                r#"
                [site]
                title = "Acme"
                description = "Acme marketing site"
                url = "https://acme.example"

                [database]
                path = "./data/signpost.db"
                "#,
            )
            .expect("Failed to parse config");

            assert_eq!(config.database.pool_size, 10);
            assert!(config.visitors.enabled);
            assert_eq!(config.visitors.retention_days, 365);
        }

        #[test]
        fn test_config_rejects_zero_pool_size() {
            let config: Config = toml::from_str(
                r#"
                [site]
                title = "Acme"
                description = "Acme marketing site"
                url = "https://acme.example"

                [database]
                path = "./data/signpost.db"
                pool_size = 0
                "#,
            )
            .expect("Failed to parse config");

            assert!(config.validate().is_err());
        }

        #[test]
        fn test_config_rejects_huge_retention() {
            let config: Config = toml::from_str(
                r#"
                [site]
                title = "Acme"
                description = "Acme marketing site"
                url = "https://acme.example"

                [database]
                path = "./data/signpost.db"

                [visitors]
                retention_days = 9999
                "#,
            )
            .expect("Failed to parse config");

            assert!(config.validate().is_err());
        }
    }
}
