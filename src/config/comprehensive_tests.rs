//! Additional comprehensive tests for configuration parsing and validation

use super::{ConfigParser, EnvManager};
use crate::{
    cli::Cli,
    models::Config,
};
use clap::Parser;
use std::collections::HashMap;

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

/// Test edge cases in configuration values
mod config_edge_cases {
    use super::*;

    #[test]
    fn test_config_at_limits() {
        let config = Config {
            duration_seconds: crate::defaults::MAX_DURATION_SECS,
            timeout_seconds: crate::defaults::MAX_TIMEOUT_SECS,
            concurrency: crate::defaults::MAX_CONCURRENCY,
            ..Config::default()
        };
        assert!(config.validate().is_ok());

        assert!(Config { duration_seconds: crate::defaults::MAX_DURATION_SECS + 1, ..config.clone() }.validate().is_err());
        assert!(Config { timeout_seconds: crate::defaults::MAX_TIMEOUT_SECS + 1, ..config.clone() }.validate().is_err());
        assert!(Config { concurrency: crate::defaults::MAX_CONCURRENCY + 1, ..config }.validate().is_err());
    }

    #[test]
    fn test_zero_duration_is_valid() {
        let config = Config { duration_seconds: 0, ..Config::default() };
        assert!(config.validate().is_ok());
        assert_eq!(config.duration(), std::time::Duration::ZERO);
    }

    #[test]
    fn test_url_variants() {
        for url in [
            "http://127.0.0.1:8080/albums",
            "https://example.com",
            "http://[::1]:8080/albums?limit=5",
            "https://xn--nxasmq6b.cn/path",
        ] {
            let config = Config { target_url: url.to_string(), ..Config::default() };
            assert!(config.validate().is_ok(), "{} should be valid", url);
        }

        for url in ["", "not-a-url", "ftp://example.com/file", "file:///etc/hosts"] {
            let config = Config { target_url: url.to_string(), ..Config::default() };
            assert!(config.validate().is_err(), "{} should be rejected", url);
        }
    }
}

/// Test environment value parsing
mod env_parsing_tests {
    use super::*;

    #[test]
    fn test_env_values_are_trimmed() {
        let mut config = Config::default();
        config
            .merge_from_lookup(env_of(&[
                ("TARGET_URL", "  http://localhost:9000/albums  "),
                ("DURATION_SECONDS", " 12 "),
                ("ENABLE_PLOT", " false "),
            ]))
            .unwrap();

        assert_eq!(config.target_url, "http://localhost:9000/albums");
        assert_eq!(config.duration_seconds, 12);
        assert!(!config.enable_plot);
    }

    #[test]
    fn test_env_boolean_validation() {
        for value in ["true", "false"] {
            assert!(EnvManager::validate_env_var("ENABLE_COLOR", value).is_ok());
        }
        for value in ["yes", "no", "1", "0", "TRUE", ""] {
            assert!(EnvManager::validate_env_var("ENABLE_COLOR", value).is_err(), "{} should be rejected", value);
        }
    }

    #[test]
    fn test_blank_target_url_keeps_default() {
        let mut config = Config::default();
        config.merge_from_lookup(env_of(&[("TARGET_URL", "   ")])).unwrap();
        assert_eq!(config.target_url, crate::defaults::DEFAULT_TARGET_URL);
    }
}

/// Test configuration merging priorities
mod config_priority_tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let env = env_of(&[("TIMEOUT_SECONDS", "25"), ("CONCURRENCY", "4")]);

        // CLI beats environment, environment beats defaults
        let cli = Cli::parse_from(["test", "--timeout", "35"]);
        let config = ConfigParser::new(cli).parse_with(env).unwrap();

        assert_eq!(config.timeout_seconds, 35);
        assert_eq!(config.concurrency, 4);
        assert_eq!(config.duration_seconds, crate::defaults::DEFAULT_DURATION.as_secs());
    }

    #[test]
    fn test_no_plot_beats_env() {
        let env = env_of(&[("ENABLE_PLOT", "true"), ("PLOT_OUTPUT", "env.svg")]);
        let cli = Cli::parse_from(["test", "--no-plot"]);
        let config = ConfigParser::new(cli).parse_with(env).unwrap();

        assert!(!config.enable_plot);
        assert_eq!(config.plot_output, "env.svg");
    }
}

/// Test error message quality and helpfulness
mod error_message_tests {
    use super::*;

    #[test]
    fn test_error_messages_are_helpful() {
        let error = EnvManager::validate_env_var("TARGET_URL", "not-a-url").unwrap_err();
        let message = error.to_string();
        assert!(message.contains("TARGET_URL"));
        assert!(message.contains("not-a-url"));

        let error = EnvManager::validate_env_var("TIMEOUT_SECONDS", "0").unwrap_err();
        assert!(error.to_string().contains("between 1 and 300"));
    }
}

/// Test concurrent configuration operations
mod concurrency_tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_validation() {
        let handles: Vec<_> = (0..10)
            .map(|i| {
                thread::spawn(move || {
                    let config = Config {
                        target_url: format!("https://site{}.com/albums", i),
                        duration_seconds: i as u64,
                        timeout_seconds: (i % 120 + 1) as u64,
                        concurrency: i + 1,
                        ..Config::default()
                    };

                    assert!(config.validate().is_ok());
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }
}
