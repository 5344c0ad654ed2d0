//! Room service configuration.
//!
//! Configuration is loaded from environment variables. Every variable is
//! optional; unparseable values are rejected rather than silently defaulted.

use std::collections::HashMap;
use std::env;
use thiserror::Error;

/// Default room name.
pub const DEFAULT_ROOM_NAME: &str = "lobby";

/// Default room actor mailbox capacity.
pub const DEFAULT_MAILBOX_CAPACITY: usize = 256;

/// Output format for the printed transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptFormat {
    /// One human-readable line per record.
    Text,
    /// A JSON array of records.
    Json,
}

/// Output format for tracing logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Room service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Room name used in logs and metric labels (default: "lobby").
    pub room_name: String,

    /// Whether a participant may send a direct message to itself (default: true).
    pub allow_self_direct: bool,

    /// Transcript output format (default: text).
    pub transcript_format: TranscriptFormat,

    /// Room actor mailbox capacity (default: 256).
    pub mailbox_capacity: usize,

    /// Tracing output format (default: text).
    pub log_format: LogFormat,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

impl Default for Config {
    fn default() -> Self {
        Self {
            room_name: DEFAULT_ROOM_NAME.to_string(),
            allow_self_direct: true,
            transcript_format: TranscriptFormat::Text,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            log_format: LogFormat::Text,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a `HashMap` (for testing).
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let room_name = match vars.get("ROOM_NAME") {
            Some(name) if name.trim().is_empty() => {
                return Err(ConfigError::InvalidValue(
                    "ROOM_NAME must not be empty".to_string(),
                ));
            }
            Some(name) => name.trim().to_string(),
            None => DEFAULT_ROOM_NAME.to_string(),
        };

        let allow_self_direct = vars
            .get("ROOM_ALLOW_SELF_DIRECT")
            .map(|v| parse_bool("ROOM_ALLOW_SELF_DIRECT", v))
            .transpose()?
            .unwrap_or(true);

        let transcript_format = match vars.get("ROOM_TRANSCRIPT_FORMAT").map(String::as_str) {
            None | Some("text") => TranscriptFormat::Text,
            Some("json") => TranscriptFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue(format!(
                    "ROOM_TRANSCRIPT_FORMAT must be 'text' or 'json', got '{other}'"
                )));
            }
        };

        let log_format = match vars.get("ROOM_LOG_FORMAT").map(String::as_str) {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidValue(format!(
                    "ROOM_LOG_FORMAT must be 'text' or 'json', got '{other}'"
                )));
            }
        };

        let mailbox_capacity = match vars.get("ROOM_MAILBOX_CAPACITY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) | Err(_) => {
                    return Err(ConfigError::InvalidValue(format!(
                        "ROOM_MAILBOX_CAPACITY must be a positive integer, got '{raw}'"
                    )));
                }
                Ok(capacity) => capacity,
            },
            None => DEFAULT_MAILBOX_CAPACITY,
        };

        Ok(Config {
            room_name,
            allow_self_direct,
            transcript_format,
            mailbox_capacity,
            log_format,
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue(format!(
            "{key} must be a boolean, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vars_success_with_defaults() {
        let config = Config::from_vars(&HashMap::new()).expect("Config should load successfully");

        assert_eq!(config.room_name, DEFAULT_ROOM_NAME);
        assert!(config.allow_self_direct);
        assert_eq!(config.transcript_format, TranscriptFormat::Text);
        assert_eq!(config.mailbox_capacity, DEFAULT_MAILBOX_CAPACITY);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_from_vars_success_with_custom_values() {
        let vars = HashMap::from([
            ("ROOM_NAME".to_string(), "general".to_string()),
            ("ROOM_ALLOW_SELF_DIRECT".to_string(), "false".to_string()),
            ("ROOM_TRANSCRIPT_FORMAT".to_string(), "json".to_string()),
            ("ROOM_MAILBOX_CAPACITY".to_string(), "32".to_string()),
            ("ROOM_LOG_FORMAT".to_string(), "json".to_string()),
        ]);

        let config = Config::from_vars(&vars).expect("Config should load successfully");

        assert_eq!(config.room_name, "general");
        assert!(!config.allow_self_direct);
        assert_eq!(config.transcript_format, TranscriptFormat::Json);
        assert_eq!(config.mailbox_capacity, 32);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_bool_accepts_common_spellings() {
        for (raw, expected) in [("1", true), ("YES", true), ("0", false), ("No", false)] {
            let vars = HashMap::from([("ROOM_ALLOW_SELF_DIRECT".to_string(), raw.to_string())]);
            let config = Config::from_vars(&vars).unwrap();
            assert_eq!(config.allow_self_direct, expected, "raw value {raw}");
        }
    }

    #[test]
    fn test_invalid_bool_rejected() {
        let vars = HashMap::from([("ROOM_ALLOW_SELF_DIRECT".to_string(), "maybe".to_string())]);
        let result = Config::from_vars(&vars);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue(msg)) if msg.contains("ROOM_ALLOW_SELF_DIRECT")
        ));
    }

    #[test]
    fn test_zero_mailbox_capacity_rejected() {
        let vars = HashMap::from([("ROOM_MAILBOX_CAPACITY".to_string(), "0".to_string())]);
        assert!(matches!(
            Config::from_vars(&vars),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_unknown_transcript_format_rejected() {
        let vars = HashMap::from([("ROOM_TRANSCRIPT_FORMAT".to_string(), "yaml".to_string())]);
        assert!(matches!(
            Config::from_vars(&vars),
            Err(ConfigError::InvalidValue(msg)) if msg.contains("yaml")
        ));
    }

    #[test]
    fn test_blank_room_name_rejected() {
        let vars = HashMap::from([("ROOM_NAME".to_string(), "   ".to_string())]);
        assert!(Config::from_vars(&vars).is_err());
    }
}
