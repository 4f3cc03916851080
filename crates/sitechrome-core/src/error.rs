//! Error types for sitechrome-core
//!
//! Every failure here is recoverable: callers log it and fall back to the
//! nearest safe visual state.

use thiserror::Error;

/// Core error type for sitechrome operations
#[derive(Error, Debug)]
pub enum ChromeError {
    // ===================
    // Config Errors
    // ===================
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    // ===================
    // Theme Errors
    // ===================
    #[error("Unknown theme value: {value:?}")]
    InvalidTheme { value: String },

    #[error("Failed to persist preference {key}: {message}")]
    Storage { key: String, message: String },

    // ===================
    // Path Errors
    // ===================
    #[error("Malformed path data at byte {position}: {message}")]
    PathParse { position: usize, message: String },

    #[error("Path data cannot be interpolated: {message}")]
    PathMismatch { message: String },
}

impl ChromeError {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    pub fn storage(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChromeError::invalid_config("desktop breakpoint must exceed mobile");
        assert_eq!(
            err.to_string(),
            "Invalid configuration: desktop breakpoint must exceed mobile"
        );

        let err = ChromeError::InvalidTheme {
            value: "sepia".to_string(),
        };
        assert_eq!(err.to_string(), "Unknown theme value: \"sepia\"");

        let err = ChromeError::storage("theme", "quota exceeded");
        assert_eq!(
            err.to_string(),
            "Failed to persist preference theme: quota exceeded"
        );
    }

    #[test]
    fn test_config_parse_keeps_source() {
        use std::error::Error as _;

        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ChromeError::ConfigParse {
            message: "inline config".to_string(),
            source,
        };
        assert!(err.source().is_some());
    }
}
