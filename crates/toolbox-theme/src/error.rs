//! Error types.
//!
//! Storage errors never escape [`PreferenceStore`](crate::PreferenceStore); they
//! are exposed so custom [`KeyValueStore`](crate::KeyValueStore) backends can
//! report what went wrong.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing the persistent key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be used at all (disabled, missing, no home directory).
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    /// An I/O error while touching a file-backed store.
    #[error("failed to access preference file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The backing data exists but cannot be parsed.
    #[error("preference file '{}' is corrupted: {source}", path.display())]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The host rejected the write (quota exceeded, security policy).
    #[error("preference storage rejected write: {0}")]
    Rejected(String),
}

/// Error returned when a color string is not a valid hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color '{input}': expected #rgb or #rrggbb")]
pub struct ColorParseError {
    pub input: String,
}

/// Error returned when a theme registry cannot serve resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// A theme the resolver depends on is not registered.
    #[error("theme registry is missing required theme '{id}'")]
    MissingTheme { id: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parse_error_display() {
        let err = ColorParseError {
            input: "teal".to_string(),
        };
        assert!(err.to_string().contains("teal"));
    }

    #[test]
    fn test_missing_theme_display() {
        let err = RegistryError::MissingTheme {
            id: "ocean".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "theme registry is missing required theme 'ocean'"
        );
    }

    #[test]
    fn test_io_error_mentions_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/prefs.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/tmp/prefs.json"));
        assert!(msg.contains("denied"));
    }
}
