//! Context configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::store::DEFAULT_STORAGE_KEY;

/// Settings for building a [`ThemeContext`](crate::ThemeContext).
///
/// Every field has a default, so partial JSON is accepted:
///
/// ```rust
/// use toolbox_theme::ThemeConfig;
///
/// let config = ThemeConfig::from_json(r#"{ "storage_path": "/tmp/prefs.json" }"#).unwrap();
/// assert_eq!(config.storage_key, "mini-toolbox-theme");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Key the preference is stored under.
    pub storage_key: String,
    /// Preference file for the default file-backed store. `None` uses the
    /// platform config directory.
    pub storage_path: Option<PathBuf>,
    /// Read the stored preference while building the context.
    pub load_on_build: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_path: None,
            load_on_build: true,
        }
    }
}

impl ThemeConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_is_default() {
        assert_eq!(ThemeConfig::from_json("{}").unwrap(), ThemeConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = ThemeConfig::from_json(
            r#"{ "storage_key": "other", "load_on_build": false }"#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "other");
        assert!(!config.load_on_build);
        assert_eq!(config.storage_path, None);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(ThemeConfig::from_json(r#"{ "theme": "dark" }"#).is_err());
    }
}
