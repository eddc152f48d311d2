//! The user's theme selection.

use std::fmt;

use super::registry::AUTO_THEME_ID;

/// What the user picked: a specific theme, or follow the system.
///
/// Named ids are kept verbatim, even when they are not registered; the
/// resolver decides what an unknown id falls back to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ThemePreference {
    /// Follow the system dark-mode signal.
    #[default]
    Auto,
    /// A specific theme id.
    Named(String),
}

impl ThemePreference {
    /// Interprets a stored string. `"auto"` is the only sentinel.
    pub fn from_id(id: &str) -> Self {
        if id == AUTO_THEME_ID {
            ThemePreference::Auto
        } else {
            ThemePreference::Named(id.to_string())
        }
    }

    /// The string form written to storage.
    pub fn as_str(&self) -> &str {
        match self {
            ThemePreference::Auto => AUTO_THEME_ID,
            ThemePreference::Named(id) => id,
        }
    }

    /// True for `Auto`, and for a named `"auto"` built without [`from_id`](Self::from_id).
    pub fn is_auto(&self) -> bool {
        self.as_str() == AUTO_THEME_ID
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ThemePreference {
    fn from(id: &str) -> Self {
        ThemePreference::from_id(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_auto() {
        assert_eq!(ThemePreference::default(), ThemePreference::Auto);
    }

    #[test]
    fn test_from_id_recognizes_auto() {
        assert!(ThemePreference::from_id("auto").is_auto());
        assert_eq!(
            ThemePreference::from("forest"),
            ThemePreference::Named("forest".to_string())
        );
    }

    #[test]
    fn test_as_str_matches_stored_form() {
        assert_eq!(ThemePreference::Auto.as_str(), "auto");
        assert_eq!(ThemePreference::from_id("dark").to_string(), "dark");
    }
}
