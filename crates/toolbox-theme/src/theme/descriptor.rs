//! Theme descriptor: the static metadata behind a theme id.

use serde::Serialize;

use super::color::{Color, ColorRole, Palette};
use super::registry::{AUTO_THEME_ID, DARK_THEME_ID};

/// Display metadata and optional palette identified by a theme id.
///
/// Descriptors are immutable once built. The `auto` marker is a descriptor
/// without a palette; every other built-in theme carries one.
///
/// # Example
///
/// ```rust
/// use toolbox_theme::{Color, ColorRole, Palette, ThemeDescriptor};
///
/// let mint = ThemeDescriptor::new("mint", "Mint")
///     .with_icon("🍃")
///     .with_description("Cool mint")
///     .with_colors(Palette::new().with(ColorRole::Primary, Color::from_hex(0x3eb489)));
///
/// assert_eq!(mint.id(), "mint");
/// assert!(!mint.is_dark());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    id: String,
    name: String,
    icon: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    colors: Option<Palette>,
}

impl ThemeDescriptor {
    /// Creates a descriptor with empty icon, description and no palette.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: String::new(),
            description: String::new(),
            colors: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_colors(mut self, palette: Palette) -> Self {
        self.colors = Some(palette);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.colors.as_ref()
    }

    /// Shorthand for a single palette entry.
    pub fn color(&self, role: ColorRole) -> Option<Color> {
        self.colors.as_ref().and_then(|p| p.get(role))
    }

    /// True for the `auto` pseudo-theme.
    pub fn is_auto(&self) -> bool {
        self.id == AUTO_THEME_ID
    }

    /// True for the dark variant.
    pub fn is_dark(&self) -> bool {
        self.id == DARK_THEME_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_builder() {
        let theme = ThemeDescriptor::new("dusk", "Dusk")
            .with_icon("🌆")
            .with_description("Evening hues");

        assert_eq!(theme.name(), "Dusk");
        assert_eq!(theme.icon(), "🌆");
        assert_eq!(theme.description(), "Evening hues");
        assert!(theme.palette().is_none());
        assert!(theme.color(ColorRole::Primary).is_none());
    }

    #[test]
    fn test_descriptor_color_lookup() {
        let theme = ThemeDescriptor::new("dusk", "Dusk")
            .with_colors(Palette::new().with(ColorRole::Warning, Color::from_hex(0xff9800)));

        assert_eq!(
            theme.color(ColorRole::Warning),
            Some(Color::from_hex(0xff9800))
        );
        assert_eq!(theme.color(ColorRole::Success), None);
    }

    #[test]
    fn test_descriptor_markers() {
        assert!(ThemeDescriptor::new("auto", "Auto").is_auto());
        assert!(ThemeDescriptor::new("dark", "Dark").is_dark());
        assert!(!ThemeDescriptor::new("ocean", "Ocean").is_dark());
    }

    #[test]
    fn test_descriptor_serializes_without_missing_palette() {
        let json = serde_json::to_value(ThemeDescriptor::new("auto", "Auto")).unwrap();
        assert!(json.get("colors").is_none());
        assert_eq!(json["id"], "auto");
    }
}
