//! Ordered registry of theme descriptors.
//!
//! The built-in registry is built once per process and shared; see
//! [`ThemeRegistry::builtin`]. Custom registries can be assembled for
//! embedding or tests, but must contain the default and dark themes to be
//! resolvable.

use once_cell::sync::Lazy;

use super::color::{Color, ColorRole, Palette};
use super::descriptor::ThemeDescriptor;
use crate::error::RegistryError;

/// The "follow the system" pseudo-theme id.
pub const AUTO_THEME_ID: &str = "auto";

/// Theme used for light-mode `auto` resolution and for unknown ids.
pub const DEFAULT_THEME_ID: &str = "ocean";

/// Theme used for dark-mode `auto` resolution.
pub const DARK_THEME_ID: &str = "dark";

static BUILTIN: Lazy<ThemeRegistry> = Lazy::new(build_builtin);

/// An ordered, id-keyed collection of [`ThemeDescriptor`]s.
///
/// # Example
///
/// ```rust
/// use toolbox_theme::ThemeRegistry;
///
/// let registry = ThemeRegistry::builtin();
/// assert_eq!(
///     registry.ids().collect::<Vec<_>>(),
///     vec!["auto", "ocean", "sunset", "forest", "purple", "dark"]
/// );
/// assert_eq!(registry.default_theme().id(), "ocean");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeRegistry {
    themes: Vec<ThemeDescriptor>,
}

impl ThemeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide built-in registry.
    pub fn builtin() -> &'static ThemeRegistry {
        &BUILTIN
    }

    /// Adds a descriptor, returning the updated registry for chaining.
    ///
    /// A descriptor whose id is already present replaces the earlier one in
    /// place, keeping its position.
    pub fn add(mut self, theme: ThemeDescriptor) -> Self {
        match self.themes.iter_mut().find(|t| t.id() == theme.id()) {
            Some(existing) => *existing = theme,
            None => self.themes.push(theme),
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&ThemeDescriptor> {
        self.themes.iter().find(|t| t.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeDescriptor> {
        self.themes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.iter().map(|t| t.id())
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Checks that the themes resolution falls back to are present.
    pub fn validate(&self) -> Result<(), RegistryError> {
        for id in [DEFAULT_THEME_ID, DARK_THEME_ID] {
            if !self.contains(id) {
                return Err(RegistryError::MissingTheme { id: id.to_string() });
            }
        }
        Ok(())
    }

    /// The `auto` marker, if registered.
    pub fn auto(&self) -> Option<&ThemeDescriptor> {
        self.get(AUTO_THEME_ID)
    }

    /// The fallback theme (`ocean`).
    ///
    /// # Panics
    ///
    /// Panics if the registry fails [`validate`](Self::validate). The built-in
    /// registry always passes.
    pub fn default_theme(&self) -> &ThemeDescriptor {
        self.required(DEFAULT_THEME_ID)
    }

    /// The dark variant (`dark`).
    ///
    /// # Panics
    ///
    /// Panics if the registry fails [`validate`](Self::validate).
    pub fn dark_theme(&self) -> &ThemeDescriptor {
        self.required(DARK_THEME_ID)
    }

    fn required(&self, id: &str) -> &ThemeDescriptor {
        match self.get(id) {
            Some(theme) => theme,
            None => panic!("theme registry is missing required theme '{id}'"),
        }
    }
}

impl<'a> IntoIterator for &'a ThemeRegistry {
    type Item = &'a ThemeDescriptor;
    type IntoIter = std::slice::Iter<'a, ThemeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.themes.iter()
    }
}

fn palette(colors: [u32; 6]) -> Palette {
    ColorRole::ALL
        .into_iter()
        .zip(colors)
        .fold(Palette::new(), |palette, (role, hex)| {
            palette.with(role, Color::from_hex(hex))
        })
}

fn build_builtin() -> ThemeRegistry {
    // Palette columns: primary, secondary, accent, success, warning, error.
    ThemeRegistry::new()
        .add(
            ThemeDescriptor::new(AUTO_THEME_ID, "跟随系统")
                .with_icon("🌓")
                .with_description("根据系统设置自动切换明暗主题"),
        )
        .add(
            ThemeDescriptor::new(DEFAULT_THEME_ID, "海洋蓝")
                .with_icon("🌊")
                .with_description("清新的海洋蓝色主题")
                .with_colors(palette([
                    0x667eea, 0x764ba2, 0x409eff, 0x67c23a, 0xe6a23c, 0xf56c6c,
                ])),
        )
        .add(
            ThemeDescriptor::new("sunset", "日落橙")
                .with_icon("🌅")
                .with_description("温暖的日落橙色主题")
                .with_colors(palette([
                    0xff6b6b, 0xffa726, 0xff9800, 0x4caf50, 0xff9800, 0xf44336,
                ])),
        )
        .add(
            ThemeDescriptor::new("forest", "森林绿")
                .with_icon("🌲")
                .with_description("自然的森林绿色主题")
                .with_colors(palette([
                    0x4caf50, 0x81c784, 0x66bb6a, 0x4caf50, 0xff9800, 0xf44336,
                ])),
        )
        .add(
            ThemeDescriptor::new("purple", "紫罗兰")
                .with_icon("💜")
                .with_description("优雅的紫色主题")
                .with_colors(palette([
                    0x9c27b0, 0xba68c8, 0xe91e63, 0x4caf50, 0xff9800, 0xf44336,
                ])),
        )
        .add(
            ThemeDescriptor::new(DARK_THEME_ID, "深色模式")
                .with_icon("🌙")
                .with_description("护眼的深色主题")
                .with_colors(palette([
                    0xbb86fc, 0x3700b3, 0x03dac6, 0x4caf50, 0xff9800, 0xcf6679,
                ])),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_validates() {
        assert!(ThemeRegistry::builtin().validate().is_ok());
    }

    #[test]
    fn test_builtin_auto_has_no_palette() {
        let auto = ThemeRegistry::builtin().auto().unwrap();
        assert!(auto.is_auto());
        assert!(auto.palette().is_none());
    }

    #[test]
    fn test_builtin_concrete_themes_have_full_palettes() {
        for theme in ThemeRegistry::builtin().iter().filter(|t| !t.is_auto()) {
            let palette = theme.palette().expect("concrete theme has a palette");
            assert_eq!(palette.len(), ColorRole::ALL.len(), "{}", theme.id());
        }
    }

    #[test]
    fn test_builtin_forest_primary() {
        let forest = ThemeRegistry::builtin().get("forest").unwrap();
        assert_eq!(
            forest.color(ColorRole::Primary).unwrap().to_string(),
            "#4caf50"
        );
    }

    #[test]
    fn test_builtin_dark_error_color() {
        let dark = ThemeRegistry::builtin().dark_theme();
        assert_eq!(dark.color(ColorRole::Error), Some(Color::from_hex(0xcf6679)));
    }

    #[test]
    fn test_builtin_display_metadata() {
        let ocean = ThemeRegistry::builtin().default_theme();
        assert_eq!(ocean.name(), "海洋蓝");
        assert_eq!(ocean.icon(), "🌊");
        assert_eq!(ocean.description(), "清新的海洋蓝色主题");
        assert_eq!(ThemeRegistry::builtin().auto().unwrap().name(), "跟随系统");
    }

    #[test]
    fn test_add_replaces_in_place() {
        let registry = ThemeRegistry::new()
            .add(ThemeDescriptor::new("a", "A"))
            .add(ThemeDescriptor::new("b", "B"))
            .add(ThemeDescriptor::new("a", "A2"));

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().name(), "A2");
    }

    #[test]
    fn test_validate_reports_missing_dark() {
        let registry = ThemeRegistry::new().add(ThemeDescriptor::new(DEFAULT_THEME_ID, "Ocean"));
        assert_eq!(
            registry.validate(),
            Err(RegistryError::MissingTheme {
                id: DARK_THEME_ID.to_string()
            })
        );
    }

    #[test]
    fn test_unknown_id_is_absent() {
        let registry = ThemeRegistry::builtin();
        assert!(!registry.contains("neon"));
        assert!(registry.get("").is_none());
    }
}
