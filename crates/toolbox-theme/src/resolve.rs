//! Resolution of a preference to the theme actually in effect.

use crate::theme::{ThemeDescriptor, ThemePreference, ThemeRegistry};

/// Returns the descriptor in effect for `preference`.
///
/// - `auto` follows the system signal: the dark theme when `system_dark`,
///   otherwise the default theme. Light mode always means `ocean`.
/// - A named id returns that descriptor, or the default theme when the id is
///   unknown.
///
/// The result is never the `auto` marker. The registry must pass
/// [`ThemeRegistry::validate`].
///
/// # Example
///
/// ```rust
/// use toolbox_theme::{resolve, ThemePreference, ThemeRegistry};
///
/// let registry = ThemeRegistry::builtin();
/// assert_eq!(resolve(registry, &ThemePreference::Auto, true).id(), "dark");
/// assert_eq!(resolve(registry, &ThemePreference::from("neon"), false).id(), "ocean");
/// ```
pub fn resolve<'r>(
    registry: &'r ThemeRegistry,
    preference: &ThemePreference,
    system_dark: bool,
) -> &'r ThemeDescriptor {
    if preference.is_auto() {
        return if system_dark {
            registry.dark_theme()
        } else {
            registry.default_theme()
        };
    }
    registry
        .get(preference.as_str())
        .unwrap_or_else(|| registry.default_theme())
}

/// Whether the root should carry the dark class.
///
/// True for the dark theme itself, or while following a dark system.
pub fn wants_dark_class(
    resolved: &ThemeDescriptor,
    preference: &ThemePreference,
    system_dark: bool,
) -> bool {
    resolved.is_dark() || (preference.is_auto() && system_dark)
}
