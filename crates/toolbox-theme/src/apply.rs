//! Pushing the resolved theme onto a document root.
//!
//! [`RootElement`] abstracts the three mutations the applier needs, so the
//! same code drives a browser `<html>` element (feature `web`) and the
//! in-memory [`RootSnapshot`] used headless and in tests.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;
use std::rc::Rc;

use crate::context::ThemeChange;

/// Attribute recording the resolved theme id.
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Class present while a dark theme is in effect.
pub const DARK_CLASS: &str = "dark-theme";

/// The mutable surface of a document root element.
pub trait RootElement {
    /// Sets an inline CSS custom property, e.g. `--theme-primary`.
    fn set_style_property(&mut self, name: &str, value: &str);
    fn set_attribute(&mut self, name: &str, value: &str);
    /// Adds or removes a class.
    fn set_class(&mut self, name: &str, present: bool);
}

impl<R: RootElement + ?Sized> RootElement for Rc<RefCell<R>> {
    fn set_style_property(&mut self, name: &str, value: &str) {
        self.borrow_mut().set_style_property(name, value);
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.borrow_mut().set_attribute(name, value);
    }

    fn set_class(&mut self, name: &str, present: bool) {
        self.borrow_mut().set_class(name, present);
    }
}

/// Writes theme changes onto a [`RootElement`].
#[derive(Debug)]
pub struct ThemeApplier<R> {
    root: R,
}

impl<R: RootElement> ThemeApplier<R> {
    pub fn new(root: R) -> Self {
        Self { root }
    }

    /// Applies one change:
    ///
    /// 1. each palette entry as a `--theme-<role>` property (themes without a
    ///    palette leave existing properties untouched)
    /// 2. `data-theme` set to the resolved id
    /// 3. `dark-theme` toggled per [`ThemeChange::is_dark`]
    pub fn apply(&mut self, change: &ThemeChange) {
        let theme = &change.resolved;
        if let Some(palette) = theme.palette() {
            for (name, value) in palette.css_variables() {
                self.root.set_style_property(&name, &value);
            }
        }
        self.root.set_attribute(THEME_ATTRIBUTE, theme.id());
        self.root.set_class(DARK_CLASS, change.is_dark());
    }

    pub fn root(&self) -> &R {
        &self.root
    }

    pub fn into_root(self) -> R {
        self.root
    }
}

/// An in-memory root element.
///
/// Records the last value of every property and attribute, and the current
/// class set. [`to_css`](Self::to_css) renders it as a `:root` rule for
/// static pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootSnapshot {
    properties: BTreeMap<String, String>,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
}

impl RootSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.classes.contains(name)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the recorded properties as a CSS rule.
    ///
    /// ```rust
    /// use toolbox_theme::{RootElement, RootSnapshot};
    ///
    /// let mut root = RootSnapshot::new();
    /// root.set_style_property("--theme-primary", "#4caf50");
    /// assert_eq!(root.to_css(), ":root {\n  --theme-primary: #4caf50;\n}\n");
    /// ```
    pub fn to_css(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.properties {
            let _ = writeln!(css, "  {}: {};", name, value);
        }
        css.push_str("}\n");
        css
    }
}

impl RootElement for RootSnapshot {
    fn set_style_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    fn set_class(&mut self, name: &str, present: bool) {
        if present {
            self.classes.insert(name.to_string());
        } else {
            self.classes.remove(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ThemePreference, ThemeRegistry};

    fn change(id: &str, system_dark: bool) -> ThemeChange {
        ThemeChange::new(
            ThemeRegistry::builtin(),
            ThemePreference::from_id(id),
            system_dark,
        )
    }

    #[test]
    fn test_apply_writes_palette_attribute_and_class() {
        let mut applier = ThemeApplier::new(RootSnapshot::new());
        applier.apply(&change("dark", false));

        let root = applier.root();
        assert_eq!(root.attribute(THEME_ATTRIBUTE), Some("dark"));
        assert_eq!(root.property("--theme-primary"), Some("#bb86fc"));
        assert_eq!(root.property("--theme-error"), Some("#cf6679"));
        assert!(root.has_class(DARK_CLASS));
    }

    #[test]
    fn test_apply_light_theme_removes_dark_class() {
        let mut applier = ThemeApplier::new(RootSnapshot::new());
        applier.apply(&change("dark", false));
        applier.apply(&change("sunset", true));

        let root = applier.root();
        assert_eq!(root.attribute(THEME_ATTRIBUTE), Some("sunset"));
        assert_eq!(root.property("--theme-primary"), Some("#ff6b6b"));
        assert!(!root.has_class(DARK_CLASS));
    }

    #[test]
    fn test_apply_auto_in_dark_system() {
        let mut applier = ThemeApplier::new(RootSnapshot::new());
        applier.apply(&change("auto", true));

        let root = applier.root();
        assert_eq!(root.attribute(THEME_ATTRIBUTE), Some("dark"));
        assert!(root.has_class(DARK_CLASS));
    }

    #[test]
    fn test_apply_through_shared_root() {
        let shared = Rc::new(RefCell::new(RootSnapshot::new()));
        let mut applier = ThemeApplier::new(Rc::clone(&shared));
        applier.apply(&change("forest", false));

        assert_eq!(
            shared.borrow().property("--theme-primary"),
            Some("#4caf50")
        );
    }

    #[test]
    fn test_to_css_lists_all_roles() {
        let mut applier = ThemeApplier::new(RootSnapshot::new());
        applier.apply(&change("ocean", false));

        let css = applier.into_root().to_css();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --theme-accent: #409eff;\n"));
        assert_eq!(css.lines().count(), 8);
    }
}
