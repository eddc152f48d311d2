//! The theme context: preference state, system signal and subscribers.
//!
//! A [`ThemeContext`] is built explicitly and owned by whatever hosts the
//! views; there is no global theme state. Every mutation notifies the
//! registered effects synchronously, in registration order, with a
//! [`ThemeChange`] describing the new state.
//!
//! ```text
//! PreferenceStore ──load/save──▶ preference ─┐
//!                                            ├─▶ resolve ─▶ ThemeChange ─▶ effects (ThemeApplier, ...)
//! SystemAppearance ──set/refresh─▶ dark ─────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use toolbox_theme::{ColorMode, MemoryStore, RootSnapshot, SystemAppearance, ThemeContext};
//!
//! let root = Rc::new(RefCell::new(RootSnapshot::new()));
//! let mut ctx = ThemeContext::builder()
//!     .store(MemoryStore::new())
//!     .appearance(SystemAppearance::fixed(ColorMode::Light))
//!     .build()
//!     .unwrap();
//! ctx.attach_root(Rc::clone(&root));
//! assert_eq!(root.borrow().attribute("data-theme"), Some("ocean"));
//!
//! ctx.set_theme("forest");
//! assert_eq!(root.borrow().property("--theme-primary"), Some("#4caf50"));
//! ```

use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::apply::{RootElement, ThemeApplier};
use crate::config::ThemeConfig;
use crate::error::RegistryError;
use crate::resolve::{resolve, wants_dark_class};
use crate::store::{FileStore, KeyValueStore, MemoryStore, PreferenceStore};
use crate::theme::{SystemAppearance, ThemeDescriptor, ThemePreference, ThemeRegistry};

/// Snapshot of the theme state handed to effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeChange {
    /// What the user selected.
    pub preference: ThemePreference,
    /// The theme in effect.
    pub resolved: ThemeDescriptor,
    /// The system dark-mode signal.
    pub system_dark: bool,
}

impl ThemeChange {
    /// Resolves `preference` against `registry`.
    pub fn new(registry: &ThemeRegistry, preference: ThemePreference, system_dark: bool) -> Self {
        let resolved = resolve(registry, &preference, system_dark).clone();
        Self {
            preference,
            resolved,
            system_dark,
        }
    }

    /// Whether the dark class applies.
    pub fn is_dark(&self) -> bool {
        wants_dark_class(&self.resolved, &self.preference, self.system_dark)
    }
}

/// Handle returned by [`ThemeContext::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Effect = Box<dyn FnMut(&ThemeChange)>;

/// Builder for [`ThemeContext`].
pub struct ThemeContextBuilder {
    config: ThemeConfig,
    registry: Option<ThemeRegistry>,
    store: Option<Box<dyn KeyValueStore>>,
    appearance: Option<SystemAppearance>,
}

impl ThemeContextBuilder {
    fn new() -> Self {
        Self {
            config: ThemeConfig::default(),
            registry: None,
            store: None,
            appearance: None,
        }
    }

    pub fn config(mut self, config: ThemeConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses a custom registry instead of the built-in one.
    pub fn registry(mut self, registry: ThemeRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Uses `store` for persistence instead of the config-selected file.
    pub fn store(mut self, store: impl KeyValueStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    /// Uses `appearance` instead of querying the operating system.
    pub fn appearance(mut self, appearance: SystemAppearance) -> Self {
        self.appearance = Some(appearance);
        self
    }

    /// Builds the context, loading the stored preference unless
    /// [`ThemeConfig::load_on_build`] is off.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if a custom registry lacks the default or
    /// dark theme.
    pub fn build(self) -> Result<ThemeContext, RegistryError> {
        let registry = match self.registry {
            Some(registry) => {
                registry.validate()?;
                Rc::new(registry)
            }
            None => Rc::new(ThemeRegistry::builtin().clone()),
        };
        let backend = match self.store {
            Some(store) => store,
            None => default_backend(&self.config),
        };
        let mut context = ThemeContext {
            registry,
            preference: ThemePreference::Auto,
            appearance: self.appearance.unwrap_or_else(SystemAppearance::detect),
            store: PreferenceStore::with_key(backend, self.config.storage_key),
            effects: Vec::new(),
            next_id: 0,
        };
        if self.config.load_on_build {
            context.load();
        }
        Ok(context)
    }
}

fn default_backend(config: &ThemeConfig) -> Box<dyn KeyValueStore> {
    let store = match &config.storage_path {
        Some(path) => Ok(FileStore::new(path)),
        None => FileStore::in_config_dir(),
    };
    match store {
        Ok(store) => Box::new(store),
        Err(err) => {
            warn!(error = %err, "falling back to in-memory theme preference");
            Box::new(MemoryStore::new())
        }
    }
}

/// Theme state shared by the views of one application instance.
///
/// Dropping the context drops every subscribed effect.
pub struct ThemeContext {
    registry: Rc<ThemeRegistry>,
    preference: ThemePreference,
    appearance: SystemAppearance,
    store: PreferenceStore<Box<dyn KeyValueStore>>,
    effects: Vec<(SubscriptionId, Effect)>,
    next_id: u64,
}

impl ThemeContext {
    pub fn builder() -> ThemeContextBuilder {
        ThemeContextBuilder::new()
    }

    /// All registered themes, `auto` included.
    pub fn themes(&self) -> &ThemeRegistry {
        &self.registry
    }

    pub fn preference(&self) -> &ThemePreference {
        &self.preference
    }

    /// The selected id, possibly `"auto"`.
    pub fn current_theme_id(&self) -> &str {
        self.preference.as_str()
    }

    /// The theme in effect.
    pub fn current_theme(&self) -> &ThemeDescriptor {
        resolve(&self.registry, &self.preference, self.system_prefers_dark())
    }

    pub fn system_prefers_dark(&self) -> bool {
        self.appearance.prefers_dark()
    }

    /// The current state as handed to effects.
    pub fn snapshot(&self) -> ThemeChange {
        ThemeChange::new(
            &self.registry,
            self.preference.clone(),
            self.system_prefers_dark(),
        )
    }

    /// Re-reads the stored preference.
    ///
    /// Nothing stored, an unknown id, or a storage failure leave the current
    /// preference in place.
    pub fn load(&mut self) -> &ThemePreference {
        if let Some(preference) = self.store.load(&self.registry) {
            self.update_preference(preference);
        }
        &self.preference
    }

    /// Selects a theme by id and persists the selection.
    ///
    /// Unknown ids are ignored and return `false`. A failed save still
    /// switches the theme for this session.
    pub fn set_theme(&mut self, id: &str) -> bool {
        if !self.registry.contains(id) {
            debug!(id, "ignoring selection of unknown theme");
            return false;
        }
        let preference = ThemePreference::from_id(id);
        self.store.save(&preference);
        self.update_preference(preference);
        true
    }

    /// Records a pushed system dark-mode value.
    pub fn set_system_dark(&mut self, prefers_dark: bool) {
        if self.appearance.set(prefers_dark).is_some() {
            debug!(prefers_dark, "system color mode changed");
            self.notify();
        }
    }

    /// Re-queries the system detector. Returns whether the value changed.
    pub fn refresh_system_preference(&mut self) -> bool {
        match self.appearance.refresh() {
            Some(prefers_dark) => {
                debug!(prefers_dark, "system color mode changed");
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Registers an effect.
    ///
    /// The effect runs once immediately with the current state, then after
    /// every change to the preference or the system signal.
    pub fn subscribe(&mut self, effect: impl FnMut(&ThemeChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;

        let mut effect: Effect = Box::new(effect);
        effect(&self.snapshot());
        self.effects.push((id, effect));
        id
    }

    /// Removes an effect. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.effects.len();
        self.effects.retain(|(existing, _)| *existing != id);
        self.effects.len() != before
    }

    /// Subscribes a [`ThemeApplier`] writing to `root`.
    pub fn attach_root<R: RootElement + 'static>(&mut self, root: R) -> SubscriptionId {
        let mut applier = ThemeApplier::new(root);
        self.subscribe(move |change| applier.apply(change))
    }

    fn update_preference(&mut self, preference: ThemePreference) {
        if preference == self.preference {
            return;
        }
        debug!(from = %self.preference, to = %preference, "theme preference changed");
        self.preference = preference;
        self.notify();
    }

    fn notify(&mut self) {
        let change = self.snapshot();
        for (_, effect) in &mut self.effects {
            effect(&change);
        }
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext")
            .field("preference", &self.preference)
            .field("system_dark", &self.system_prefers_dark())
            .field("storage_key", &self.store.key())
            .field("effects", &self.effects.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ColorMode, ThemeDescriptor};
    use std::cell::RefCell;

    fn context(store: MemoryStore, mode: ColorMode) -> ThemeContext {
        ThemeContext::builder()
            .store(store)
            .appearance(SystemAppearance::fixed(mode))
            .build()
            .unwrap()
    }

    fn recorder(ctx: &mut ThemeContext) -> Rc<RefCell<Vec<String>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        ctx.subscribe(move |change| sink.borrow_mut().push(change.resolved.id().to_string()));
        seen
    }

    #[test]
    fn test_defaults_to_auto() {
        let ctx = context(MemoryStore::new(), ColorMode::Light);
        assert_eq!(ctx.current_theme_id(), "auto");
        assert_eq!(ctx.current_theme().id(), "ocean");
    }

    #[test]
    fn test_build_loads_stored_preference() {
        let mut backend = MemoryStore::new();
        backend.set("mini-toolbox-theme", "purple").unwrap();

        let ctx = context(backend, ColorMode::Light);
        assert_eq!(ctx.current_theme_id(), "purple");
    }

    #[test]
    fn test_load_on_build_can_be_disabled() {
        let mut backend = MemoryStore::new();
        backend.set("mini-toolbox-theme", "purple").unwrap();

        let ctx = ThemeContext::builder()
            .config(ThemeConfig {
                load_on_build: false,
                ..ThemeConfig::default()
            })
            .store(backend)
            .appearance(SystemAppearance::fixed(ColorMode::Light))
            .build()
            .unwrap();
        assert_eq!(ctx.current_theme_id(), "auto");
    }

    #[test]
    fn test_subscribe_runs_immediately() {
        let mut ctx = context(MemoryStore::new(), ColorMode::Dark);
        let seen = recorder(&mut ctx);
        assert_eq!(*seen.borrow(), vec!["dark"]);
    }

    #[test]
    fn test_set_theme_notifies_and_saves() {
        let backend = MemoryStore::new();
        let mut ctx = context(backend.clone(), ColorMode::Light);
        let seen = recorder(&mut ctx);

        assert!(ctx.set_theme("sunset"));

        assert_eq!(*seen.borrow(), vec!["ocean", "sunset"]);
        assert_eq!(
            backend.get("mini-toolbox-theme").unwrap().as_deref(),
            Some("sunset")
        );
    }

    #[test]
    fn test_set_same_theme_does_not_renotify() {
        let mut ctx = context(MemoryStore::new(), ColorMode::Light);
        ctx.set_theme("forest");
        let seen = recorder(&mut ctx);

        ctx.set_theme("forest");
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_set_unknown_theme_is_ignored() {
        let backend = MemoryStore::new();
        let mut ctx = context(backend.clone(), ColorMode::Light);
        let seen = recorder(&mut ctx);

        assert!(!ctx.set_theme("neon"));

        assert_eq!(ctx.current_theme_id(), "auto");
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(backend.get("mini-toolbox-theme").unwrap(), None);
    }

    #[test]
    fn test_set_theme_survives_unavailable_storage() {
        let mut ctx = context(MemoryStore::unavailable(), ColorMode::Light);
        assert!(ctx.set_theme("dark"));
        assert_eq!(ctx.current_theme().id(), "dark");
    }

    #[test]
    fn test_system_change_notifies() {
        let mut ctx = context(MemoryStore::new(), ColorMode::Light);
        let seen = recorder(&mut ctx);

        ctx.set_system_dark(true);
        ctx.set_system_dark(true);
        ctx.set_system_dark(false);

        assert_eq!(*seen.borrow(), vec!["ocean", "dark", "ocean"]);
    }

    #[test]
    fn test_refresh_reverts_to_detector() {
        let mut ctx = context(MemoryStore::new(), ColorMode::Light);
        ctx.set_system_dark(true);
        assert!(ctx.refresh_system_preference());
        assert!(!ctx.system_prefers_dark());
        assert!(!ctx.refresh_system_preference());
    }

    #[test]
    fn test_effects_run_in_registration_order() {
        let mut ctx = context(MemoryStore::new(), ColorMode::Light);
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let sink = Rc::clone(&order);
            ctx.subscribe(move |_| sink.borrow_mut().push(tag));
        }
        order.borrow_mut().clear();

        ctx.set_theme("purple");
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let mut ctx = context(MemoryStore::new(), ColorMode::Light);
        let seen = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&seen);
        let id = ctx.subscribe(move |_| *sink.borrow_mut() += 1);

        assert!(ctx.unsubscribe(id));
        assert!(!ctx.unsubscribe(id));
        ctx.set_theme("dark");
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn test_drop_releases_effects() {
        let token = Rc::new(());
        let mut ctx = context(MemoryStore::new(), ColorMode::Light);
        let held = Rc::clone(&token);
        ctx.subscribe(move |_| {
            let _ = Rc::strong_count(&held);
        });
        assert_eq!(Rc::strong_count(&token), 2);

        drop(ctx);
        assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn test_custom_registry_must_validate() {
        let registry = ThemeRegistry::new().add(ThemeDescriptor::new("ocean", "Ocean"));
        let result = ThemeContext::builder()
            .registry(registry)
            .store(MemoryStore::new())
            .appearance(SystemAppearance::fixed(ColorMode::Light))
            .build();
        assert_eq!(
            result.unwrap_err(),
            RegistryError::MissingTheme {
                id: "dark".to_string()
            }
        );
    }

    #[test]
    fn test_snapshot_dark_flag() {
        let ctx = context(MemoryStore::new(), ColorMode::Dark);
        let change = ctx.snapshot();
        assert!(change.is_dark());
        assert!(change.preference.is_auto());
        assert_eq!(change.resolved.id(), "dark");
    }
}
