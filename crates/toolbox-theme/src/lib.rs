//! # Toolbox Theme
//!
//! Theme switching for the mini toolbox: a registry of named color themes,
//! a persisted user preference, the system dark-mode signal, and an applier
//! that writes the theme in effect onto a document root.
//!
//! ## Quick Start
//!
//! ```rust
//! use toolbox_theme::{ColorMode, MemoryStore, RootSnapshot, SystemAppearance, ThemeContext};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let root = Rc::new(RefCell::new(RootSnapshot::new()));
//! let mut ctx = ThemeContext::builder()
//!     .store(MemoryStore::new())
//!     .appearance(SystemAppearance::fixed(ColorMode::Dark))
//!     .build()
//!     .unwrap();
//!
//! ctx.attach_root(Rc::clone(&root));
//! assert_eq!(root.borrow().attribute("data-theme"), Some("dark"));
//! assert!(root.borrow().has_class("dark-theme"));
//! ```
//!
//! ## Resolution
//!
//! The preference is either a theme id or `auto`. `auto` resolves to `dark`
//! when the system prefers dark and to `ocean` otherwise; an id that is not
//! registered also resolves to `ocean`. See [`resolve`].
//!
//! ## Persistence
//!
//! The selected id is stored under the `mini-toolbox-theme` key of a
//! [`KeyValueStore`]. Storage failures are logged through `tracing` and never
//! returned: the in-memory preference stays authoritative.
//!
//! ## Document contract
//!
//! Whenever the preference or the system signal changes, the root receives
//! `data-theme="<id>"`, one `--theme-<role>` custom property per palette
//! entry, and the `dark-theme` class while a dark theme is in effect.

mod apply;
mod config;
mod context;
mod error;
mod resolve;
mod store;
pub mod theme;
mod util;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use apply::{RootElement, RootSnapshot, ThemeApplier, DARK_CLASS, THEME_ATTRIBUTE};
pub use config::ThemeConfig;
pub use context::{SubscriptionId, ThemeChange, ThemeContext, ThemeContextBuilder};
pub use error::{ColorParseError, RegistryError, StoreError};
pub use resolve::{resolve, wants_dark_class};
pub use store::{
    FileStore, KeyValueStore, MemoryStore, PreferenceStore, DEFAULT_STORAGE_KEY,
};
pub use theme::{
    Color, ColorMode, ColorRole, Palette, SystemAppearance, ThemeDescriptor, ThemeDetector,
    ThemePreference, ThemeRegistry, AUTO_THEME_ID, CSS_VARIABLE_PREFIX, DARK_THEME_ID,
    DEFAULT_THEME_ID,
};
#[cfg(feature = "cli")]
pub use util::pad_to_width;
pub use util::rgb_to_ansi256;
