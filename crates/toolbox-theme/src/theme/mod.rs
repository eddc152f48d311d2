//! Theme registry and selection types.
//!
//! This module provides:
//!
//! - [`ThemeDescriptor`]: display metadata and optional palette for a theme id
//! - [`ThemeRegistry`]: ordered, id-keyed descriptors, including the built-ins
//! - [`ThemePreference`]: the user's selection, possibly `auto`
//! - [`SystemAppearance`] / [`ColorMode`]: the host dark-mode signal
//! - [`Color`], [`ColorRole`], [`Palette`]: semantic colors

mod adaptive;
mod choice;
mod color;
mod descriptor;
mod registry;

pub use adaptive::{ColorMode, SystemAppearance, ThemeDetector};
pub use choice::ThemePreference;
pub use color::{Color, ColorRole, Palette, CSS_VARIABLE_PREFIX};
pub use descriptor::ThemeDescriptor;
pub use registry::{ThemeRegistry, AUTO_THEME_ID, DARK_THEME_ID, DEFAULT_THEME_ID};
