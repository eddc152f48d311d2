//! System dark-mode signal.
//!
//! Native platforms have no change notification, so [`SystemAppearance`]
//! re-queries its detector when asked to [`refresh`](SystemAppearance::refresh).
//! In a browser the `web` feature pushes changes instead through
//! `MediaQueryWatch`.

use dark_light::{detect as detect_os_theme, Mode as OsThemeMode};

/// The color mode reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Light,
    Dark,
}

impl ColorMode {
    pub fn is_dark(self) -> bool {
        self == ColorMode::Dark
    }
}

/// Function that reports the current host color mode.
pub type ThemeDetector = fn() -> ColorMode;

/// Observed state of the system dark-mode signal.
///
/// The detector is queried once at construction; afterwards the value only
/// changes through [`refresh`](Self::refresh) or [`set`](Self::set).
#[derive(Debug, Clone)]
pub struct SystemAppearance {
    detector: ThemeDetector,
    prefers_dark: bool,
}

impl SystemAppearance {
    /// Observes the operating system setting.
    pub fn detect() -> Self {
        Self::with_detector(os_theme_detector)
    }

    /// Observes a custom detector, e.g. a fixed mode in tests.
    pub fn with_detector(detector: ThemeDetector) -> Self {
        Self {
            detector,
            prefers_dark: detector().is_dark(),
        }
    }

    /// A fixed signal that never changes on refresh.
    pub fn fixed(mode: ColorMode) -> Self {
        let detector: ThemeDetector = match mode {
            ColorMode::Light => || ColorMode::Light,
            ColorMode::Dark => || ColorMode::Dark,
        };
        Self::with_detector(detector)
    }

    pub fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    /// Re-queries the detector, returning the new value if it changed.
    pub fn refresh(&mut self) -> Option<bool> {
        let prefers_dark = (self.detector)().is_dark();
        self.set(prefers_dark)
    }

    /// Records a pushed value, returning it if it differs from the last one.
    pub fn set(&mut self, prefers_dark: bool) -> Option<bool> {
        if prefers_dark == self.prefers_dark {
            return None;
        }
        self.prefers_dark = prefers_dark;
        Some(prefers_dark)
    }
}

fn os_theme_detector() -> ColorMode {
    match detect_os_theme() {
        OsThemeMode::Dark => ColorMode::Dark,
        OsThemeMode::Light => ColorMode::Light,
    }
}
