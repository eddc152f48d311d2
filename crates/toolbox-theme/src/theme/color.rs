//! Semantic color roles, hex colors and palettes.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorParseError;

/// Prefix of every CSS custom property written for a palette entry.
pub const CSS_VARIABLE_PREFIX: &str = "--theme-";

/// A semantic role a palette assigns a color to.
///
/// Variants are ordered the way palettes are written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Accent,
    Success,
    Warning,
    Error,
}

impl ColorRole {
    /// All roles in palette order.
    pub const ALL: [ColorRole; 6] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Accent,
        ColorRole::Success,
        ColorRole::Warning,
        ColorRole::Error,
    ];

    /// Lowercase role name, e.g. `"primary"`.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorRole::Primary => "primary",
            ColorRole::Secondary => "secondary",
            ColorRole::Accent => "accent",
            ColorRole::Success => "success",
            ColorRole::Warning => "warning",
            ColorRole::Error => "error",
        }
    }

    /// CSS custom property carrying this role, e.g. `"--theme-primary"`.
    pub fn css_variable(self) -> String {
        format!("{}{}", CSS_VARIABLE_PREFIX, self.as_str())
    }
}

impl fmt::Display for ColorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An opaque sRGB color.
///
/// Parsed from `#rgb` or `#rrggbb` and always displayed as lowercase `#rrggbb`,
/// which is the form written into CSS variables.
///
/// # Example
///
/// ```rust
/// use toolbox_theme::Color;
///
/// let green: Color = "#4CAF50".parse().unwrap();
/// assert_eq!(green.rgb(), (0x4c, 0xaf, 0x50));
/// assert_eq!(green.to_string(), "#4caf50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    r: u8,
    g: u8,
    b: u8,
}

impl Color {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Builds a color from a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError {
            input: s.to_string(),
        };
        let digits = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| err());
        match digits.len() {
            3 => {
                // #abc expands to #aabbcc
                let expand = |i: usize| channel(&digits[i..=i].repeat(2));
                Ok(Self::from_rgb(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::from_rgb(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Mapping from semantic role to color.
///
/// Iteration follows [`ColorRole`] order regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: BTreeMap<ColorRole, Color>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a role, returning the updated palette for chaining.
    pub fn with(mut self, role: ColorRole, color: Color) -> Self {
        self.colors.insert(role, color);
        self
    }

    pub fn get(&self, role: ColorRole) -> Option<Color> {
        self.colors.get(&role).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ColorRole, Color)> + '_ {
        self.colors.iter().map(|(role, color)| (*role, *color))
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// `(css variable, value)` pairs for every entry.
    pub fn css_variables(&self) -> impl Iterator<Item = (String, String)> + '_ {
        self.iter()
            .map(|(role, color)| (role.css_variable(), color.to_string()))
    }
}
