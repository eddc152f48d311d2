//! Color and text helpers for terminal previews.

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// # Example
///
/// ```rust
/// use toolbox_theme::rgb_to_ansi256;
///
/// // Pure red maps to ANSI 196
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

/// Pads `s` with spaces to `width` display columns.
///
/// Wide characters (CJK, emoji) count as two columns. Strings already wider
/// than `width` are returned unchanged.
#[cfg(feature = "cli")]
pub fn pad_to_width(s: &str, width: usize) -> String {
    use unicode_width::UnicodeWidthStr;

    let current = s.width();
    let mut padded = String::with_capacity(s.len() + width.saturating_sub(current));
    padded.push_str(s);
    padded.extend(std::iter::repeat(' ').take(width.saturating_sub(current)));
    padded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_to_ansi256_grayscale() {
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
        let mid = rgb_to_ansi256((128, 128, 128));
        assert!((232..=255).contains(&mid));
    }

    #[test]
    fn test_rgb_to_ansi256_theme_colors() {
        // forest primary #4caf50
        assert_eq!(rgb_to_ansi256((0x4c, 0xaf, 0x50)), 16 + 36 + 6 * 3 + 1);
        assert_eq!(rgb_to_ansi256((0, 0, 255)), 21);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_pad_to_width_ascii() {
        assert_eq!(pad_to_width("ocean", 8), "ocean   ");
        assert_eq!(pad_to_width("sunset", 3), "sunset");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_pad_to_width_wide_chars() {
        assert_eq!(pad_to_width("🌊", 4), "🌊  ");
        assert_eq!(pad_to_width("海洋", 5), "海洋 ");
    }
}
