// SPDX-License-Identifier: MIT
//
// Color and attribute model.
//
// Everything here is a plain value: three 8-bit channels for a color, and
// a background/foreground pair plus bold and underline flags for the style
// of a cell. The terminal is assumed to speak 24-bit color, so there is no
// palette, no default-color sentinel, and no alpha. What you store is
// exactly what gets emitted.
//
// Colors are written in configuration files as hex strings (`#rrggbb` or
// the short `#rgb`), so serde goes through the same parser as `FromStr`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A 24-bit RGB color.
///
/// # Examples
///
/// ```
/// use pane_term::color::Color;
///
/// let orange = Color::new(255, 128, 0);
/// assert_eq!(orange.packed(), 0xFF8000);
/// assert_eq!(Color::gray(7), Color::new(7, 7, 7));
/// assert_eq!(Color::hex("#ff8000"), Some(orange));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// Pure black, the default background.
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Pure white, the default foreground.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color from its three channels.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// A gray with every channel set to `level`.
    #[inline]
    #[must_use]
    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    /// Pack into a single integer: red in bits 16–23, green 8–15, blue 0–7.
    #[inline]
    #[must_use]
    pub const fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Unpack from the [`packed`](Self::packed) layout. Bits above 23 are ignored.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)] // Masked to 8 bits first.
    pub const fn from_packed(value: u32) -> Self {
        Self::new(
            (value >> 16 & 0xFF) as u8,
            (value >> 8 & 0xFF) as u8,
            (value & 0xFF) as u8,
        )
    }

    /// Parse `#rrggbb`, `rrggbb`, `#rgb`, or `rgb`.
    ///
    /// ```
    /// use pane_term::color::Color;
    ///
    /// assert_eq!(Color::hex("#0f8"), Some(Color::new(0x00, 0xff, 0x88)));
    /// assert_eq!(Color::hex("12ab34"), Some(Color::new(0x12, 0xab, 0x34)));
    /// assert_eq!(Color::hex("#12345"), None);
    /// ```
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        parse_hex(s)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06x}", self.packed())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s.trim()).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

// ─── Attributes ──────────────────────────────────────────────────────────────

/// The visual style of a cell: colors plus bold and underline.
///
/// The default is white text on black with neither flag set.
///
/// ```
/// use pane_term::color::{Attributes, Color};
///
/// let warn = Attributes::foreground(Color::new(255, 200, 0)).with_bold(true);
/// assert_eq!(warn.bg, Color::BLACK);
/// assert!(warn.bold);
/// assert!(!warn.underline);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Attributes {
    /// Background color.
    pub bg: Color,
    /// Foreground (text) color.
    pub fg: Color,
    /// Bold / increased intensity.
    pub bold: bool,
    /// Single straight underline.
    pub underline: bool,
}

impl Attributes {
    /// White on black, no bold, no underline.
    pub const DEFAULT: Self = Self::full(Color::BLACK, Color::WHITE, false, false);

    /// Same as [`DEFAULT`](Self::DEFAULT).
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Default background with the given foreground.
    #[inline]
    #[must_use]
    pub const fn foreground(fg: Color) -> Self {
        Self { fg, ..Self::DEFAULT }
    }

    /// Both colors, no bold, no underline.
    #[inline]
    #[must_use]
    pub const fn colors(bg: Color, fg: Color) -> Self {
        Self::full(bg, fg, false, false)
    }

    /// Every field spelled out.
    #[inline]
    #[must_use]
    pub const fn full(bg: Color, fg: Color, bold: bool, underline: bool) -> Self {
        Self {
            bg,
            fg,
            bold,
            underline,
        }
    }

    /// Replace the foreground.
    #[inline]
    #[must_use]
    pub const fn with_fg(self, fg: Color) -> Self {
        Self { fg, ..self }
    }

    /// Replace the background.
    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: Color) -> Self {
        Self { bg, ..self }
    }

    /// Set or clear bold.
    #[inline]
    #[must_use]
    pub const fn with_bold(self, bold: bool) -> Self {
        Self { bold, ..self }
    }

    /// Set or clear underline.
    #[inline]
    #[must_use]
    pub const fn with_underline(self, underline: bool) -> Self {
        Self { underline, ..self }
    }

    /// Whether bold and underline match, ignoring colors.
    #[inline]
    #[must_use]
    pub const fn same_style(&self, other: &Self) -> bool {
        self.bold == other.bold && self.underline == other.underline
    }
}

impl Default for Attributes {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ─── Hex Parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Color> {
    let s = s.strip_prefix('#').unwrap_or(s);
    let bytes = s.as_bytes();

    match bytes.len() {
        // #RGB
        3 => {
            let r = parse_hex_digit(bytes[0])?;
            let g = parse_hex_digit(bytes[1])?;
            let b = parse_hex_digit(bytes[2])?;
            Some(Color::new(r << 4 | r, g << 4 | g, b << 4 | b))
        }
        // #RRGGBB
        6 => {
            let r = parse_hex_byte(&bytes[0..2])?;
            let g = parse_hex_byte(&bytes[2..4])?;
            let b = parse_hex_byte(&bytes[4..6])?;
            Some(Color::new(r, g, b))
        }
        _ => None,
    }
}

#[inline]
const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Color ───────────────────────────────────────────────────────────

    #[test]
    fn new_sets_channels() {
        let c = Color::new(1, 2, 3);
        assert_eq!((c.r, c.g, c.b), (1, 2, 3));
    }

    #[test]
    fn gray_fills_all_channels() {
        assert_eq!(Color::gray(128), Color::new(128, 128, 128));
    }

    #[test]
    fn packed_layout() {
        assert_eq!(Color::new(0x12, 0x34, 0x56).packed(), 0x0012_3456);
        assert_eq!(Color::WHITE.packed(), 0x00FF_FFFF);
        assert_eq!(Color::BLACK.packed(), 0);
    }

    #[test]
    fn packed_channels_do_not_overlap() {
        assert_eq!(Color::new(255, 0, 0).packed(), 0xFF_0000);
        assert_eq!(Color::new(0, 255, 0).packed(), 0x00_FF00);
        assert_eq!(Color::new(0, 0, 255).packed(), 0x00_00FF);
    }

    #[test]
    fn from_packed_inverts_packed() {
        let c = Color::new(200, 100, 50);
        assert_eq!(Color::from_packed(c.packed()), c);
    }

    #[test]
    fn from_packed_ignores_high_byte() {
        assert_eq!(Color::from_packed(0xAB12_3456), Color::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn equality_is_componentwise() {
        assert_eq!(Color::new(1, 2, 3), Color::new(1, 2, 3));
        assert_ne!(Color::new(1, 2, 3), Color::new(1, 2, 4));
        assert_ne!(Color::new(1, 2, 3), Color::new(0, 2, 3));
    }

    #[test]
    fn default_color_is_black() {
        assert_eq!(Color::default(), Color::BLACK);
    }

    #[test]
    fn from_tuple() {
        assert_eq!(Color::from((9, 8, 7)), Color::new(9, 8, 7));
    }

    // ── Hex ─────────────────────────────────────────────────────────────

    #[test]
    fn hex_long_form() {
        assert_eq!(Color::hex("#FF8000"), Some(Color::new(255, 128, 0)));
        assert_eq!(Color::hex("ff8000"), Some(Color::new(255, 128, 0)));
    }

    #[test]
    fn hex_short_form_expands_digits() {
        assert_eq!(Color::hex("#abc"), Some(Color::new(0xAA, 0xBB, 0xCC)));
    }

    #[test]
    fn hex_rejects_bad_input() {
        assert_eq!(Color::hex(""), None);
        assert_eq!(Color::hex("#"), None);
        assert_eq!(Color::hex("#12"), None);
        assert_eq!(Color::hex("#gg0000"), None);
        assert_eq!(Color::hex("#1234567"), None);
    }

    #[test]
    fn display_is_lowercase_hex() {
        assert_eq!(Color::new(0xAB, 0x01, 0xFF).to_string(), "#ab01ff");
        assert_eq!(Color::BLACK.to_string(), "#000000");
    }

    #[test]
    fn from_str_trims_and_reports_input() {
        assert_eq!(" #010203 ".parse::<Color>().unwrap(), Color::new(1, 2, 3));
        let err = "red".parse::<Color>().unwrap_err();
        assert!(matches!(err, Error::InvalidColor(ref s) if s == "red"));
    }

    #[test]
    fn display_parses_back() {
        let c = Color::new(17, 34, 51);
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
    }

    // ── Attributes ──────────────────────────────────────────────────────

    #[test]
    fn default_attributes() {
        let a = Attributes::default();
        assert_eq!(a.bg, Color::BLACK);
        assert_eq!(a.fg, Color::WHITE);
        assert!(!a.bold);
        assert!(!a.underline);
        assert_eq!(a, Attributes::new());
        assert_eq!(a, Attributes::DEFAULT);
    }

    #[test]
    fn foreground_keeps_default_background() {
        let a = Attributes::foreground(Color::new(1, 1, 1));
        assert_eq!(a.bg, Color::BLACK);
        assert_eq!(a.fg, Color::new(1, 1, 1));
    }

    #[test]
    fn colors_sets_both() {
        let a = Attributes::colors(Color::new(1, 0, 0), Color::new(0, 1, 0));
        assert_eq!(a.bg, Color::new(1, 0, 0));
        assert_eq!(a.fg, Color::new(0, 1, 0));
        assert!(!a.bold && !a.underline);
    }

    #[test]
    fn full_sets_every_field() {
        let a = Attributes::full(Color::gray(1), Color::gray(2), true, true);
        assert_eq!(a.bg, Color::gray(1));
        assert_eq!(a.fg, Color::gray(2));
        assert!(a.bold);
        assert!(a.underline);
    }

    #[test]
    fn builder_chain() {
        let a = Attributes::new()
            .with_fg(Color::gray(9))
            .with_bg(Color::gray(3))
            .with_bold(true)
            .with_underline(true);
        assert_eq!(a, Attributes::full(Color::gray(3), Color::gray(9), true, true));
    }

    #[test]
    fn attributes_differ_by_any_field() {
        let base = Attributes::new();
        assert_ne!(base, base.with_fg(Color::gray(1)));
        assert_ne!(base, base.with_bg(Color::gray(1)));
        assert_ne!(base, base.with_bold(true));
        assert_ne!(base, base.with_underline(true));
    }

    #[test]
    fn same_style_ignores_colors() {
        let a = Attributes::new().with_bold(true);
        assert!(a.same_style(&a.with_fg(Color::gray(5))));
        assert!(!a.same_style(&a.with_underline(true)));
    }
}
