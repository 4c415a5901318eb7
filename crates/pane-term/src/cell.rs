// SPDX-License-Identifier: MIT
//
// Cell — one position in the screen grid.
//
// A glyph plus the attributes it is drawn with. Cells are small `Copy`
// values and compare structurally: two cells are equal only when the glyph
// and all four attribute fields match. The flush diff relies on exactly
// that, so a color-only change is a change.
//
// Every cell is assumed to occupy one terminal column. There is no
// wide-character or combining-mark handling.

use std::fmt;

use crate::color::{Attributes, Color};

/// A single grid cell: glyph plus attributes.
///
/// # Examples
///
/// ```
/// use pane_term::cell::Cell;
/// use pane_term::color::Color;
///
/// let plain = Cell::new('a');
/// let red = Cell::colored('a', Color::new(255, 0, 0));
/// assert_ne!(plain, red);
/// assert_eq!(red, plain.with_fg(Color::new(255, 0, 0)));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    /// The character displayed in this cell.
    pub glyph: char,
    /// How it's drawn.
    pub attrs: Attributes,
}

impl Cell {
    /// A space with default attributes.
    pub const BLANK: Self = Self::new(' ');

    /// A glyph with default attributes.
    #[inline]
    #[must_use]
    pub const fn new(glyph: char) -> Self {
        Self::from_parts(glyph, Attributes::DEFAULT)
    }

    /// A glyph in the given foreground over the default background.
    #[inline]
    #[must_use]
    pub const fn colored(glyph: char, fg: Color) -> Self {
        Self::from_parts(glyph, Attributes::foreground(fg))
    }

    /// A glyph with both colors.
    #[inline]
    #[must_use]
    pub const fn painted(glyph: char, bg: Color, fg: Color) -> Self {
        Self::from_parts(glyph, Attributes::colors(bg, fg))
    }

    /// A glyph with every attribute field given.
    #[inline]
    #[must_use]
    pub const fn styled(glyph: char, bg: Color, fg: Color, bold: bool, underline: bool) -> Self {
        Self::from_parts(glyph, Attributes::full(bg, fg, bold, underline))
    }

    /// A glyph with a prebuilt attribute set.
    #[inline]
    #[must_use]
    pub const fn from_parts(glyph: char, attrs: Attributes) -> Self {
        Self { glyph, attrs }
    }

    // ─── Builders ─────────────────────────────────────────────────────────

    /// Replace the glyph, keeping the attributes.
    #[inline]
    #[must_use]
    pub const fn with_glyph(self, glyph: char) -> Self {
        Self { glyph, ..self }
    }

    /// Replace the foreground color.
    #[inline]
    #[must_use]
    pub const fn with_fg(self, fg: Color) -> Self {
        Self::from_parts(self.glyph, self.attrs.with_fg(fg))
    }

    /// Replace the background color.
    #[inline]
    #[must_use]
    pub const fn with_bg(self, bg: Color) -> Self {
        Self::from_parts(self.glyph, self.attrs.with_bg(bg))
    }

    /// Set or clear bold.
    #[inline]
    #[must_use]
    pub const fn with_bold(self, bold: bool) -> Self {
        Self::from_parts(self.glyph, self.attrs.with_bold(bold))
    }

    /// Set or clear underline.
    #[inline]
    #[must_use]
    pub const fn with_underline(self, underline: bool) -> Self {
        Self::from_parts(self.glyph, self.attrs.with_underline(underline))
    }
}

impl Default for Cell {
    #[inline]
    fn default() -> Self {
        Self::BLANK
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let defaults = Attributes::DEFAULT;
        write!(f, "Cell({:?}", self.glyph)?;
        if self.attrs.fg != defaults.fg {
            write!(f, ", fg={}", self.attrs.fg)?;
        }
        if self.attrs.bg != defaults.bg {
            write!(f, ", bg={}", self.attrs.bg)?;
        }
        if self.attrs.bold {
            write!(f, ", bold")?;
        }
        if self.attrs.underline {
            write!(f, ", underline")?;
        }
        write!(f, ")")
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
