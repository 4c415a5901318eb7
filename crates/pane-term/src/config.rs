// SPDX-License-Identifier: MIT
//
// Screen construction parameters.
//
// A screen is fixed at construction: origin, size, fill glyph, and the
// default colors never change afterwards. `ScreenConfig` holds those seven
// values, and doubles as the on-disk format so a dashboard can be laid out
// from a TOML file:
//
//   x = 0
//   y = 2
//   width = 60
//   height = 12
//   fill = "."
//   background = "#101820"
//   foreground = "#f2aa4c"
//
// Every field is optional in the file; missing ones take the defaults
// below. Values from outside the program go through `validate()` before a
// screen is built from them, because `Screen::new` treats a bad size as a
// bug and panics.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::color::{Attributes, Color};
use crate::error::{Error, Result};

/// Origin, size, fill glyph, and default colors for a [`Screen`](crate::Screen).
///
/// The three builder steps mirror the three ways to construct a screen:
/// dimensions only, dimensions plus fill glyph, and everything.
///
/// ```
/// use pane_term::config::ScreenConfig;
/// use pane_term::color::Color;
///
/// let sized = ScreenConfig::new(0, 0, 40, 10);
/// assert_eq!(sized.fill, ' ');
///
/// let dotted = sized.with_fill('.');
/// let themed = dotted.with_colors(Color::gray(16), Color::new(0, 255, 0));
/// assert_eq!(themed.foreground, Color::new(0, 255, 0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScreenConfig {
    /// Column of the screen's top-left corner on the terminal.
    pub x: u16,
    /// Row of the screen's top-left corner on the terminal.
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
    /// Glyph used for blank cells, on construction and after a scroll.
    pub fill: char,
    /// Default background color.
    pub background: Color,
    /// Default foreground color.
    pub foreground: Color,
}

impl ScreenConfig {
    /// Dimensions-only form: space fill, white on black.
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
            fill: ' ',
            background: Color::BLACK,
            foreground: Color::WHITE,
        }
    }

    /// Use a different fill glyph.
    #[must_use]
    pub const fn with_fill(self, fill: char) -> Self {
        Self { fill, ..self }
    }

    /// Use different default colors.
    #[must_use]
    pub const fn with_colors(self, background: Color, foreground: Color) -> Self {
        Self {
            background,
            foreground,
            ..self
        }
    }

    /// The attributes a fresh screen starts with.
    #[must_use]
    pub const fn attrs(&self) -> Attributes {
        Attributes::colors(self.background, self.foreground)
    }

    /// The cell every position holds right after construction.
    #[must_use]
    pub const fn blank(&self) -> Cell {
        Cell::from_parts(self.fill, self.attrs())
    }

    /// Check the values a screen would reject.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroSize`] when either dimension is zero,
    /// [`Error::InvalidFill`] when the fill glyph is a control character.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill.is_control() {
            return Err(Error::InvalidFill(self.fill));
        }
        Ok(())
    }

    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when the document doesn't parse, or any error
    /// from [`validate`](Self::validate).
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigRead`] when the file can't be read, otherwise as
    /// [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.display(),
            width = config.width,
            height = config.height,
            "loaded screen config"
        );
        Ok(config)
    }

    /// Serialize back to TOML.
    ///
    /// # Errors
    ///
    /// Only if serialization itself fails, which plain fields never do.
    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string(self)
    }
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self::new(0, 0, 80, 24)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
