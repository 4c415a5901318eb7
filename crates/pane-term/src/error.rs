// SPDX-License-Identifier: MIT
//
// Recoverable errors.
//
// Misuse of the screen API (out-of-range coordinates, a zero-sized screen)
// is a programming error and panics at the call site. What ends up here is
// what a caller can actually hit at runtime: a terminal write failing, or a
// configuration that came from outside the program and doesn't hold up.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong outside of a contract violation.
#[derive(Debug, Error)]
pub enum Error {
    /// Writing through a sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A configuration file couldn't be read.
    #[error("failed to read {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A screen needs at least one column and one row.
    #[error("screen must be at least 1x1, got {width}x{height}")]
    ZeroSize { width: u16, height: u16 },

    /// The fill glyph must be printable.
    #[error("fill glyph {0:?} is a control character")]
    InvalidFill(char),

    /// A color string that isn't `#rgb` or `#rrggbb`.
    #[error("invalid color {0:?}, expected #rgb or #rrggbb")]
    InvalidColor(String),

    /// The configuration file didn't parse.
    #[error("invalid screen configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
