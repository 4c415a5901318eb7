// SPDX-License-Identifier: MIT
//
// pane-term — a minimal terminal text-display engine.
//
// Keeps two grids of cells: the front grid is what the caller wants on
// screen, the back grid is what was last written to the terminal. Callers
// only ever touch the front grid. A full redraw repaints everything; a
// flush diffs the grids and writes only the cells that changed, then
// brings the back grid into agreement.
//
// All terminal output goes through the `Sink` trait, so tests capture the
// exact stream of cursor moves, color changes, and glyphs without a real
// terminal attached. Output is 24-bit color only and every cell is one
// column wide.

pub mod ansi;
pub mod cell;
pub mod color;
pub mod config;
pub mod error;
pub mod op;
pub mod output;
pub mod screen;
pub mod terminal;

pub use cell::Cell;
pub use color::{Attributes, Color};
pub use config::ScreenConfig;
pub use error::{Error, Result};
pub use op::Op;
pub use output::{AnsiSink, Emit, Recorder, Sink};
pub use screen::{RenderStats, Screen};
