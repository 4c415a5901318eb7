// SPDX-License-Identifier: MIT
//
// Operations as values.
//
// Each `Op` is one screen primitive plus its arguments. Building them is
// free and side-effect free; applying one to a screen does exactly what
// the matching method would, nothing more. That makes a drawing script a
// plain `Vec<Op>` that can be built up front, stored, or replayed:
//
//   screen
//       .apply(op::move_to(0, 0))?
//       .apply(op::set_fg(255, 200, 0))?
//       .apply(op::plot(4, 1, '*'))?
//       .apply(op::flush())?;
//
// Text isn't an op. Streaming goes through `puts` or `write!`.

use crate::color::Color;
use crate::error::Result;
use crate::output::Sink;
use crate::screen::Screen;

/// A screen operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    /// Place the cursor, as [`Screen::set_cursor`].
    Move { x: u16, y: u16 },
    /// Fill every cell, as [`Screen::clear`]. `None` uses the screen's fill
    /// glyph.
    Clear(Option<char>),
    /// Write one cell without moving the cursor, as [`Screen::set`].
    Plot { x: u16, y: u16, glyph: char },
    /// Change the cursor colors. Only the channels given are touched.
    Recolor {
        fg: Option<Color>,
        bg: Option<Color>,
    },
    /// Sync the terminal, as [`Screen::flush`].
    Flush,
}

// ─── Constructors ────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)`.
#[inline]
#[must_use]
pub const fn move_to(x: u16, y: u16) -> Op {
    Op::Move { x, y }
}

/// Clear every cell to `glyph`.
#[inline]
#[must_use]
pub const fn clear(glyph: char) -> Op {
    Op::Clear(Some(glyph))
}

/// Clear every cell to the screen's fill glyph.
#[inline]
#[must_use]
pub const fn blank() -> Op {
    Op::Clear(None)
}

/// Write `glyph` at `(x, y)`.
#[inline]
#[must_use]
pub const fn plot(x: u16, y: u16, glyph: char) -> Op {
    Op::Plot { x, y, glyph }
}

/// Change only the cursor foreground.
#[inline]
#[must_use]
pub const fn set_fg(r: u8, g: u8, b: u8) -> Op {
    Op::Recolor {
        fg: Some(Color::new(r, g, b)),
        bg: None,
    }
}

/// Change only the cursor background.
#[inline]
#[must_use]
pub const fn set_bg(r: u8, g: u8, b: u8) -> Op {
    Op::Recolor {
        fg: None,
        bg: Some(Color::new(r, g, b)),
    }
}

/// Change both cursor colors.
#[inline]
#[must_use]
pub const fn set_colors(fg: Color, bg: Color) -> Op {
    Op::Recolor {
        fg: Some(fg),
        bg: Some(bg),
    }
}

/// Sync the terminal now.
#[inline]
#[must_use]
pub const fn flush() -> Op {
    Op::Flush
}

// ─── Applying ────────────────────────────────────────────────────────────────

impl<S: Sink> Screen<S> {
    /// Perform `op` and hand the screen back for chaining.
    ///
    /// # Panics
    ///
    /// Where the underlying method panics: a `Move` or `Plot` outside the
    /// screen.
    ///
    /// # Errors
    ///
    /// Only `Op::Flush` can fail, with the error [`flush`](Self::flush)
    /// returns.
    pub fn apply(&mut self, op: Op) -> Result<&mut Self> {
        match op {
            Op::Move { x, y } => self.set_cursor(x, y),
            Op::Clear(glyph) => self.clear(glyph.unwrap_or(self.fill())),
            Op::Plot { x, y, glyph } => self.set(x, y, glyph),
            Op::Recolor { fg, bg } => {
                if let Some(bg) = bg {
                    self.set_cursor_bg(bg);
                }
                if let Some(fg) = fg {
                    self.set_cursor_fg(fg);
                }
            }
            Op::Flush => {
                self.flush()?;
            }
        }
        Ok(self)
    }

    /// Apply each op in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// The first error from [`apply`](Self::apply).
    pub fn apply_all(&mut self, ops: impl IntoIterator<Item = Op>) -> Result<&mut Self> {
        for op in ops {
            self.apply(op)?;
        }
        Ok(self)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::Cell;
    use crate::color::Attributes;
    use crate::config::ScreenConfig;
    use crate::output::{Emit, Recorder};
    use pretty_assertions::assert_eq;

    fn screen(width: u16, height: u16) -> Screen<Recorder> {
        let mut s = Screen::new(Recorder::new(), ScreenConfig::new(0, 0, width, height)).unwrap();
        s.sink_mut().take();
        s
    }

    // ── Constructors ────────────────────────────────────────────────────

    #[test]
    fn constructors_build_variants() {
        assert_eq!(move_to(3, 4), Op::Move { x: 3, y: 4 });
        assert_eq!(clear('#'), Op::Clear(Some('#')));
        assert_eq!(blank(), Op::Clear(None));
        assert_eq!(plot(1, 2, 'p'), Op::Plot { x: 1, y: 2, glyph: 'p' });
        assert_eq!(flush(), Op::Flush);
    }

    #[test]
    fn recolor_channels() {
        assert_eq!(
            set_fg(1, 2, 3),
            Op::Recolor {
                fg: Some(Color::new(1, 2, 3)),
                bg: None
            }
        );
        assert_eq!(
            set_bg(4, 5, 6),
            Op::Recolor {
                fg: None,
                bg: Some(Color::new(4, 5, 6))
            }
        );
        assert_eq!(
            set_colors(Color::WHITE, Color::BLACK),
            Op::Recolor {
                fg: Some(Color::WHITE),
                bg: Some(Color::BLACK)
            }
        );
    }

    // ── Applying ────────────────────────────────────────────────────────

    #[test]
    fn move_sets_cursor() {
        let mut s = screen(5, 3);
        s.apply(move_to(4, 2)).unwrap();
        assert_eq!(s.cursor(), (4, 2));
    }

    #[test]
    #[should_panic(expected = "outside 5x3 screen")]
    fn move_outside_panics() {
        let mut s = screen(5, 3);
        let _ = s.apply(move_to(5, 0));
    }

    #[test]
    fn plot_matches_set() {
        let mut a = screen(4, 2);
        let mut b = screen(4, 2);
        a.apply(plot(3, 1, 'p')).unwrap();
        b.set(3, 1, 'p');
        assert_eq!(a.cells(), b.cells());
        assert_eq!(a.cursor(), (0, 0));
    }

    #[test]
    fn clear_and_blank() {
        let config = ScreenConfig::new(0, 0, 2, 2).with_fill('.');
        let mut s = Screen::new(Recorder::new(), config).unwrap();

        s.apply(clear('#')).unwrap();
        assert!(s.cells().iter().all(|c| c.glyph == '#'));

        s.apply(blank()).unwrap();
        assert!(s.cells().iter().all(|c| c.glyph == '.'));
    }

    #[test]
    fn recolor_touches_only_given_channels() {
        let mut s = screen(2, 2);
        s.apply(set_fg(255, 0, 0)).unwrap();
        assert_eq!(s.cursor_attrs().fg, Color::new(255, 0, 0));
        assert_eq!(s.cursor_attrs().bg, Color::BLACK);

        s.apply(set_bg(0, 0, 128)).unwrap();
        assert_eq!(s.cursor_attrs().fg, Color::new(255, 0, 0));
        assert_eq!(s.cursor_attrs().bg, Color::new(0, 0, 128));

        s.apply(set_colors(Color::WHITE, Color::BLACK)).unwrap();
        assert_eq!(s.cursor_attrs(), Attributes::DEFAULT);
    }

    #[test]
    fn recolor_keeps_style() {
        let mut s = screen(1, 1);
        s.set_cursor_bold(true);
        s.apply(set_fg(9, 9, 9)).unwrap();
        assert!(s.cursor_attrs().bold);
    }

    #[test]
    fn non_flush_ops_do_not_touch_terminal() {
        let mut s = screen(3, 3);
        s.apply_all([move_to(1, 1), set_fg(1, 1, 1), plot(0, 0, 'x'), clear('y'), blank()])
            .unwrap();
        assert!(s.sink().is_empty());
    }

    #[test]
    fn flush_op_syncs() {
        let mut s = screen(3, 3);
        s.apply(plot(1, 1, 'x')).unwrap().apply(flush()).unwrap();
        assert_eq!(s.sink().events(), &[Emit::Move(1, 1), Emit::Glyph('x')]);
        assert!(s.is_synced());
    }

    #[test]
    fn chained_script() {
        let mut s = screen(5, 2);
        s.apply(move_to(1, 0))
            .unwrap()
            .apply(set_fg(255, 200, 0))
            .unwrap()
            .apply(plot(4, 1, '*'))
            .unwrap()
            .apply(flush())
            .unwrap();

        assert_eq!(s.cursor(), (1, 0));
        assert_eq!(s.row(1)[4], Cell::colored('*', Color::new(255, 200, 0)));
        assert_eq!(s.sink().glyphs(), "*");
    }

    #[test]
    fn apply_all_runs_in_order() {
        let mut s = screen(3, 1);
        s.apply_all(vec![plot(0, 0, 'a'), set_fg(1, 2, 3), plot(1, 0, 'b'), flush()])
            .unwrap();

        assert_eq!(s.row(0)[0], Cell::new('a'));
        assert_eq!(s.row(0)[1], Cell::colored('b', Color::new(1, 2, 3)));
        assert_eq!(s.sink().glyphs(), "ab");
    }

    #[test]
    fn apply_all_then_text() {
        let mut s = screen(4, 1);
        s.apply_all([move_to(1, 0), set_bg(0, 0, 255)]).unwrap().puts("hi");
        assert_eq!(s.row(0)[1], Cell::painted('h', Color::new(0, 0, 255), Color::WHITE));
        assert_eq!(s.cursor(), (3, 0));
    }
}
