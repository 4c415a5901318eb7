// SPDX-License-Identifier: MIT
//
// Terminal output sinks.
//
// The screen never writes bytes itself. It asks a `Sink` to move the cursor
// or print a glyph, and the sink decides what that means:
//
//   AnsiSink — encodes each call as an escape sequence (via `ansi`) and
//   writes it straight to the wrapped writer. No buffering of its own; wrap
//   a `BufWriter` if you want batching, or hand it a locked stdout.
//
//   Recorder — keeps every call as an `Emit` value, in order. Tests assert
//   on the exact sequence of moves and glyphs without parsing escape
//   sequences back out of a byte stream.
//
// Ordering is the only guarantee: calls reach the sink in exactly the order
// the screen makes them.

use std::io::{self, Write};

use crate::ansi;
use crate::color::Color;

// ─── Sink ────────────────────────────────────────────────────────────────────

/// Where a screen sends its output.
///
/// Coordinates are absolute terminal positions, 0-indexed. Every call
/// reports I/O failure through `io::Result`.
pub trait Sink {
    /// Move the terminal cursor to `(x, y)`.
    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()>;

    /// Select the foreground color for subsequent glyphs.
    fn set_fg(&mut self, color: Color) -> io::Result<()>;

    /// Select the background color for subsequent glyphs.
    fn set_bg(&mut self, color: Color) -> io::Result<()>;

    /// Turn bold and underline on or off for subsequent glyphs.
    fn set_style(&mut self, bold: bool, underline: bool) -> io::Result<()>;

    /// Print one glyph at the cursor; the terminal advances the cursor.
    fn put(&mut self, glyph: char) -> io::Result<()>;

    /// Push anything held by the underlying stream to the device.
    fn flush(&mut self) -> io::Result<()>;
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        (**self).move_to(x, y)
    }

    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_fg(color)
    }

    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        (**self).set_bg(color)
    }

    fn set_style(&mut self, bold: bool, underline: bool) -> io::Result<()> {
        (**self).set_style(bold, underline)
    }

    fn put(&mut self, glyph: char) -> io::Result<()> {
        (**self).put(glyph)
    }

    fn flush(&mut self) -> io::Result<()> {
        (**self).flush()
    }
}

// ─── AnsiSink ────────────────────────────────────────────────────────────────

/// A sink that writes ANSI escape sequences to any [`Write`].
///
/// ```
/// use pane_term::output::{AnsiSink, Sink};
/// use pane_term::color::Color;
///
/// let mut sink = AnsiSink::new(Vec::new());
/// sink.move_to(2, 1).unwrap();
/// sink.set_bg(Color::new(0, 0, 255)).unwrap();
/// sink.put('X').unwrap();
/// assert_eq!(sink.into_inner(), b"\x1b[2;3H\x1b[48;2;0;0;255mX");
/// ```
#[derive(Debug)]
pub struct AnsiSink<W: Write> {
    writer: W,
}

impl<W: Write> AnsiSink<W> {
    /// Wrap a writer.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// The wrapped writer.
    #[must_use]
    pub const fn get_ref(&self) -> &W {
        &self.writer
    }

    /// The wrapped writer, mutably.
    pub const fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Unwrap and return the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for AnsiSink<W> {
    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        ansi::cursor_to(&mut self.writer, x, y)
    }

    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        ansi::fg(&mut self.writer, color)
    }

    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        ansi::bg(&mut self.writer, color)
    }

    fn set_style(&mut self, bold: bool, underline: bool) -> io::Result<()> {
        ansi::style(&mut self.writer, bold, underline)
    }

    fn put(&mut self, glyph: char) -> io::Result<()> {
        let mut enc = [0u8; 4];
        self.writer.write_all(glyph.encode_utf8(&mut enc).as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

// ─── Recorder ────────────────────────────────────────────────────────────────

/// One call made on a [`Recorder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    /// Cursor moved to `(x, y)`.
    Move(u16, u16),
    /// Foreground selected.
    Fg(Color),
    /// Background selected.
    Bg(Color),
    /// Bold / underline state.
    Style { bold: bool, underline: bool },
    /// A glyph was printed.
    Glyph(char),
}

/// A sink that records every call instead of writing anywhere.
///
/// Flushes are counted but not recorded as events, so "nothing was emitted"
/// means [`events`](Self::events) is empty regardless of flushing.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    events: Vec<Emit>,
    flushes: usize,
}

impl Recorder {
    /// An empty recorder.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            flushes: 0,
        }
    }

    /// Everything recorded so far, oldest first.
    #[must_use]
    pub fn events(&self) -> &[Emit] {
        &self.events
    }

    /// Drain and return the recorded events. The flush count is kept.
    pub fn take(&mut self) -> Vec<Emit> {
        std::mem::take(&mut self.events)
    }

    /// Whether no events have been recorded since the last [`take`](Self::take).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// How many times `flush` was called.
    #[must_use]
    pub const fn flushes(&self) -> usize {
        self.flushes
    }

    /// The printed glyphs concatenated, ignoring moves and colors.
    #[must_use]
    pub fn glyphs(&self) -> String {
        self.events
            .iter()
            .filter_map(|e| match e {
                Emit::Glyph(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// Number of cursor moves recorded.
    #[must_use]
    pub fn moves(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Emit::Move(..)))
            .count()
    }
}

impl Sink for Recorder {
    fn move_to(&mut self, x: u16, y: u16) -> io::Result<()> {
        self.events.push(Emit::Move(x, y));
        Ok(())
    }

    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        self.events.push(Emit::Fg(color));
        Ok(())
    }

    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        self.events.push(Emit::Bg(color));
        Ok(())
    }

    fn set_style(&mut self, bold: bool, underline: bool) -> io::Result<()> {
        self.events.push(Emit::Style { bold, underline });
        Ok(())
    }

    fn put(&mut self, glyph: char) -> io::Result<()> {
        self.events.push(Emit::Glyph(glyph));
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ansi_output(f: impl FnOnce(&mut AnsiSink<Vec<u8>>) -> io::Result<()>) -> String {
        let mut sink = AnsiSink::new(Vec::new());
        f(&mut sink).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    // ── AnsiSink ────────────────────────────────────────────────────────

    #[test]
    fn ansi_move_is_one_based() {
        assert_eq!(ansi_output(|s| s.move_to(0, 0)), "\x1b[1;1H");
        assert_eq!(ansi_output(|s| s.move_to(4, 2)), "\x1b[3;5H");
    }

    #[test]
    fn ansi_fg_and_bg_use_distinct_codes() {
        let c = Color::new(1, 2, 3);
        assert_eq!(ansi_output(|s| s.set_fg(c)), "\x1b[38;2;1;2;3m");
        assert_eq!(ansi_output(|s| s.set_bg(c)), "\x1b[48;2;1;2;3m");
    }

    #[test]
    fn ansi_style() {
        assert_eq!(ansi_output(|s| s.set_style(true, false)), "\x1b[1;24m");
    }

    #[test]
    fn ansi_put_encodes_utf8() {
        assert_eq!(ansi_output(|s| s.put('A')), "A");
        assert_eq!(ansi_output(|s| s.put('é')), "é");
        assert_eq!(ansi_output(|s| s.put('█')), "█");
    }

    #[test]
    fn ansi_sink_writes_in_call_order() {
        let out = ansi_output(|s| {
            s.move_to(1, 1)?;
            s.set_fg(Color::WHITE)?;
            s.put('a')?;
            s.put('b')
        });
        assert_eq!(out, "\x1b[2;2H\x1b[38;2;255;255;255mab");
    }

    #[test]
    fn ansi_sink_accessors() {
        let mut sink = AnsiSink::new(Vec::new());
        sink.put('x').unwrap();
        assert_eq!(sink.get_ref(), b"x");
        sink.get_mut().clear();
        assert!(sink.get_ref().is_empty());
    }

    #[test]
    fn ansi_sink_propagates_write_errors() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let mut sink = AnsiSink::new(Closed);
        let err = sink.put('x').unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    // ── Recorder ────────────────────────────────────────────────────────

    #[test]
    fn recorder_keeps_order() {
        let mut rec = Recorder::new();
        rec.move_to(3, 4).unwrap();
        rec.set_fg(Color::WHITE).unwrap();
        rec.set_bg(Color::BLACK).unwrap();
        rec.set_style(false, true).unwrap();
        rec.put('z').unwrap();
        assert_eq!(
            rec.events(),
            &[
                Emit::Move(3, 4),
                Emit::Fg(Color::WHITE),
                Emit::Bg(Color::BLACK),
                Emit::Style {
                    bold: false,
                    underline: true
                },
                Emit::Glyph('z'),
            ]
        );
    }

    #[test]
    fn recorder_counts_flushes_separately() {
        let mut rec = Recorder::new();
        rec.flush().unwrap();
        rec.flush().unwrap();
        assert!(rec.is_empty());
        assert_eq!(rec.flushes(), 2);
    }

    #[test]
    fn recorder_take_drains() {
        let mut rec = Recorder::new();
        rec.put('a').unwrap();
        rec.flush().unwrap();
        assert_eq!(rec.take(), vec![Emit::Glyph('a')]);
        assert!(rec.is_empty());
        assert_eq!(rec.flushes(), 1);
    }

    #[test]
    fn recorder_glyphs_and_moves() {
        let mut rec = Recorder::new();
        rec.move_to(0, 0).unwrap();
        rec.put('h').unwrap();
        rec.set_fg(Color::WHITE).unwrap();
        rec.put('i').unwrap();
        rec.move_to(0, 1).unwrap();
        assert_eq!(rec.glyphs(), "hi");
        assert_eq!(rec.moves(), 2);
    }

    #[test]
    fn borrowed_sink_forwards() {
        fn drive<S: Sink>(mut sink: S) -> io::Result<()> {
            sink.put('k')?;
            sink.flush()
        }

        let mut rec = Recorder::new();
        drive(&mut rec).unwrap();
        assert_eq!(rec.events(), &[Emit::Glyph('k')]);
        assert_eq!(rec.flushes(), 1);
    }
}
