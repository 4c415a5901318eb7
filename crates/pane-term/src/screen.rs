// SPDX-License-Identifier: MIT
//
// Screen — the double-grid buffer and its two ways of reaching the terminal.
//
// The screen owns two grids of identical shape:
//
//   front — what the caller wants on screen. Every mutation lands here.
//   back  — what was last written to the terminal. Only the sync passes
//           touch it, and both end by copying front over it.
//
// Both are flat `Vec<Cell>`s, row-major, index = x + y * width, so a row is
// a contiguous slice and "did this row change?" is one slice comparison.
//
// Two sync passes:
//
//   redraw — move to the start of every row and emit every glyph. Used on
//   construction and whenever the terminal's contents are unknown.
//
//   flush — skip rows whose front and back slices are equal; within a
//   changed row, skip equal cells; for each remaining cell, move the cursor
//   to it and emit the glyph. Exactly the changed cells are written.
//
// Colors are emitted through a "pen": the attributes the terminal was last
// told to use. Redraw starts with the pen unknown, so its first cell always
// states its colors and two redraws in a row produce identical output. A
// flush keeps the pen from the previous pass and emits colors when a cell's
// attributes differ from its back cell or from the pen.
//
// Text writing is a small state machine over the cursor:
//
//   (x, y) --glyph--> cell written at (x, y), x + 1
//   (x, y) --'\n'---> (0, y + 1), nothing written
//   x == width      -> (0, y + 1)              wrap
//   y == height     -> scroll, y = height - 1  before the next write
//
// `y == height` is a legal resting state between writes. It means "the
// next write scrolls first", which is how the last row can be filled
// completely without scrolling until there is something to put below it.

use std::fmt;
use std::io;
use std::ops::{Index, IndexMut};

use crate::cell::Cell;
use crate::color::{Attributes, Color};
use crate::config::ScreenConfig;
use crate::error::Result;
use crate::output::Sink;

// ─── RenderStats ─────────────────────────────────────────────────────────────

/// What a sync pass did, for profiling and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Cells whose glyph was written to the terminal.
    pub cells_rendered: usize,
    /// Cells that matched the back grid and were skipped.
    pub cells_skipped: usize,
    /// Whole rows skipped by the row comparison.
    pub rows_skipped: usize,
}

impl RenderStats {
    /// Total cells processed (rendered + skipped).
    #[inline]
    #[must_use]
    pub const fn total_cells(&self) -> usize {
        self.cells_rendered + self.cells_skipped
    }
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// A fixed-size grid of cells synchronized to a terminal through a [`Sink`].
///
/// # Examples
///
/// ```
/// use pane_term::{Emit, Recorder, Screen, ScreenConfig};
///
/// let mut screen = Screen::new(Recorder::new(), ScreenConfig::new(0, 0, 5, 3))?;
/// screen.sink_mut().take(); // drop the initial redraw
///
/// screen.set(2, 1, 'X');
/// screen.flush()?;
/// assert_eq!(screen.sink().events(), &[Emit::Move(2, 1), Emit::Glyph('X')]);
/// # Ok::<(), pane_term::Error>(())
/// ```
pub struct Screen<S> {
    sink: S,
    x: u16,
    y: u16,
    width: u16,
    height: u16,
    front: Vec<Cell>,
    back: Vec<Cell>,
    cursor_x: u16,
    cursor_y: u16,
    cursor_attrs: Attributes,
    fill: char,
    /// Attributes the terminal is currently drawing with, if known.
    pen: Option<Attributes>,
}

impl<S: Sink> Screen<S> {
    // ─── Construction ────────────────────────────────────────────────────

    /// Build a screen and draw it in full.
    ///
    /// Every cell starts as the config's fill glyph in its colors, and the
    /// cursor starts at `(0, 0)` with those same colors.
    ///
    /// # Panics
    ///
    /// If `config.width` or `config.height` is zero. Run
    /// [`ScreenConfig::validate`] first on values from outside the program.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) if the initial redraw fails to write.
    pub fn new(sink: S, config: ScreenConfig) -> Result<Self> {
        assert!(
            config.width > 0 && config.height > 0,
            "screen must be at least 1x1, got {}x{}",
            config.width,
            config.height
        );

        let size = usize::from(config.width) * usize::from(config.height);
        let front = vec![config.blank(); size];
        let mut screen = Self {
            sink,
            x: config.x,
            y: config.y,
            width: config.width,
            height: config.height,
            back: front.clone(),
            front,
            cursor_x: 0,
            cursor_y: 0,
            cursor_attrs: config.attrs(),
            fill: config.fill,
            pen: None,
        };
        screen.redraw()?;
        Ok(screen)
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Terminal position of the top-left cell.
    #[inline]
    #[must_use]
    pub const fn origin(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    /// Width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Glyph used to blank the row exposed by a scroll.
    #[inline]
    #[must_use]
    pub const fn fill(&self) -> char {
        self.fill
    }

    /// The whole front grid, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.front
    }

    /// A front-grid cell, or `None` outside the screen.
    #[inline]
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        (x < self.width && y < self.height).then(|| &self.front[self.index(x, y)])
    }

    /// Whether the terminal is known to show exactly the front grid.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.front == self.back
    }

    /// The sink this screen writes to.
    #[inline]
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// The sink, mutably.
    #[inline]
    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Tear down the screen and hand back its sink.
    #[must_use]
    pub fn into_sink(self) -> S {
        self.sink
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        usize::from(y) * usize::from(self.width) + usize::from(x)
    }

    #[inline]
    fn row_range(&self, y: u16) -> std::ops::Range<usize> {
        let start = self.index(0, y);
        start..start + usize::from(self.width)
    }

    // ─── Cursor ──────────────────────────────────────────────────────────

    /// Current cursor position.
    ///
    /// `y` may equal [`height`](Self::height) right after a write filled or
    /// newlined past the last row; the next write scrolls first.
    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> (u16, u16) {
        (self.cursor_x, self.cursor_y)
    }

    /// Place the cursor.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the screen.
    pub fn set_cursor(&mut self, x: u16, y: u16) {
        assert!(
            x < self.width && y < self.height,
            "cursor ({x}, {y}) outside {}x{} screen",
            self.width,
            self.height
        );
        self.cursor_x = x;
        self.cursor_y = y;
    }

    /// Attributes applied to the next written cell.
    #[inline]
    #[must_use]
    pub const fn cursor_attrs(&self) -> Attributes {
        self.cursor_attrs
    }

    /// Replace all cursor attributes at once.
    #[inline]
    pub const fn set_cursor_attrs(&mut self, attrs: Attributes) {
        self.cursor_attrs = attrs;
    }

    /// Foreground for subsequent writes.
    #[inline]
    pub const fn set_cursor_fg(&mut self, fg: Color) {
        self.cursor_attrs.fg = fg;
    }

    /// Background for subsequent writes.
    #[inline]
    pub const fn set_cursor_bg(&mut self, bg: Color) {
        self.cursor_attrs.bg = bg;
    }

    /// Bold for subsequent writes.
    #[inline]
    pub const fn set_cursor_bold(&mut self, bold: bool) {
        self.cursor_attrs.bold = bold;
    }

    /// Underline for subsequent writes.
    #[inline]
    pub const fn set_cursor_underline(&mut self, underline: bool) {
        self.cursor_attrs.underline = underline;
    }

    // ─── Rows ────────────────────────────────────────────────────────────

    /// Row `y` of the front grid.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    #[must_use]
    pub fn row(&self, y: u16) -> &[Cell] {
        assert!(y < self.height, "row {y} outside {}-row screen", self.height);
        &self.front[self.row_range(y)]
    }

    /// Row `y` of the front grid, mutably. Changes show up on the next flush.
    ///
    /// # Panics
    ///
    /// If `y >= height`.
    pub fn row_mut(&mut self, y: u16) -> &mut [Cell] {
        assert!(y < self.height, "row {y} outside {}-row screen", self.height);
        let range = self.row_range(y);
        &mut self.front[range]
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Write `glyph` at `(x, y)` with the cursor attributes. The cursor
    /// doesn't move.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is outside the screen.
    pub fn set(&mut self, x: u16, y: u16, glyph: char) {
        assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} screen",
            self.width,
            self.height
        );
        let idx = self.index(x, y);
        self.front[idx] = Cell::from_parts(glyph, self.cursor_attrs);
    }

    /// Overwrite every cell with `glyph` in the cursor attributes.
    ///
    /// Only the front grid changes; the next redraw or flush catches the
    /// terminal up.
    pub fn clear(&mut self, glyph: char) {
        self.front.fill(Cell::from_parts(glyph, self.cursor_attrs));
    }

    /// Shift everything up one row and blank the bottom row.
    ///
    /// The old top row is discarded. The new bottom row is the fill glyph
    /// in the cursor attributes, and the cursor moves to the bottom row.
    pub fn scroll(&mut self) {
        let w = usize::from(self.width);
        let len = self.front.len();
        self.front.copy_within(w.., 0);
        self.front[len - w..].fill(Cell::from_parts(self.fill, self.cursor_attrs));
        self.cursor_y = self.height - 1;
        tracing::trace!(height = self.height, "scrolled");
    }

    /// Write one glyph at the cursor and advance.
    ///
    /// `'\n'` moves to the start of the next row without writing. Filling
    /// the last column wraps to the next row. Writing when the cursor sits
    /// below the last row scrolls first.
    pub fn put(&mut self, glyph: char) {
        if self.cursor_y == self.height {
            self.scroll();
        }

        if glyph == '\n' {
            self.cursor_x = 0;
            self.cursor_y += 1;
        } else {
            let idx = self.index(self.cursor_x, self.cursor_y);
            self.front[idx] = Cell::from_parts(glyph, self.cursor_attrs);
            self.cursor_x += 1;
        }

        if self.cursor_x == self.width {
            self.cursor_x = 0;
            self.cursor_y += 1;
        }
    }

    /// [`put`](Self::put) each character of `s` in order.
    pub fn puts(&mut self, s: &str) {
        for glyph in s.chars() {
            self.put(glyph);
        }
    }

    // ─── Sync ────────────────────────────────────────────────────────────

    /// Write every cell to the terminal, then mark the terminal synced.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) from the sink. The back grid is left
    /// as it was, so a later flush retries everything that differs.
    pub fn redraw(&mut self) -> Result<RenderStats> {
        self.pen = None;
        let mut stats = RenderStats::default();

        if let Err(e) = self.redraw_pass(&mut stats) {
            self.pen = None;
            return Err(e.into());
        }

        self.back.copy_from_slice(&self.front);
        tracing::debug!(cells = stats.cells_rendered, "redraw");
        Ok(stats)
    }

    fn redraw_pass(&mut self, stats: &mut RenderStats) -> io::Result<()> {
        for y in 0..self.height {
            self.sink.move_to(self.x, self.y.saturating_add(y))?;
            for idx in self.row_range(y) {
                let cell = self.front[idx];
                self.pen_to(cell.attrs, false)?;
                self.sink.put(cell.glyph)?;
            }
            stats.cells_rendered += usize::from(self.width);
        }
        self.sink.flush()
    }

    /// Write only the cells that changed since the last sync, then mark the
    /// terminal synced.
    ///
    /// Unchanged rows cost one slice comparison and emit nothing. A flush
    /// right after another flush (or a redraw) emits nothing at all.
    ///
    /// # Errors
    ///
    /// [`Error::Io`](crate::Error::Io) from the sink. The back grid is left
    /// as it was, so the next flush retries.
    pub fn flush(&mut self) -> Result<RenderStats> {
        let mut stats = RenderStats::default();

        if let Err(e) = self.flush_pass(&mut stats) {
            self.pen = None;
            return Err(e.into());
        }

        self.back.copy_from_slice(&self.front);
        tracing::debug!(
            rendered = stats.cells_rendered,
            skipped = stats.cells_skipped,
            rows_skipped = stats.rows_skipped,
            "flush"
        );
        Ok(stats)
    }

    fn flush_pass(&mut self, stats: &mut RenderStats) -> io::Result<()> {
        for y in 0..self.height {
            let range = self.row_range(y);
            if self.front[range.clone()] == self.back[range.clone()] {
                stats.rows_skipped += 1;
                stats.cells_skipped += range.len();
                continue;
            }

            for x in 0..self.width {
                let idx = range.start + usize::from(x);
                let (cell, old) = (self.front[idx], self.back[idx]);
                if cell == old {
                    stats.cells_skipped += 1;
                    continue;
                }

                self.sink
                    .move_to(self.x.saturating_add(x), self.y.saturating_add(y))?;
                self.pen_to(cell.attrs, cell.attrs != old.attrs)?;
                self.sink.put(cell.glyph)?;
                stats.cells_rendered += 1;
            }
        }
        self.sink.flush()
    }

    /// Forget which attributes the terminal is drawing with.
    ///
    /// Call this when something else wrote to the terminal since this
    /// screen last synced, such as another screen sharing it. The next
    /// changed cell states its colors and style again.
    #[inline]
    pub const fn forget_pen(&mut self) {
        self.pen = None;
    }

    /// Bring the pen to `attrs`.
    ///
    /// Colors go out whenever `attrs` differs from the pen, or when `force`
    /// is set. Bold/underline go out only when they differ from the pen.
    fn pen_to(&mut self, attrs: Attributes, force: bool) -> io::Result<()> {
        if !force && self.pen == Some(attrs) {
            return Ok(());
        }

        self.sink.set_fg(attrs.fg)?;
        self.sink.set_bg(attrs.bg)?;
        if self.pen.is_none_or(|pen| !pen.same_style(&attrs)) {
            self.sink.set_style(attrs.bold, attrs.underline)?;
        }
        self.pen = Some(attrs);
        Ok(())
    }
}

impl<S: Sink> fmt::Write for Screen<S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.puts(s);
        Ok(())
    }

    fn write_char(&mut self, c: char) -> fmt::Result {
        self.put(c);
        Ok(())
    }
}

impl<S: Sink> Index<u16> for Screen<S> {
    type Output = [Cell];

    fn index(&self, y: u16) -> &[Cell] {
        self.row(y)
    }
}

impl<S: Sink> IndexMut<u16> for Screen<S> {
    fn index_mut(&mut self, y: u16) -> &mut [Cell] {
        self.row_mut(y)
    }
}

impl<S> fmt::Debug for Screen<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Screen({}x{} at ({}, {}), cursor ({}, {}))",
            self.width, self.height, self.x, self.y, self.cursor_x, self.cursor_y
        )
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
