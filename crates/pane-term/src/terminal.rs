// SPDX-License-Identifier: MIT
//
// Terminal session helpers — size queries and alternate-screen RAII.
//
// Safety: the size and tty queries call `ioctl(TIOCGWINSZ)` and `isatty`
// through libc, and the panic hook writes straight to fd 1. Those are the
// only unsafe blocks in the crate.
#![allow(unsafe_code)]
//
// A screen doesn't need any of this; it writes to whatever `Sink` it is
// given. These helpers are for programs that draw on the real terminal and
// want it put back the way they found it:
//
//   Session::enter()  — alternate screen, hidden cursor, cleared.
//   drop / leave()    — SGR reset, cursor shown, original screen back.
//
// If the program panics between the two, the panic hook writes the same
// restore sequence before the default handler prints, so the message lands
// on a usable terminal. The hook writes to fd 1 directly instead of going
// through `io::stdout()`, whose lock may be held by a half-finished flush.
//
// No raw mode. Input is left to the line discipline.

use std::io::{self, Write};
use std::sync::Once;

use crate::ansi;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Columns.
    pub cols: u16,
    /// Rows.
    pub rows: u16,
}

impl Size {
    /// Used when the real size can't be queried.
    pub const FALLBACK: Self = Self { cols: 80, rows: 24 };
}

impl Default for Size {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Query the terminal size of stdout via `ioctl(TIOCGWINSZ)`.
///
/// `None` when stdout is not a terminal or reports a zero dimension.
#[cfg(unix)]
#[must_use]
pub fn get_size() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

    (result == 0 && ws.ws_col > 0 && ws.ws_row > 0).then_some(Size {
        cols: ws.ws_col,
        rows: ws.ws_row,
    })
}

#[cfg(not(unix))]
#[must_use]
pub fn get_size() -> Option<Size> {
    None
}

/// Whether stdout is connected to a terminal.
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Panic restore ──────────────────────────────────────────────────────────

/// SGR reset, show cursor, exit alternate screen. Exit is last so the
/// shell's content comes back clean.
const RESTORE: &[u8] = b"\x1b[0m\x1b[?25h\x1b[?1049l";

static PANIC_HOOK_INSTALLED: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            write_restore();
            original(info);
        }));
    });
}

fn write_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            RESTORE.as_ptr().cast::<libc::c_void>(),
            RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── Session ────────────────────────────────────────────────────────────────

/// The terminal switched into full-screen drawing mode, restored on drop.
///
/// ```no_run
/// use pane_term::terminal::Session;
///
/// let session = Session::enter(true)?;
/// // ... draw with a Screen over AnsiSink::new(io::stdout()) ...
/// drop(session); // original screen is back
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct Session {
    alt_screen: bool,
    active: bool,
}

impl Session {
    /// Hide the cursor and clear, switching to the alternate screen first
    /// when `alt_screen` is set.
    ///
    /// # Errors
    ///
    /// If writing to stdout fails.
    pub fn enter(alt_screen: bool) -> io::Result<Self> {
        install_panic_hook();

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        if alt_screen {
            ansi::enter_alt_screen(&mut lock)?;
        }
        ansi::cursor_hide(&mut lock)?;
        ansi::clear_screen(&mut lock)?;
        lock.flush()?;

        tracing::debug!(alt_screen, "terminal session entered");
        Ok(Self {
            alt_screen,
            active: true,
        })
    }

    /// Restore the terminal now instead of at drop. Calling it twice is a
    /// no-op.
    ///
    /// # Errors
    ///
    /// If writing to stdout fails.
    pub fn leave(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }

        let stdout = io::stdout();
        let mut lock = stdout.lock();
        ansi::reset(&mut lock)?;
        ansi::cursor_show(&mut lock)?;
        if self.alt_screen {
            ansi::exit_alt_screen(&mut lock)?;
        } else {
            // Park below whatever was drawn.
            lock.write_all(b"\r\n")?;
        }
        lock.flush()?;

        self.active = false;
        tracing::debug!("terminal session left");
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
