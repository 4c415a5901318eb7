// SPDX-License-Identifier: MIT
//
// pane — a small live dashboard drawn with pane-term.
//
// Two screens share the terminal:
//
//   ┌──────────────────────────────┐
//   │ header (inverse, bold)       │  ← 1 row, rewritten every frame
//   ├──────────────────────────────┤
//   │ log lines, streamed with     │  ← height - 1 rows, wraps and scrolls
//   │ write!, colored by level     │
//   └──────────────────────────────┘
//
// Each frame appends one log line, updates the header, and flushes both
// screens, so only the cells that changed reach the terminal. Because both
// screens write to the same terminal, each forgets its pen after the other
// has drawn.
//
// Logging goes to stderr (RUST_LOG=pane_term=debug shows per-frame stats),
// so redirect it when running on the same terminal:
//
//   pane --frames 300 2>pane.log

use std::fmt::Write as _;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use anyhow::{Context, ensure};
use clap::Parser;
use pane_term::terminal::{self, Session};
use pane_term::{AnsiSink, Color, RenderStats, Screen, ScreenConfig, Sink, op};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

// ─── CLI ────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "pane", version)]
#[command(about = "A live dashboard rendered with diff-based terminal output")]
struct Args {
    /// Screen layout file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Column of the top-left corner
    #[arg(long)]
    x: Option<u16>,

    /// Row of the top-left corner
    #[arg(long)]
    y: Option<u16>,

    /// Width in columns (default: terminal width)
    #[arg(long)]
    width: Option<u16>,

    /// Height in rows (default: terminal height)
    #[arg(long)]
    height: Option<u16>,

    /// Glyph for blank cells
    #[arg(long)]
    fill: Option<char>,

    /// Background color, e.g. "#101820"
    #[arg(long, value_name = "HEX")]
    bg: Option<Color>,

    /// Foreground color, e.g. "#f2aa4c"
    #[arg(long, value_name = "HEX")]
    fg: Option<Color>,

    /// Number of frames to draw
    #[arg(long, default_value_t = 200)]
    frames: u32,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 50)]
    interval_ms: u64,

    /// Draw over the normal screen instead of the alternate one
    #[arg(long)]
    no_alt_screen: bool,

    /// Print the resolved layout as TOML and exit
    #[arg(long)]
    print_config: bool,
}

// ─── Layout ─────────────────────────────────────────────────────────────────

/// File (or terminal size) first, then command-line overrides.
fn screen_config(args: &Args) -> anyhow::Result<ScreenConfig> {
    let mut config = match &args.config {
        Some(path) => ScreenConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => {
            let size = terminal::get_size().unwrap_or_default();
            ScreenConfig::new(0, 0, size.cols, size.rows)
        }
    };

    if let Some(x) = args.x {
        config.x = x;
    }
    if let Some(y) = args.y {
        config.y = y;
    }
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(fill) = args.fill {
        config.fill = fill;
    }
    if let Some(bg) = args.bg {
        config.background = bg;
    }
    if let Some(fg) = args.fg {
        config.foreground = fg;
    }

    config.validate().context("invalid screen layout")?;
    Ok(config)
}

/// Split the area into a one-row header (colors swapped) and the log below it.
fn split(config: ScreenConfig) -> anyhow::Result<(ScreenConfig, ScreenConfig)> {
    ensure!(
        config.height >= 2,
        "the dashboard needs at least 2 rows, got {}",
        config.height
    );

    let header = ScreenConfig {
        height: 1,
        fill: ' ',
        ..config
    }
    .with_colors(config.foreground, config.background);
    let log = ScreenConfig {
        y: config.y.saturating_add(1),
        height: config.height - 1,
        ..config
    };
    Ok((header, log))
}

/// Whether to take over the terminal, and with the alternate screen or not.
///
/// `None` when stdout isn't a terminal: frames still go out, but there is
/// no screen to switch or cursor to hide.
const fn session_mode(no_alt_screen: bool, tty: bool) -> Option<bool> {
    if tty { Some(!no_alt_screen) } else { None }
}

// ─── Drawing ────────────────────────────────────────────────────────────────

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

const EVENTS: [(&str, &str); 8] = [
    ("INFO", "GET /api/items 200"),
    ("INFO", "cache hit ratio recalculated"),
    ("WARN", "slow query on orders (412ms)"),
    ("INFO", "POST /api/orders 201"),
    ("DEBUG", "connection pool resized to 16"),
    ("ERROR", "upstream timed out after 3 retries; request abandoned and reported"),
    ("INFO", "GET /health 200"),
    ("WARN", "disk usage above 80% on /var"),
];

const fn level_color(level: &str) -> (u8, u8, u8) {
    match level.as_bytes() {
        b"WARN" => (230, 180, 60),
        b"ERROR" => (235, 80, 80),
        b"DEBUG" => (120, 120, 140),
        _ => (120, 200, 120),
    }
}

/// Status text on the left, spinner in the last column, one blank column
/// between them.
fn draw_header<S: Sink>(
    header: &mut Screen<S>,
    frame: u32,
    frames: u32,
    last: RenderStats,
) -> anyhow::Result<()> {
    let width = usize::from(header.width());
    let text = format!(
        " pane  frame {}/{frames}  wrote {} cells, skipped {} rows",
        frame + 1,
        last.cells_rendered,
        last.rows_skipped,
    );

    header.set_cursor_bold(true);
    header.apply(op::blank())?.apply(op::move_to(0, 0))?;
    header.puts(&text.chars().take(width.saturating_sub(2)).collect::<String>());

    let spin = SPINNER[usize::try_from(frame).unwrap_or_default() % SPINNER.len()];
    header.apply(op::plot(header.width() - 1, 0, spin))?;
    Ok(())
}

/// One log line: number and level in the level's color, message in `base`.
fn append_line<S: Sink>(log: &mut Screen<S>, frame: u32, base: Color) -> anyhow::Result<()> {
    let (level, message) = EVENTS[usize::try_from(frame).unwrap_or_default() % EVENTS.len()];
    let (r, g, b) = level_color(level);

    log.apply(op::set_fg(r, g, b))?;
    write!(log, "{:>6} {level:<5} ", frame + 1)?;
    log.set_cursor_fg(base);
    writeln!(log, "{message}")?;
    Ok(())
}

fn run(args: &Args) -> anyhow::Result<()> {
    let config = screen_config(args)?;
    if args.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(());
    }
    let (header_config, log_config) = split(config)?;

    let _session = match session_mode(args.no_alt_screen, terminal::is_tty()) {
        Some(alt_screen) => {
            Some(Session::enter(alt_screen).context("failed to set up the terminal")?)
        }
        None => {
            tracing::info!("stdout is not a terminal, drawing without a session");
            None
        }
    };

    let sink = || AnsiSink::new(BufWriter::new(io::stdout()));
    let mut header = Screen::new(sink(), header_config)?;
    let mut log = Screen::new(sink(), log_config)?;
    header.forget_pen();

    let interval = Duration::from_millis(args.interval_ms);
    let mut last = RenderStats::default();

    for frame in 0..args.frames {
        draw_header(&mut header, frame, args.frames, last)?;
        header.flush().context("failed to draw the header")?;
        log.forget_pen();

        append_line(&mut log, frame, config.foreground)?;
        last = log.flush().context("failed to draw the log")?;
        header.forget_pen();

        tracing::debug!(
            frame,
            rendered = last.cells_rendered,
            skipped = last.cells_skipped,
            "frame drawn"
        );
        thread::sleep(interval);
    }

    Ok(())
}

// ─── Entry ──────────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("pane: {e:#}");
            ExitCode::FAILURE
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
