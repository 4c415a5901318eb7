// SPDX-License-Identifier: MIT
//
// Screen benchmarks: text streaming, scrolling, and the two sync passes.
//
// Output goes to an `AnsiSink<io::Sink>` so the escape encoding is measured
// but no real I/O happens.

use std::hint::black_box;
use std::io;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use pane_term::{AnsiSink, Color, Screen, ScreenConfig};

fn screen() -> Screen<AnsiSink<io::Sink>> {
    Screen::new(AnsiSink::new(io::sink()), ScreenConfig::new(0, 0, 80, 24)).unwrap()
}

fn bench_puts(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");
    let text = "The quick brown fox jumps over the lazy dog. ".repeat(40);
    group.throughput(Throughput::Elements(text.chars().count() as u64));

    group.bench_function("puts", |b| {
        let mut s = screen();
        b.iter(|| s.puts(black_box(&text)));
    });

    group.finish();
}

fn bench_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("screen");

    group.bench_function("scroll", |b| {
        let mut s = screen();
        b.iter(|| s.scroll());
    });

    group.bench_function("log_lines", |b| {
        let mut s = screen();
        let mut n = 0u32;
        b.iter(|| {
            for _ in 0..100 {
                n = n.wrapping_add(1);
                s.puts(&format!("[{n:>6}] request handled in {}ms\n", n % 97));
            }
        });
    });

    group.finish();
}

fn bench_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("sync");

    group.bench_function("redraw_full", |b| {
        let mut s = screen();
        s.puts(&"#".repeat(80 * 24));
        b.iter(|| black_box(s.redraw().unwrap()));
    });

    group.bench_function("flush_unchanged", |b| {
        let mut s = screen();
        b.iter(|| black_box(s.flush().unwrap()));
    });

    group.bench_function("flush_one_row", |b| {
        let mut s = screen();
        let mut tick = 0u8;
        b.iter(|| {
            tick = tick.wrapping_add(1);
            s.set_cursor_fg(Color::gray(tick));
            s.set_cursor(0, 12);
            s.puts(&"=".repeat(79));
            black_box(s.flush().unwrap())
        });
    });

    group.bench_function("flush_every_cell", |b| {
        let mut s = screen();
        let mut glyph = 'a';
        b.iter(|| {
            glyph = if glyph == 'a' { 'b' } else { 'a' };
            s.clear(glyph);
            black_box(s.flush().unwrap())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_puts, bench_scroll, bench_sync);
criterion_main!(benches);
