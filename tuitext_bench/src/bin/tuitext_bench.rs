//! `tuitext-bench`: exercises `tuitext_core` under synthetic workloads.

use clap::Parser;
use std::time::Instant;
use tracing::debug;
use tuitext_core::buf::TextBuffer;
use tuitext_core::cfg::{BufferOptions, ViewOptions, WrapMode};
use tuitext_core::edit::EditBuffer;
use tuitext_core::scan;
use tuitext_core::testutil::{CorpusKind, synthetic_corpus};
use tuitext_core::view::TextBufferView;

#[derive(Parser, Debug)]
#[command(name = "tuitext-bench", ignore_errors = true)]
struct Cli {
  /// Print each benchmark's peak resident set size (Linux best-effort).
  #[arg(long)]
  mem: bool,

  /// Case-insensitive substring filter against benchmark names.
  #[arg(long, short = 'f')]
  filter: Option<String>,
}

struct BenchResult {
  name: &'static str,
  elapsed_ms: f64,
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let cli = Cli::parse();
  debug!("cli: {:?}", cli);

  let registry: Vec<(&'static str, fn())> = vec![
    ("scan::is_ascii_only", bench_is_ascii_only),
    ("scan::find_wrap_breaks", bench_find_wrap_breaks),
    ("rope::insert_remove", bench_rope_insert_remove),
    ("reflow::char_wrap", bench_reflow_char_wrap),
    ("reflow::word_wrap", bench_reflow_word_wrap),
    ("undo::churn", bench_undo_churn),
  ];

  let filter = cli.filter.map(|f| f.to_lowercase());
  let selected: Vec<_> = registry
    .into_iter()
    .filter(|(name, _)| filter.as_ref().is_none_or(|f| name.to_lowercase().contains(f.as_str())))
    .collect();

  if selected.is_empty() {
    println!("no benchmark matches filter {:?}", filter);
    return;
  }

  for (name, run) in selected {
    let start = Instant::now();
    run();
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let result = BenchResult { name, elapsed_ms };
    if cli.mem {
      println!("{:<28} {:>9.3} ms   rss={}", result.name, result.elapsed_ms, read_rss());
    } else {
      println!("{:<28} {:>9.3} ms", result.name, result.elapsed_ms);
    }
  }
}

fn bench_is_ascii_only() {
  let corpus = synthetic_corpus(CorpusKind::Ascii, 2000, 80, 1);
  for _ in 0..200 {
    std::hint::black_box(scan::is_ascii_only(corpus.as_bytes()));
  }
}

fn bench_find_wrap_breaks() {
  let corpus = synthetic_corpus(CorpusKind::MixedUnicode, 2000, 80, 2);
  for _ in 0..200 {
    std::hint::black_box(scan::find_wrap_breaks(corpus.as_bytes()));
  }
}

fn bench_rope_insert_remove() {
  let mut buf = TextBuffer::new(BufferOptions::default());
  for i in 0..2000 {
    let _ = buf.replace_range(buf.get_length(), buf.get_length(), format!("line {i}\n").as_bytes());
  }
  for _ in 0..500 {
    let len = buf.get_length();
    if len > 10 {
      let _ = buf.replace_range(0, 5, b"");
      let _ = buf.replace_range(buf.get_length(), buf.get_length(), b"abcde");
    }
  }
}

fn bench_reflow_char_wrap() {
  run_reflow_bench(WrapMode::Char);
}

fn bench_reflow_word_wrap() {
  run_reflow_bench(WrapMode::Word);
}

fn run_reflow_bench(mode: WrapMode) {
  let corpus = synthetic_corpus(CorpusKind::MixedUnicode, 1000, 80, 3);
  let mut buf = TextBuffer::new(BufferOptions::default());
  buf.set_text(corpus.as_bytes()).unwrap();
  let opts = ViewOptions::builder().wrap_mode(mode).wrap_width(Some(40)).build().unwrap();
  let mut view = TextBufferView::new(&mut buf, opts);
  for i in 0..50 {
    let _ = buf.replace_range(0, 0, format!("x{i}").as_bytes());
    view.refresh(&mut buf);
  }
}

fn bench_undo_churn() {
  let mut buf = TextBuffer::new(BufferOptions::default());
  let mut edit = EditBuffer::new();
  for i in 0..1000 {
    edit.insert_text(&mut buf, &format!("word{i} "));
  }
  for _ in 0..1000 {
    edit.undo(&mut buf);
  }
  for _ in 0..1000 {
    edit.redo(&mut buf);
  }
}

#[cfg(target_os = "linux")]
fn read_rss() -> String {
  match std::fs::read_to_string("/proc/self/statm") {
    Ok(contents) => contents
      .split_whitespace()
      .nth(1)
      .map(|pages| {
        let pages: u64 = pages.parse().unwrap_or(0);
        format!("{}KiB", pages * (4096 / 1024))
      })
      .unwrap_or_else(|| "n/a".to_string()),
    Err(_) => "n/a".to_string(),
  }
}

#[cfg(not(target_os = "linux"))]
fn read_rss() -> String {
  "n/a".to_string()
}
