use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::{BenchmarkId, black_box};
use tuitext_core::buf::TextBuffer;
use tuitext_core::cfg::{BufferOptions, ViewOptions, WrapMode};
use tuitext_core::testutil::{CorpusKind, synthetic_corpus};
use tuitext_core::view::TextBufferView;

pub fn criterion_benchmark(c: &mut Criterion) {
  let mut group = c.benchmark_group("reflow");

  for mode in [WrapMode::None, WrapMode::Char, WrapMode::Word] {
    let corpus = synthetic_corpus(CorpusKind::MixedUnicode, 500, 80, 2);
    let mut buf = TextBuffer::new(BufferOptions::default());
    buf.set_text(corpus.as_bytes()).unwrap();

    let view_options = ViewOptions::builder().wrap_mode(mode).wrap_width(Some(40)).build().unwrap();

    group.bench_with_input(BenchmarkId::new("initial_reflow", format!("{mode:?}")), &(), |b, _| {
      b.iter(|| {
        let mut buf = TextBuffer::new(BufferOptions::default());
        buf.set_text(corpus.as_bytes()).unwrap();
        let view = TextBufferView::new(&mut buf, view_options.clone());
        black_box(view.get_virtual_line_count());
      });
    });

    let mut view = TextBufferView::new(&mut buf, view_options.clone());
    group.bench_with_input(BenchmarkId::new("refresh_after_edit", format!("{mode:?}")), &(), |b, _| {
      b.iter(|| {
        buf.replace_range(0, 0, b"x").unwrap();
        black_box(view.refresh(&mut buf));
      });
    });
  }

  group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
