use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use criterion::{BenchmarkId, black_box};
use tuitext_core::scan;
use tuitext_core::testutil::{CorpusKind, synthetic_corpus};

pub fn criterion_benchmark(c: &mut Criterion) {
  let mut group = c.benchmark_group("scan");

  for kind in [CorpusKind::Ascii, CorpusKind::MixedUnicode] {
    let corpus = synthetic_corpus(kind, 2000, 80, 1);
    let bytes = corpus.as_bytes();

    group.bench_with_input(BenchmarkId::new("is_ascii_only", format!("{kind:?}")), bytes, |b, bytes| {
      b.iter(|| black_box(scan::is_ascii_only(bytes)));
    });

    group.bench_with_input(BenchmarkId::new("find_line_breaks", format!("{kind:?}")), bytes, |b, bytes| {
      b.iter(|| black_box(scan::find_line_breaks(bytes)));
    });

    group.bench_with_input(BenchmarkId::new("find_wrap_breaks", format!("{kind:?}")), bytes, |b, bytes| {
      b.iter(|| black_box(scan::find_wrap_breaks(bytes)));
    });
  }

  group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
