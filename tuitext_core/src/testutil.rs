//! Buffer fixtures and a synthetic-corpus generator, shared by unit tests and
//! `tuitext_bench`. Always compiled (not `cfg(test)`-gated) so the bench
//! binary can depend on it directly.

use crate::buf::TextBuffer;
use crate::cfg::BufferOptions;

/// Builds a buffer from `lines` joined with `\n`, using default options.
pub fn make_buffer_from_lines(lines: &[&str]) -> TextBuffer {
  let mut buf = TextBuffer::new(BufferOptions::default());
  let text = lines.join("\n");
  buf.set_text(text.as_bytes()).expect("fixture text must be valid UTF-8");
  buf
}

pub fn make_empty_buffer(opts: BufferOptions) -> TextBuffer {
  TextBuffer::new(opts)
}

/// Deterministic splitmix64-based byte stream, so synthetic corpora are
/// reproducible across runs without depending on a `rand` crate.
struct DeterministicRng(u64);

impl DeterministicRng {
  fn next_u64(&mut self) -> u64 {
    self.0 = self.0.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = self.0;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
  }

  fn next_range(&mut self, bound: usize) -> usize {
    (self.next_u64() as usize) % bound.max(1)
  }
}

/// What kind of text a synthetic corpus should contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusKind {
  /// Plain ASCII words and line breaks only: exercises the ASCII fast paths.
  Ascii,
  /// A mix of ASCII, wide CJK characters, and a few ZWJ emoji sequences.
  MixedUnicode,
}

const ASCII_WORDS: &[&str] = &["the", "quick", "brown", "fox", "jumps", "over", "lazy", "dog"];
const WIDE_WORDS: &[&str] = &["你好", "世界", "文字", "編輯"];
const ZWJ_CLUSTERS: &[&str] = &["👩‍🚀", "👨‍👩‍👧‍👦", "🏳️‍🌈"];

/// Generates `line_count` lines of synthetic text of the given `kind`, each
/// roughly `target_width` display columns wide, seeded by `seed` for
/// reproducibility.
pub fn synthetic_corpus(kind: CorpusKind, line_count: usize, target_width: usize, seed: u64) -> String {
  let mut rng = DeterministicRng(seed ^ 0xD1B54A32D192ED03);
  let mut out = String::new();
  for _ in 0..line_count {
    let mut width = 0usize;
    let mut first = true;
    while width < target_width {
      if !first {
        out.push(' ');
        width += 1;
      }
      first = false;
      let token = match kind {
        CorpusKind::Ascii => ASCII_WORDS[rng.next_range(ASCII_WORDS.len())],
        CorpusKind::MixedUnicode => {
          let roll = rng.next_range(10);
          if roll < 6 {
            ASCII_WORDS[rng.next_range(ASCII_WORDS.len())]
          } else if roll < 9 {
            WIDE_WORDS[rng.next_range(WIDE_WORDS.len())]
          } else {
            ZWJ_CLUSTERS[rng.next_range(ZWJ_CLUSTERS.len())]
          }
        }
      };
      out.push_str(token);
      width += token.chars().count();
    }
    out.push('\n');
  }
  out
}

#[cfg(test)]
mod testutil_tests {
  use super::*;

  #[test]
  fn make_buffer_from_lines_joins_with_newlines() {
    let buf = make_buffer_from_lines(&["a", "bc", "def"]);
    assert_eq!(buf.get_line_count(), 3);
    assert_eq!(buf.get_plain_text(), b"a\nbc\ndef");
  }

  #[test]
  fn synthetic_corpus_is_deterministic_for_a_fixed_seed() {
    let a = synthetic_corpus(CorpusKind::MixedUnicode, 5, 40, 42);
    let b = synthetic_corpus(CorpusKind::MixedUnicode, 5, 40, 42);
    assert_eq!(a, b);
  }

  #[test]
  fn ascii_corpus_contains_only_ascii_words() {
    let corpus = synthetic_corpus(CorpusKind::Ascii, 3, 30, 7);
    assert!(corpus.is_ascii());
    assert_eq!(corpus.lines().count(), 3);
  }
}
