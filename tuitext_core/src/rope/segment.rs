//! The rope's leaf type: a tagged union of styled text, hard breaks, and
//! line-start markers.

use crate::diag::CacheStats;
use crate::rope::metrics::Metrics;
use crate::scan::WrapBreak;
use once_cell::unsync::OnceCell;
use std::cell::Cell;

/// Bit 0 of [`TextChunk::flags`]: the chunk's byte range is ASCII-only.
pub const FLAG_ASCII_ONLY: u8 = 0b0000_0001;

/// A grapheme cluster of non-zero width, cached lazily on its owning chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphemeInfo {
  pub byte_offset: u32,
  pub byte_len: u32,
  pub width: u16,
}

/// An immutable descriptor of a contiguous byte range in some registered
/// memory buffer. Never mutated in place; edits replace chunks, they never
/// patch one.
#[derive(Debug, Clone)]
pub struct TextChunk {
  pub mem_id: u8,
  pub byte_start: u32,
  pub byte_end: u32,
  pub width: u16,
  pub flags: u8,
  pub(crate) graphemes: OnceCell<Vec<GraphemeInfo>>,
  pub(crate) wrap_offsets: OnceCell<Vec<WrapBreak>>,
  pub(crate) graphemes_stats: Cell<CacheStats>,
  pub(crate) wrap_offsets_stats: Cell<CacheStats>,
}

impl TextChunk {
  pub fn new(mem_id: u8, byte_start: u32, byte_end: u32, width: u16, ascii_only: bool) -> Self {
    Self {
      mem_id,
      byte_start,
      byte_end,
      width,
      flags: if ascii_only { FLAG_ASCII_ONLY } else { 0 },
      graphemes: OnceCell::new(),
      wrap_offsets: OnceCell::new(),
      graphemes_stats: Cell::new(CacheStats::default()),
      wrap_offsets_stats: Cell::new(CacheStats::default()),
    }
  }

  pub fn is_ascii_only(&self) -> bool {
    self.flags & FLAG_ASCII_ONLY != 0
  }

  pub fn byte_len(&self) -> usize {
    (self.byte_end - self.byte_start) as usize
  }

  pub fn cache_stats(&self) -> (CacheStats, CacheStats) {
    (self.graphemes_stats.get(), self.wrap_offsets_stats.get())
  }
}

impl Drop for TextChunk {
  fn drop(&mut self) {
    let (graphemes, wrap_offsets) = self.cache_stats();
    if graphemes.total() > 0 || wrap_offsets.total() > 0 {
      tracing::trace!(
        mem_id = self.mem_id,
        graphemes_hit_rate = graphemes.hit_rate(),
        wrap_offsets_hit_rate = wrap_offsets.hit_rate(),
        "text chunk cache stats on drop"
      );
    }
  }
}

/// Rope leaf: one text run, one hard line break, or one line-start marker.
#[derive(Debug, Clone)]
pub enum Segment {
  Text(TextChunk),
  Break,
  LineStart,
}

impl Segment {
  pub fn empty() -> Self {
    Segment::Text(TextChunk::new(crate::memreg::INVALID_MEM_ID, 0, 0, 0, true))
  }

  pub fn is_empty(&self) -> bool {
    matches!(self, Segment::Text(chunk) if chunk.byte_len() == 0)
  }

  pub fn measure(&self) -> Metrics {
    match self {
      Segment::Text(chunk) => Metrics {
        total_width: chunk.width as usize,
        break_count: 0,
        linestart_count: 0,
        first_line_width: chunk.width as usize,
        last_line_width: chunk.width as usize,
        max_line_width: chunk.width as usize,
        ascii_only: chunk.is_ascii_only(),
      },
      Segment::Break => Metrics {
        break_count: 1,
        ascii_only: true,
        ..Metrics::zero()
      },
      Segment::LineStart => Metrics {
        linestart_count: 1,
        ascii_only: true,
        ..Metrics::zero()
      },
    }
  }

  pub fn as_text(&self) -> Option<&TextChunk> {
    match self {
      Segment::Text(chunk) => Some(chunk),
      _ => None,
    }
  }
}

#[cfg(test)]
mod segment_tests {
  use super::*;

  #[test]
  fn text_chunk_measures_its_own_width() {
    let chunk = TextChunk::new(0, 0, 5, 5, true);
    let m = Segment::Text(chunk).measure();
    assert_eq!(m.total_width, 5);
    assert_eq!(m.break_count, 0);
  }

  #[test]
  fn break_measures_as_one_break_zero_width() {
    let m = Segment::Break.measure();
    assert_eq!(m.break_count, 1);
    assert_eq!(m.total_width, 0);
  }

  #[test]
  fn linestart_measures_as_one_linestart_zero_width() {
    let m = Segment::LineStart.measure();
    assert_eq!(m.linestart_count, 1);
    assert_eq!(m.total_width, 0);
  }
}
