//! Chunk construction and lazy-cache population.

use crate::cfg::BufferOptions;
use crate::memreg::MemRegistry;
use crate::rope::{GraphemeInfo, TextChunk};
use crate::scan::{self, WrapBreak};
use crate::unicode::{self, text_width};

/// Builds a [`TextChunk`] describing `bytes[byte_start..byte_end)` of
/// `mem_id`, computing its cached width and ASCII-only flag up front.
pub fn build_chunk(mem_id: u8, byte_start: u32, byte_end: u32, bytes: &[u8], opt: &BufferOptions) -> TextChunk {
  let ascii_only = scan::is_ascii_only(bytes);
  let width = if ascii_only {
    bytes.len()
  } else {
    match std::str::from_utf8(bytes) {
      Ok(s) => text_width(opt.width_method, opt.tab_stop, s),
      Err(_) => bytes.len(),
    }
  };
  TextChunk::new(mem_id, byte_start, byte_end, width.min(u16::MAX as usize) as u16, ascii_only)
}

fn chunk_bytes<'a>(chunk: &TextChunk, mem: &'a MemRegistry) -> &'a [u8] {
  let bytes = mem.get(chunk.mem_id).unwrap_or(&[]);
  let start = (chunk.byte_start as usize).min(bytes.len());
  let end = (chunk.byte_end as usize).min(bytes.len());
  &bytes[start..end]
}

/// Returns the chunk's grapheme clusters, computing and caching them on
/// first access.
pub fn chunk_graphemes<'a>(chunk: &'a TextChunk, mem: &MemRegistry, opt: &BufferOptions) -> &'a [GraphemeInfo] {
  let mut stats = chunk.graphemes_stats.get();
  if chunk.graphemes.get().is_some() {
    stats.hit_one();
  } else {
    stats.miss_one();
  }
  chunk.graphemes_stats.set(stats);
  chunk.graphemes.get_or_init(|| {
    let bytes = chunk_bytes(chunk, mem);
    match std::str::from_utf8(bytes) {
      Ok(s) => unicode::grapheme_indices(s)
        .map(|(offset, len)| GraphemeInfo {
          byte_offset: offset as u32,
          byte_len: len as u32,
          width: unicode::grapheme_cluster_width(opt.width_method, opt.tab_stop, &s[offset..offset + len]) as u16,
        })
        .collect(),
      Err(_) => bytes
        .iter()
        .enumerate()
        .map(|(i, _)| GraphemeInfo {
          byte_offset: i as u32,
          byte_len: 1,
          width: 1,
        })
        .collect(),
    }
  })
}

/// Returns the chunk's wrap-break candidates, computing and caching them on
/// first access.
pub fn chunk_wrap_offsets<'a>(chunk: &'a TextChunk, mem: &MemRegistry) -> &'a [WrapBreak] {
  let mut stats = chunk.wrap_offsets_stats.get();
  if chunk.wrap_offsets.get().is_some() {
    stats.hit_one();
  } else {
    stats.miss_one();
  }
  chunk.wrap_offsets_stats.set(stats);
  chunk
    .wrap_offsets
    .get_or_init(|| scan::find_wrap_breaks(chunk_bytes(chunk, mem)))
}
