//! Virtual-line reflow: partitions each logical line into display rows.

use crate::buf::{self, TextBuffer};
use crate::cfg::WrapMode;
use crate::rope::Segment;
use crate::scan;

/// One grapheme cluster located within a logical line, with its column
/// position and the byte range it occupies in its owning mem-registry slot.
#[derive(Debug, Clone, Copy)]
struct GraphemeLoc {
  width: usize,
  mem_id: u8,
  byte_start: u32,
  byte_len: u32,
}

struct LineGraphemes {
  text: String,
  locs: Vec<GraphemeLoc>,
}

fn build_line_graphemes(buf: &TextBuffer, line_idx: usize) -> LineGraphemes {
  let mem = buf.mem_registry();
  let opt = buf.options();
  let mut text = String::new();
  let mut locs = Vec::new();
  buf.for_each_line_segment(line_idx, |seg| {
    if let Segment::Text(c) = seg {
      let bytes = mem.get(c.mem_id).unwrap_or(&[]);
      for g in buf::chunk::chunk_graphemes(c, mem, opt) {
        let lo = (c.byte_start + g.byte_offset) as usize;
        let hi = lo + g.byte_len as usize;
        if hi <= bytes.len() {
          if let Ok(s) = std::str::from_utf8(&bytes[lo..hi]) {
            text.push_str(s);
            locs.push(GraphemeLoc {
              width: g.width as usize,
              mem_id: c.mem_id,
              byte_start: lo as u32,
              byte_len: g.byte_len,
            });
          }
        }
      }
    }
    true
  });
  LineGraphemes { text, locs }
}

/// One contiguous styled text run within a virtual line, referencing its
/// source bytes by mem-id and byte range.
#[derive(Debug, Clone, Copy)]
pub struct VirtualChunk {
  pub mem_id: u8,
  pub byte_start: u32,
  pub byte_end: u32,
  pub width: usize,
}

/// One display row produced by wrapping a logical line.
#[derive(Debug, Clone)]
pub struct VirtualLine {
  pub chunks: Vec<VirtualChunk>,
  pub width: usize,
  pub char_offset: usize,
  pub source_line: usize,
  pub source_col_offset: usize,
}

fn locs_to_chunks(locs: &[GraphemeLoc]) -> (Vec<VirtualChunk>, usize) {
  let mut chunks: Vec<VirtualChunk> = Vec::new();
  let mut width = 0usize;
  for loc in locs {
    width += loc.width;
    if let Some(last) = chunks.last_mut() {
      if last.mem_id == loc.mem_id && last.byte_end == loc.byte_start {
        last.byte_end += loc.byte_len;
        last.width += loc.width;
        continue;
      }
    }
    chunks.push(VirtualChunk {
      mem_id: loc.mem_id,
      byte_start: loc.byte_start,
      byte_end: loc.byte_start + loc.byte_len,
      width: loc.width,
    });
  }
  (chunks, width)
}

fn pack_char_wrap(locs: &[GraphemeLoc], wrap_width: usize) -> Vec<Vec<GraphemeLoc>> {
  if locs.is_empty() {
    return vec![Vec::new()];
  }
  let mut out = Vec::new();
  let mut idx = 0usize;
  while idx < locs.len() {
    let mut used = 0usize;
    let mut j = idx;
    while j < locs.len() && used + locs[j].width <= wrap_width {
      used += locs[j].width;
      j += 1;
    }
    if j == idx {
      // A single grapheme wider than wrap_width: force progress.
      j = idx + 1;
    }
    out.push(locs[idx..j].to_vec());
    idx = j;
  }
  out
}

fn pack_word_wrap(text: &str, locs: &[GraphemeLoc], wrap_width: usize) -> Vec<Vec<GraphemeLoc>> {
  if locs.is_empty() {
    return vec![Vec::new()];
  }

  let breaker_idx: std::collections::HashSet<usize> =
    scan::find_wrap_breaks(text.as_bytes()).iter().map(|b| b.char_offset).collect();

  // Each word carries the trailing breaker cluster that ended it (space,
  // punctuation, ...), plus whether it actually has one (the final word of
  // the line may not).
  let mut words: Vec<(Vec<GraphemeLoc>, bool)> = Vec::new();
  let mut word: Vec<GraphemeLoc> = Vec::new();
  for (i, loc) in locs.iter().enumerate() {
    word.push(*loc);
    if breaker_idx.contains(&i) {
      words.push((std::mem::take(&mut word), true));
    }
  }
  if !word.is_empty() {
    words.push((word, false));
  }

  let mut vlines: Vec<Vec<GraphemeLoc>> = Vec::new();
  let mut current: Vec<GraphemeLoc> = Vec::new();
  let mut current_width = 0usize;
  // A trailing breaker withheld from an over-long word's char-wrap fallback,
  // to be prepended onto the next word rather than stranded as its own row.
  let mut carry: Vec<GraphemeLoc> = Vec::new();

  for (mut word, ends_with_breaker) in words {
    if !carry.is_empty() {
      let mut merged = std::mem::take(&mut carry);
      merged.extend(word);
      word = merged;
    }
    let word_width: usize = word.iter().map(|l| l.width).sum();
    if current_width + word_width <= wrap_width {
      current_width += word_width;
      current.extend(word);
      continue;
    }
    if !current.is_empty() {
      vlines.push(std::mem::take(&mut current));
      current_width = 0;
    }
    if word_width <= wrap_width {
      current_width = word_width;
      current = word;
    } else {
      let trailing_breaker = if ends_with_breaker { word.pop() } else { None };
      for piece in pack_char_wrap(&word, wrap_width) {
        vlines.push(piece);
      }
      if let Some(b) = trailing_breaker {
        carry.push(b);
      }
    }
  }
  current.extend(carry);
  if !current.is_empty() {
    vlines.push(current);
  }
  vlines
}

/// Reflows every logical line of `buf` under `mode`/`wrap_width`, returning
/// the ordered virtual-line sequence.
pub fn reflow_buffer(buf: &TextBuffer, mode: WrapMode, wrap_width: Option<usize>) -> Vec<VirtualLine> {
  let mut out = Vec::new();
  let mut char_offset = 0usize;
  let line_count = buf.get_line_count();

  for line_idx in 0..line_count {
    match (mode, wrap_width) {
      (WrapMode::None, _) | (_, None) => {
        let mut chunks = Vec::new();
        buf.for_each_line_segment(line_idx, |seg| {
          if let Segment::Text(c) = seg {
            chunks.push(VirtualChunk {
              mem_id: c.mem_id,
              byte_start: c.byte_start,
              byte_end: c.byte_end,
              width: c.width as usize,
            });
          }
          true
        });
        let width = buf.line_width(line_idx);
        out.push(VirtualLine {
          chunks,
          width,
          char_offset,
          source_line: line_idx,
          source_col_offset: 0,
        });
        char_offset += width;
      }
      (WrapMode::Char, Some(w)) => {
        let lg = build_line_graphemes(buf, line_idx);
        let mut col = 0usize;
        for piece in pack_char_wrap(&lg.locs, w) {
          let (chunks, width) = locs_to_chunks(&piece);
          out.push(VirtualLine {
            chunks,
            width,
            char_offset,
            source_line: line_idx,
            source_col_offset: col,
          });
          char_offset += width;
          col += width;
        }
      }
      (WrapMode::Word, Some(w)) => {
        let lg = build_line_graphemes(buf, line_idx);
        let mut col = 0usize;
        for piece in pack_word_wrap(&lg.text, &lg.locs, w) {
          let (chunks, width) = locs_to_chunks(&piece);
          out.push(VirtualLine {
            chunks,
            width,
            char_offset,
            source_line: line_idx,
            source_col_offset: col,
          });
          char_offset += width;
          col += width;
        }
      }
    }
  }
  out
}
