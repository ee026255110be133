//! `TextBuffer`: the rope-backed, segment-oriented model of styled text.

pub(crate) mod chunk;
mod highlight;

pub use highlight::{Highlight, StyleSpan};

use crate::cfg::{BufferOptions, Rgba};
use crate::memreg::MemRegistry;
use crate::prelude::CoreError;
use crate::rope::{Rope, Segment};
use crate::scan::{self, LineBreakKind};
use crate::unicode::{self, GraphemePool};

/// One input run for [`TextBuffer::set_styled_text`].
#[derive(Debug, Clone)]
pub struct StyledChunk {
  pub text_bytes: Vec<u8>,
  pub fg: Option<Rgba>,
  pub bg: Option<Rgba>,
  pub attributes: u8,
}

#[derive(Debug, Clone, Copy, Default)]
struct StyleEntry {
  fg: Option<Rgba>,
  bg: Option<Rgba>,
  attributes: u8,
}

#[derive(Debug, Default)]
struct ViewRegistry {
  dirty: Vec<bool>,
  free_list: Vec<usize>,
}

impl ViewRegistry {
  fn register(&mut self) -> usize {
    if let Some(id) = self.free_list.pop() {
      self.dirty[id] = true;
      return id;
    }
    self.dirty.push(true);
    self.dirty.len() - 1
  }

  fn unregister(&mut self, id: usize) {
    if id < self.dirty.len() {
      self.free_list.push(id);
    }
  }

  fn mark_all_dirty(&mut self) {
    self.dirty.iter_mut().for_each(|d| *d = true);
  }
}

/// Owns the rope, mem-registry, grapheme pool, defaults, highlight map, and
/// view-dirty registry for one piece of text.
pub struct TextBuffer {
  rope: Rope<Segment>,
  mem_registry: MemRegistry,
  grapheme_pool: GraphemePool,
  options: BufferOptions,
  highlights: Vec<Vec<Highlight>>,
  style_spans_cache: Vec<Option<Vec<StyleSpan>>>,
  style_table: Vec<StyleEntry>,
  views: ViewRegistry,
  placeholder_bytes: Vec<u8>,
  placeholder_color: Rgba,
}

impl Default for TextBuffer {
  fn default() -> Self {
    Self::new(BufferOptions::default())
  }
}

impl TextBuffer {
  pub fn new(options: BufferOptions) -> Self {
    Self {
      rope: Rope::new(),
      mem_registry: MemRegistry::new(),
      grapheme_pool: GraphemePool::new(),
      options,
      highlights: Vec::new(),
      style_spans_cache: Vec::new(),
      style_table: Vec::new(),
      views: ViewRegistry::default(),
      placeholder_bytes: Vec::new(),
      placeholder_color: Rgba::default(),
    }
  }

  pub fn options(&self) -> &BufferOptions {
    &self.options
  }

  pub fn mem_registry(&self) -> &MemRegistry {
    &self.mem_registry
  }

  pub fn rope(&self) -> &Rope<Segment> {
    &self.rope
  }

  // -- text mutation --------------------------------------------------

  /// Replaces all content. Clears highlights and marks every view dirty.
  pub fn set_text(&mut self, bytes: &[u8]) -> Result<(), CoreError> {
    self.mem_registry.clear_all();
    let mem_id = self.mem_registry.register(bytes.to_vec(), true)?;
    self.rope = Rope::from_leaves(self.build_segments(mem_id, bytes));
    self.highlights.clear();
    self.style_spans_cache.clear();
    self.style_table.clear();
    self.grapheme_pool = GraphemePool::new();
    self.views.mark_all_dirty();
    Ok(())
  }

  fn build_segments(&self, mem_id: u8, bytes: &[u8]) -> Vec<Segment> {
    let breaks = scan::find_line_breaks(bytes);
    let mut segments = Vec::new();
    let mut prev_end = 0usize;
    for b in &breaks {
      let content_end = match b.kind {
        LineBreakKind::Lf | LineBreakKind::Cr => b.pos,
        LineBreakKind::CrLf => b.pos - 1,
      };
      if content_end > prev_end {
        segments.push(Segment::Text(chunk::build_chunk(
          mem_id,
          prev_end as u32,
          content_end as u32,
          &bytes[prev_end..content_end],
          &self.options,
        )));
      }
      segments.push(Segment::Break);
      prev_end = b.pos + 1;
    }
    if prev_end < bytes.len() {
      segments.push(Segment::Text(chunk::build_chunk(
        mem_id,
        prev_end as u32,
        bytes.len() as u32,
        &bytes[prev_end..],
        &self.options,
      )));
    }
    segments
  }

  /// Reads `path` and calls [`Self::set_text`] with its contents.
  pub fn load_file(&mut self, path: &std::path::Path) -> Result<(), CoreError> {
    let bytes = std::fs::read(path)?;
    self.set_text(&bytes)
  }

  /// Replaces `[global_start, global_end)` (display-column offsets) with
  /// `bytes`. Marks views dirty but, unlike [`Self::set_text`], leaves
  /// existing highlights and the grapheme pool untouched.
  pub fn replace_range(&mut self, global_start: usize, global_end: usize, bytes: &[u8]) -> Result<(), CoreError> {
    let char_count = self.get_length();
    let start = global_start.min(char_count);
    let end = global_end.min(char_count).max(start);
    let mut spliced = self.extract_range_bytes(0, start);
    spliced.extend_from_slice(bytes);
    spliced.extend_from_slice(&self.extract_range_bytes(end, char_count));

    self.mem_registry.clear_all();
    let mem_id = self.mem_registry.register(spliced.clone(), true)?;
    self.rope = Rope::from_leaves(self.build_segments(mem_id, &spliced));
    self.views.mark_all_dirty();
    Ok(())
  }

  // -- styling ----------------------------------------------------------

  /// Variant of [`Self::set_text`] where each input chunk carries optional
  /// fg/bg/attributes; every non-default chunk becomes one or more
  /// highlights on the lines it spans.
  pub fn set_styled_text(&mut self, chunks: &[StyledChunk]) -> Result<(), CoreError> {
    let mut full = Vec::new();
    for c in chunks {
      full.extend_from_slice(&c.text_bytes);
    }
    self.set_text(&full)?;

    let mut running = 0usize;
    for c in chunks {
      let span = self.span_width_with_breaks(&c.text_bytes);
      if c.fg.is_some() || c.bg.is_some() || c.attributes != 0 {
        let style_id = self.alloc_style(StyleEntry {
          fg: c.fg,
          bg: c.bg,
          attributes: c.attributes,
        });
        self.add_highlight_over_range(running, running + span, style_id, 0, 0);
      }
      running += span;
    }
    Ok(())
  }

  fn span_width_with_breaks(&self, bytes: &[u8]) -> usize {
    let breaks = scan::find_line_breaks(bytes);
    let mut total = 0usize;
    let mut prev = 0usize;
    for b in &breaks {
      let content_end = match b.kind {
        LineBreakKind::Lf | LineBreakKind::Cr => b.pos,
        LineBreakKind::CrLf => b.pos - 1,
      };
      if let Ok(s) = std::str::from_utf8(&bytes[prev..content_end]) {
        total += unicode::text_width(self.options.width_method, self.options.tab_stop, s);
      }
      total += 1;
      prev = b.pos + 1;
    }
    if prev < bytes.len() {
      if let Ok(s) = std::str::from_utf8(&bytes[prev..]) {
        total += unicode::text_width(self.options.width_method, self.options.tab_stop, s);
      }
    }
    total
  }

  fn alloc_style(&mut self, entry: StyleEntry) -> u32 {
    self.style_table.push(entry);
    self.style_table.len() as u32
  }

  pub fn set_default_fg(&mut self, fg: Rgba) {
    self.options.default_fg = fg;
    self.style_spans_cache.clear();
  }

  pub fn set_default_bg(&mut self, bg: Rgba) {
    self.options.default_bg = bg;
    self.style_spans_cache.clear();
  }

  pub fn set_default_attributes(&mut self, attributes: u8) {
    self.options.default_attributes = attributes;
    self.style_spans_cache.clear();
  }

  fn ensure_highlight_rows(&mut self, line_idx: usize) {
    if self.highlights.len() <= line_idx {
      self.highlights.resize_with(line_idx + 1, Vec::new);
    }
    if self.style_spans_cache.len() <= line_idx {
      self.style_spans_cache.resize_with(line_idx + 1, || None);
    }
  }

  pub fn add_highlight(
    &mut self,
    line_idx: usize,
    col_start: usize,
    col_end: usize,
    style_id: u32,
    priority: i32,
    hl_ref: u32,
  ) {
    self.ensure_highlight_rows(line_idx);
    self.highlights[line_idx].push(Highlight {
      col_start,
      col_end,
      style_id,
      priority,
      hl_ref,
    });
    self.style_spans_cache[line_idx] = None;
  }

  /// Decomposes a display-column range spanning possibly multiple lines
  /// into per-line [`Highlight`]s.
  pub fn add_highlight_by_char_range(
    &mut self,
    global_start: usize,
    global_end: usize,
    style_id: u32,
    priority: i32,
    hl_ref: u32,
  ) {
    self.add_highlight_over_range(global_start, global_end, style_id, priority, hl_ref);
  }

  fn add_highlight_over_range(&mut self, start: usize, end: usize, style_id: u32, priority: i32, hl_ref: u32) {
    let char_count = self.get_length();
    let start = start.min(char_count);
    let end = end.min(char_count).max(start);
    if start == end {
      return;
    }
    let (row_start, col_start) = self.offset_to_coords(start);
    let (row_end, col_end) = self.offset_to_coords(end);
    if row_start == row_end {
      self.add_highlight(row_start, col_start, col_end, style_id, priority, hl_ref);
      return;
    }
    let first_width = self.line_width(row_start);
    self.add_highlight(row_start, col_start, first_width, style_id, priority, hl_ref);
    for row in (row_start + 1)..row_end {
      let w = self.line_width(row);
      self.add_highlight(row, 0, w, style_id, priority, hl_ref);
    }
    self.add_highlight(row_end, 0, col_end, style_id, priority, hl_ref);
  }

  pub fn remove_highlights_by_ref(&mut self, hl_ref: u32) {
    for (idx, row) in self.highlights.iter_mut().enumerate() {
      let before = row.len();
      row.retain(|h| h.hl_ref != hl_ref);
      if row.len() != before && idx < self.style_spans_cache.len() {
        self.style_spans_cache[idx] = None;
      }
    }
  }

  pub fn clear_line_highlights(&mut self, line_idx: usize) {
    if let Some(row) = self.highlights.get_mut(line_idx) {
      row.clear();
    }
    if let Some(cache) = self.style_spans_cache.get_mut(line_idx) {
      *cache = None;
    }
  }

  pub fn clear_all_highlights(&mut self) {
    self.highlights.iter_mut().for_each(|row| row.clear());
    self.style_spans_cache.iter_mut().for_each(|c| *c = None);
  }

  /// Returns the cached, gap-free style spans covering `[0, line_width)`.
  pub fn get_line_spans(&mut self, line_idx: usize) -> &[StyleSpan] {
    self.ensure_highlight_rows(line_idx);
    if self.style_spans_cache[line_idx].is_none() {
      let width = self.line_width(line_idx);
      let spans = highlight::flatten_line_spans(&self.highlights[line_idx], width);
      self.style_spans_cache[line_idx] = Some(spans);
    }
    self.style_spans_cache[line_idx].as_deref().unwrap()
  }

  // -- coordinate queries -------------------------------------------------

  pub fn get_line_count(&self) -> usize {
    self.rope.metrics().break_count + 1
  }

  pub fn get_length(&self) -> usize {
    let m = self.rope.metrics();
    m.total_width + m.break_count
  }

  pub fn get_byte_size(&self) -> usize {
    let mut total = 0usize;
    self.rope.walk(0, self.rope.len(), |seg| {
      if let Segment::Text(c) = seg {
        total += c.byte_len();
      }
      true
    });
    total
  }

  fn line_leaf_range(&self, line_idx: usize) -> (usize, usize) {
    let break_count = self.rope.metrics().break_count;
    let start = self.rope.leaf_index_after_breaks(line_idx);
    let end = if line_idx >= break_count {
      self.rope.len()
    } else {
      self.rope.leaf_index_after_breaks(line_idx + 1).saturating_sub(1)
    };
    (start, end)
  }

  /// Visits the text/break segments making up logical line `line_idx`, in
  /// order, excluding the break that terminates it.
  pub fn for_each_line_segment<F: FnMut(&Segment) -> bool>(&self, line_idx: usize, mut f: F) {
    let (start, end) = self.line_leaf_range(line_idx);
    self.rope.walk(start, end, |seg| f(seg));
  }

  /// Display width of logical line `line_idx`, clamped to an existing line.
  pub fn line_width(&self, line_idx: usize) -> usize {
    let (start, end) = self.line_leaf_range(line_idx);
    let mut width = 0usize;
    self.rope.walk(start, end, |seg| {
      if let Segment::Text(c) = seg {
        width += c.width as usize;
      }
      true
    });
    width
  }

  fn line_start_offset(&self, line_idx: usize) -> usize {
    let (start, _) = self.line_leaf_range(line_idx);
    let mut width = 0usize;
    self.rope.walk(0, start, |seg| {
      if let Segment::Text(c) = seg {
        width += c.width as usize;
      }
      true
    });
    width + line_idx
  }

  /// `(row, col) -> global display-column offset`, clamping `col` to the
  /// line's width.
  pub fn coords_to_offset(&self, row: usize, col: usize) -> usize {
    let row = row.min(self.get_line_count().saturating_sub(1));
    self.line_start_offset(row) + col.min(self.line_width(row))
  }

  /// `global display-column offset -> (row, col)`, clamping to the last
  /// valid position.
  pub fn offset_to_coords(&self, offset: usize) -> (usize, usize) {
    let line_count = self.get_line_count();
    let offset = offset.min(self.get_length());
    let mut acc = 0usize;
    for row in 0..line_count {
      let width = self.line_width(row);
      let row_end = acc + width;
      if offset <= row_end || row + 1 == line_count {
        return (row, offset.saturating_sub(acc).min(width));
      }
      acc = row_end + 1;
    }
    (line_count.saturating_sub(1), 0)
  }

  // -- text extraction ------------------------------------------------

  fn line_bytes_in_col_range(&self, line_idx: usize, col_start: usize, col_end: usize) -> Vec<u8> {
    let (start, end) = self.line_leaf_range(line_idx);
    let mut out = Vec::new();
    let mut running_col = 0usize;
    self.rope.walk(start, end, |seg| {
      let Segment::Text(c) = seg else { return true };
      if running_col >= col_end {
        return false;
      }
      let bytes = self.mem_registry.get(c.mem_id).unwrap_or(&[]);
      let graphemes = chunk::chunk_graphemes(c, &self.mem_registry, &self.options);
      for g in graphemes {
        let g_col_start = running_col;
        let g_col_end = running_col + g.width as usize;
        if g_col_end > col_start && g_col_start < col_end {
          let lo = (c.byte_start + g.byte_offset) as usize;
          let hi = lo + g.byte_len as usize;
          if lo <= bytes.len() && hi <= bytes.len() {
            out.extend_from_slice(&bytes[lo..hi]);
          }
        }
        running_col = g_col_end;
        if running_col >= col_end {
          break;
        }
      }
      running_col < col_end
    });
    out
  }

  /// Extracts UTF-8 bytes of `[global_start, global_end)`, joining logical
  /// lines it spans with a single `\n`.
  pub fn extract_range_bytes(&self, global_start: usize, global_end: usize) -> Vec<u8> {
    let char_count = self.get_length();
    let start = global_start.min(char_count);
    let end = global_end.min(char_count).max(start);
    if start == end {
      return Vec::new();
    }
    let (row_start, col_start) = self.offset_to_coords(start);
    let (row_end, col_end) = self.offset_to_coords(end);

    let mut out = Vec::new();
    for row in row_start..=row_end {
      let width = self.line_width(row);
      let lo = if row == row_start { col_start } else { 0 };
      let hi = if row == row_end { col_end } else { width };
      out.extend_from_slice(&self.line_bytes_in_col_range(row, lo, hi));
      if row != row_end {
        out.push(b'\n');
      }
    }
    out
  }

  /// Copies UTF-8 bytes of all text segments joined by `\n` into `out`,
  /// truncating silently if `out` is too small. Returns the number of
  /// bytes written.
  pub fn get_plain_text_into_buffer(&self, out: &mut [u8]) -> usize {
    let bytes = self.extract_range_bytes(0, self.get_length());
    let n = bytes.len().min(out.len());
    out[..n].copy_from_slice(&bytes[..n]);
    n
  }

  pub fn get_plain_text(&self) -> Vec<u8> {
    self.extract_range_bytes(0, self.get_length())
  }

  // -- view registry ----------------------------------------------------

  pub fn register_view(&mut self) -> usize {
    self.views.register()
  }

  pub fn unregister_view(&mut self, view_id: usize) {
    self.views.unregister(view_id)
  }

  pub fn is_view_dirty(&self, view_id: usize) -> bool {
    self.views.dirty.get(view_id).copied().unwrap_or(false)
  }

  pub fn clear_view_dirty(&mut self, view_id: usize) {
    if let Some(d) = self.views.dirty.get_mut(view_id) {
      *d = false;
    }
  }

  // -- placeholder --------------------------------------------------------

  pub fn set_placeholder(&mut self, bytes: &[u8]) {
    self.placeholder_bytes = bytes.to_vec();
  }

  pub fn set_placeholder_color(&mut self, color: Rgba) {
    self.placeholder_color = color;
  }

  pub fn placeholder(&self) -> (&[u8], Rgba) {
    (&self.placeholder_bytes, self.placeholder_color)
  }
}

#[cfg(test)]
mod buf_tests;
