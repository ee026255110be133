//! `TextBufferView`: a wrapped, viewport-sliceable projection of a
//! [`crate::buf::TextBuffer`].

mod reflow;
mod selection;
mod viewport;

pub use reflow::{VirtualChunk, VirtualLine};
pub use selection::SelectionGlobal;
pub use viewport::slice_virtual_lines;

use crate::buf::TextBuffer;
use crate::cfg::{ViewOptions, WrapMode};
use crate::coord::Viewport;
use crate::diag::CacheStats;

/// A reflowed, cacheable view onto one buffer's text. Multiple views may
/// attach to the same buffer, each with its own wrap settings, selection and
/// virtual-line cache; the buffer only needs to know each view's registry id
/// to broadcast "your cache is stale" on mutation.
pub struct TextBufferView {
  view_id: usize,
  options: ViewOptions,
  cached_lines: Vec<VirtualLine>,
  local_dirty: bool,
  selection: Option<SelectionGlobal>,
  local_selection: Option<SelectionGlobal>,
  cache_stats: CacheStats,
}

impl TextBufferView {
  /// Registers a new view against `buf` and performs the initial reflow.
  pub fn new(buf: &mut TextBuffer, options: ViewOptions) -> Self {
    let view_id = buf.register_view();
    let mut view = Self {
      view_id,
      options,
      cached_lines: Vec::new(),
      local_dirty: true,
      selection: None,
      local_selection: None,
      cache_stats: CacheStats::default(),
    };
    view.refresh(buf);
    view
  }

  /// Releases this view's slot in `buf`'s dirty registry. Views don't borrow
  /// their buffer, so unregistering is explicit rather than drop-based.
  pub fn close(self, buf: &mut TextBuffer) {
    buf.unregister_view(self.view_id);
  }

  pub fn view_id(&self) -> usize {
    self.view_id
  }

  pub fn options(&self) -> &ViewOptions {
    &self.options
  }

  pub fn set_wrap_mode(&mut self, mode: WrapMode) {
    if self.options.wrap_mode != mode {
      self.options.wrap_mode = mode;
      self.local_dirty = true;
    }
  }

  pub fn set_wrap_width(&mut self, width: Option<usize>) {
    if self.options.wrap_width != width {
      self.options.wrap_width = width;
      self.local_dirty = true;
    }
  }

  /// Recomputes the virtual-line cache when local options changed
  /// (local-dirty) or the buffer marked this view stale (buffer-dirty).
  /// A no-op, and `false`, when the cache is already clean.
  pub fn refresh(&mut self, buf: &mut TextBuffer) -> bool {
    let buffer_dirty = buf.is_view_dirty(self.view_id);
    if !self.local_dirty && !buffer_dirty {
      self.cache_stats.hit_one();
      return false;
    }
    self.cache_stats.miss_one();
    self.cached_lines = reflow::reflow_buffer(buf, self.options.wrap_mode, self.options.wrap_width);
    self.local_dirty = false;
    buf.clear_view_dirty(self.view_id);
    tracing::trace!(
      view_id = self.view_id,
      vline_count = self.cached_lines.len(),
      hit_rate = self.cache_stats.hit_rate(),
      "virtual-line cache recomputed"
    );
    true
  }

  pub fn cache_stats(&self) -> CacheStats {
    self.cache_stats
  }

  pub fn get_virtual_lines(&self) -> &[VirtualLine] {
    &self.cached_lines
  }

  pub fn get_virtual_line_count(&self) -> usize {
    self.cached_lines.len()
  }

  pub fn get_viewport_lines(&self, viewport: &Viewport) -> &[VirtualLine] {
    viewport::slice_virtual_lines(&self.cached_lines, viewport)
  }

  pub fn get_cached_line_info(&self, vline_idx: usize) -> Option<&VirtualLine> {
    self.cached_lines.get(vline_idx)
  }

  pub fn logical_line_for_vline(&self, vline_idx: usize) -> Option<usize> {
    self.cached_lines.get(vline_idx).map(|l| l.source_line)
  }

  /// The virtual line whose `[char_offset, char_offset + width)` range
  /// contains `offset`, or the last line if `offset` is past the end.
  pub fn vline_index_for_char_offset(&self, offset: usize) -> usize {
    let idx = self.cached_lines.partition_point(|l| l.char_offset + l.width <= offset);
    idx.min(self.cached_lines.len().saturating_sub(1))
  }

  // -- selection --------------------------------------------------------

  pub fn set_selection(&mut self, sel: Option<SelectionGlobal>) {
    self.selection = sel;
  }

  pub fn selection(&self) -> Option<SelectionGlobal> {
    self.selection
  }

  pub fn set_local_selection(&mut self, sel: Option<SelectionGlobal>) {
    self.local_selection = sel;
  }

  pub fn local_selection(&self) -> Option<SelectionGlobal> {
    self.local_selection
  }

  pub fn get_selected_text_into_buffer(&self, buf: &TextBuffer, out: &mut Vec<u8>) {
    out.clear();
    if let Some(sel) = self.selection {
      if !sel.is_empty() {
        out.extend_from_slice(&buf.extract_range_bytes(sel.start(), sel.end()));
      }
    }
  }

  /// `(start, end, forward)` where `forward` is true when the focus is at or
  /// after the anchor. `None` when there is no selection.
  pub fn pack_selection_info(&self) -> Option<(usize, usize, bool)> {
    self.selection.map(|s| (s.start(), s.end(), s.focus >= s.anchor))
  }
}
