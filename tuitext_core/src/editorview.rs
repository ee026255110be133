//! `EditorView`: couples a [`TextBufferView`] (what's on screen) with an
//! [`EditBuffer`] (cursors and edits), translating between logical
//! `(row, col)` buffer coordinates and visual `(vline, col)` screen
//! coordinates, and keeping the cursor scrolled into view.

use crate::buf::TextBuffer;
use crate::cfg::EditorViewOptions;
use crate::coord::Viewport;
use crate::edit::{Cursor, EditBuffer, EditEvent};
use crate::view::{SelectionGlobal, TextBufferView, VirtualLine};

pub struct EditorView {
  view: TextBufferView,
  edit: EditBuffer,
  viewport: Viewport,
  options: EditorViewOptions,
  desired_visual_col: Option<usize>,
}

impl EditorView {
  pub fn new(buf: &mut TextBuffer, view_options: crate::cfg::ViewOptions, options: EditorViewOptions, viewport: Viewport) -> Self {
    Self {
      view: TextBufferView::new(buf, view_options),
      edit: EditBuffer::new(),
      viewport,
      options,
      desired_visual_col: None,
    }
  }

  pub fn view(&self) -> &TextBufferView {
    &self.view
  }

  pub fn edit(&self) -> &EditBuffer {
    &self.edit
  }

  pub fn viewport(&self) -> Viewport {
    self.viewport
  }

  pub fn set_viewport(&mut self, viewport: Viewport) {
    self.viewport = viewport;
  }

  pub fn drain_events(&mut self) -> Vec<EditEvent> {
    self.edit.drain_events()
  }

  pub fn visible_lines(&self) -> &[VirtualLine] {
    self.view.get_viewport_lines(&self.viewport)
  }

  // -- coordinate translation ---------------------------------------------

  /// Maps a logical `(row, col)` to `(vline_index, visual_col)`. `col` may
  /// equal a wrapped segment's width (cursor resting just past its last
  /// character); ties prefer the earliest virtual line that covers it.
  pub fn logical_to_visual(&self, row: usize, col: usize) -> (usize, usize) {
    let lines = self.view.get_virtual_lines();
    let mut fallback = 0usize;
    for (idx, vline) in lines.iter().enumerate() {
      if vline.source_line != row {
        if vline.source_line > row {
          break;
        }
        continue;
      }
      fallback = idx;
      let lo = vline.source_col_offset;
      let hi = lo + vline.width;
      if col >= lo && col <= hi {
        return (idx, col - lo);
      }
    }
    (fallback, 0)
  }

  pub fn visual_to_logical(&self, vline_idx: usize, visual_col: usize) -> (usize, usize) {
    match self.view.get_cached_line_info(vline_idx) {
      Some(vline) => (vline.source_line, vline.source_col_offset + visual_col),
      None => (0, 0),
    }
  }

  pub fn get_visual_cursor(&self) -> (usize, usize) {
    let Cursor { row, col, .. } = self.edit.primary_cursor();
    self.logical_to_visual(row, col)
  }

  // -- scrolling ------------------------------------------------------------

  /// Scrolls the viewport just enough to keep the primary cursor at least
  /// `scroll_margin` rows from the top/bottom edge, when the buffer has
  /// enough rows to make that possible.
  pub fn ensure_cursor_visible(&mut self) {
    let (vline_idx, _) = self.get_visual_cursor();
    let total = self.view.get_virtual_line_count();
    if self.viewport.height == 0 || total == 0 {
      return;
    }
    let margin = ((self.options.clamped_scroll_margin() * self.viewport.height as f64).round() as usize)
      .min(self.viewport.height.saturating_sub(1) / 2);

    if vline_idx < self.viewport.y + margin {
      self.viewport.y = vline_idx.saturating_sub(margin);
    } else if vline_idx + margin + 1 > self.viewport.y + self.viewport.height {
      self.viewport.y = (vline_idx + margin + 1).saturating_sub(self.viewport.height);
    }
    let max_y = total.saturating_sub(1);
    self.viewport.y = self.viewport.y.min(max_y);
  }

  // -- visual cursor movement ------------------------------------------------

  pub fn move_up_visual(&mut self, buf: &mut TextBuffer) {
    self.view.refresh(buf);
    let (vline_idx, visual_col) = self.get_visual_cursor();
    if vline_idx == 0 {
      return;
    }
    let want = self.desired_visual_col.unwrap_or(visual_col);
    let target = vline_idx - 1;
    let target_width = self.view.get_cached_line_info(target).map(|l| l.width).unwrap_or(0);
    let (row, col) = self.visual_to_logical(target, want.min(target_width));
    self.edit.set_primary_cursor(row, col);
    self.desired_visual_col = Some(want);
    self.ensure_cursor_visible();
  }

  pub fn move_down_visual(&mut self, buf: &mut TextBuffer) {
    self.view.refresh(buf);
    let (vline_idx, visual_col) = self.get_visual_cursor();
    let total = self.view.get_virtual_line_count();
    if vline_idx + 1 >= total {
      return;
    }
    let want = self.desired_visual_col.unwrap_or(visual_col);
    let target = vline_idx + 1;
    let target_width = self.view.get_cached_line_info(target).map(|l| l.width).unwrap_or(0);
    let (row, col) = self.visual_to_logical(target, want.min(target_width));
    self.edit.set_primary_cursor(row, col);
    self.desired_visual_col = Some(want);
    self.ensure_cursor_visible();
  }

  pub fn move_left(&mut self, buf: &mut TextBuffer) {
    self.view.refresh(buf);
    self.edit.move_left(buf);
    self.desired_visual_col = None;
    self.ensure_cursor_visible();
  }

  pub fn move_right(&mut self, buf: &mut TextBuffer) {
    self.view.refresh(buf);
    self.edit.move_right(buf);
    self.desired_visual_col = None;
    self.ensure_cursor_visible();
  }

  // -- editing, with post-edit scroll maintenance ---------------------------

  pub fn insert_text(&mut self, buf: &mut TextBuffer, text: &str) {
    self.edit.insert_text(buf, text);
    self.desired_visual_col = None;
    self.view.refresh(buf);
    self.ensure_cursor_visible();
  }

  pub fn delete_backward(&mut self, buf: &mut TextBuffer, n: usize) {
    self.edit.delete_backward(buf, n);
    self.desired_visual_col = None;
    self.view.refresh(buf);
    self.ensure_cursor_visible();
  }

  pub fn delete_forward(&mut self, buf: &mut TextBuffer, n: usize) {
    self.edit.delete_forward(buf, n);
    self.desired_visual_col = None;
    self.view.refresh(buf);
    self.ensure_cursor_visible();
  }

  /// Deletes the view's active selection, if any and non-empty.
  pub fn delete_selected_text(&mut self, buf: &mut TextBuffer) {
    let Some(sel) = self.view.selection() else {
      return;
    };
    if sel.is_empty() {
      return;
    }
    self.edit.replace_range(buf, sel.start(), sel.end(), b"");
    self.view.set_selection(None);
    self.desired_visual_col = None;
    self.view.refresh(buf);
    self.ensure_cursor_visible();
  }

  pub fn set_selection(&mut self, sel: Option<SelectionGlobal>) {
    self.view.set_selection(sel);
  }

  pub fn undo(&mut self, buf: &mut TextBuffer) {
    self.edit.undo(buf);
    self.view.refresh(buf);
    self.ensure_cursor_visible();
  }

  pub fn redo(&mut self, buf: &mut TextBuffer) {
    self.edit.redo(buf);
    self.view.refresh(buf);
    self.ensure_cursor_visible();
  }
}

#[cfg(test)]
mod editorview_tests {
  use super::*;
  use crate::cfg::{BufferOptions, ViewOptions, WrapMode};

  fn buffer_with(text: &str) -> TextBuffer {
    let mut buf = TextBuffer::new(BufferOptions::default());
    buf.set_text(text.as_bytes()).unwrap();
    buf
  }

  #[test]
  fn logical_to_visual_round_trips_through_wrapped_lines() {
    let mut buf = buffer_with("abcdefgh");
    let view_opt = ViewOptions::builder().wrap_mode(WrapMode::Char).wrap_width(Some(3)).build().unwrap();
    let ev = EditorView::new(&mut buf, view_opt, EditorViewOptions::default(), Viewport::new(0, 0, 10, 5));
    let (vline, col) = ev.logical_to_visual(0, 4);
    assert_eq!(vline, 1);
    assert_eq!(col, 1);
    assert_eq!(ev.visual_to_logical(vline, col), (0, 4));
  }

  #[test]
  fn ensure_cursor_visible_scrolls_down_to_follow_cursor() {
    let mut buf = buffer_with(&"x\n".repeat(50));
    let view_opt = ViewOptions::default();
    let mut ev = EditorView::new(&mut buf, view_opt, EditorViewOptions::default(), Viewport::new(0, 0, 10, 5));
    ev.edit.set_primary_cursor(40, 0);
    ev.ensure_cursor_visible();
    assert!(ev.viewport().y > 0);
    assert!(ev.viewport().y <= 40);
  }

  #[test]
  fn move_down_visual_preserves_desired_col_through_a_shorter_row() {
    let mut buf = buffer_with("abcdefgh");
    let view_opt = ViewOptions::builder().wrap_mode(WrapMode::Char).wrap_width(Some(3)).build().unwrap();
    let mut ev = EditorView::new(&mut buf, view_opt, EditorViewOptions::default(), Viewport::new(0, 0, 10, 5));
    ev.edit.set_primary_cursor(0, 2);
    ev.move_down_visual(&mut buf);
    let (_, col) = ev.get_visual_cursor();
    assert_eq!(col, 2);
  }

  #[test]
  fn insert_refreshes_the_view_cache() {
    let mut buf = buffer_with("ab");
    let view_opt = ViewOptions::default();
    let mut ev = EditorView::new(&mut buf, view_opt, EditorViewOptions::default(), Viewport::new(0, 0, 10, 5));
    ev.edit.set_primary_cursor(0, 2);
    ev.insert_text(&mut buf, "cd");
    assert_eq!(ev.view().get_cached_line_info(0).unwrap().width, 4);
  }
}
