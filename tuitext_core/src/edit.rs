//! `EditBuffer`: multi-cursor editing, undo/redo, and change events layered
//! over a [`crate::buf::TextBuffer`].

mod cursor;
mod events;
mod ops;
mod undo;

pub use cursor::{Cursor, CursorSet};
pub use events::EditEvent;
pub use undo::{Change, Operation};

use crate::buf::TextBuffer;
use crate::unicode;
use events::EventQueue;
use undo::UndoManager;

/// Owns the cursor set, undo/redo history and pending-event queue for one
/// editing session over a buffer. Like [`crate::view::TextBufferView`], it
/// doesn't hold a reference to its buffer: every mutating call takes
/// `&mut TextBuffer` explicitly.
#[derive(Default)]
pub struct EditBuffer {
  cursors: CursorSet,
  undo: UndoManager,
  events: EventQueue,
}

impl EditBuffer {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn cursors(&self) -> &CursorSet {
    &self.cursors
  }

  pub fn primary_cursor(&self) -> Cursor {
    self.cursors.primary()
  }

  pub fn add_cursor(&mut self, row: usize, col: usize) {
    self.cursors.add(row, col);
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn set_primary_cursor(&mut self, row: usize, col: usize) {
    self.cursors.clear_to_single(row, col);
    self.undo.commit();
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn drain_events(&mut self) -> Vec<EditEvent> {
    self.events.drain()
  }

  // -- movement -----------------------------------------------------------

  pub fn move_left(&mut self, buf: &TextBuffer) {
    self.cursors.for_each_mut_back_to_front(|c| ops::move_left(buf, c));
    self.undo.commit();
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn move_right(&mut self, buf: &TextBuffer) {
    self.cursors.for_each_mut_back_to_front(|c| ops::move_right(buf, c));
    self.undo.commit();
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn move_up(&mut self, buf: &TextBuffer) {
    self.cursors.for_each_mut_back_to_front(|c| ops::move_up(buf, c));
    self.undo.commit();
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn move_down(&mut self, buf: &TextBuffer) {
    self.cursors.for_each_mut_back_to_front(|c| ops::move_down(buf, c));
    self.undo.commit();
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn move_line_start(&mut self) {
    self.cursors.for_each_mut_back_to_front(ops::move_line_start);
    self.undo.commit();
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn move_line_end(&mut self, buf: &TextBuffer) {
    self.cursors.for_each_mut_back_to_front(|c| ops::move_line_end(buf, c));
    self.undo.commit();
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn move_document_start(&mut self) {
    self.cursors.clear_to_single(0, 0);
    self.undo.commit();
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn move_document_end(&mut self, buf: &TextBuffer) {
    let row = buf.get_line_count().saturating_sub(1);
    let col = buf.line_width(row);
    self.cursors.clear_to_single(row, col);
    self.undo.commit();
    self.events.push(EditEvent::CursorChanged);
  }

  // -- editing --------------------------------------------------------------

  /// Inserts `text` at every cursor, processed back-to-front so earlier
  /// insertions don't shift the coordinates this loop still needs to read.
  pub fn insert_text(&mut self, buf: &mut TextBuffer, text: &str) {
    if text.is_empty() {
      return;
    }
    let width = unicode::text_width(buf.options().width_method, buf.options().tab_stop, text);
    let undo = &mut self.undo;
    let mut changed_range: Option<(usize, usize)> = None;
    self.cursors.for_each_mut_back_to_front(|cursor| {
      let offset = buf.coords_to_offset(cursor.row, cursor.col);
      if buf.replace_range(offset, offset, text.as_bytes()).is_err() {
        return;
      }
      undo.record_insert(offset, text);
      let (row, col) = buf.offset_to_coords(offset + width);
      cursor.row = row;
      cursor.col = col;
      cursor.desired_col = col;
      changed_range = Some(match changed_range {
        Some((s, e)) => (s.min(offset), e.max(offset + width)),
        None => (offset, offset + width),
      });
    });
    if let Some((start, end)) = changed_range {
      self.events.push(EditEvent::TextChanged { start, end });
      self.events.push(EditEvent::CursorChanged);
    }
  }

  /// Deletes `n` display columns before each cursor (backspace).
  pub fn delete_backward(&mut self, buf: &mut TextBuffer, n: usize) {
    if n == 0 {
      return;
    }
    let undo = &mut self.undo;
    let mut changed_range: Option<(usize, usize)> = None;
    self.cursors.for_each_mut_back_to_front(|cursor| {
      let offset = buf.coords_to_offset(cursor.row, cursor.col);
      let start = offset.saturating_sub(n);
      if start == offset {
        return;
      }
      let payload = buf.extract_range_bytes(start, offset);
      let Ok(payload) = String::from_utf8(payload) else {
        return;
      };
      if buf.replace_range(start, offset, b"").is_err() {
        return;
      }
      undo.record_delete(start, &payload);
      let (row, col) = buf.offset_to_coords(start);
      cursor.row = row;
      cursor.col = col;
      cursor.desired_col = col;
      changed_range = Some(match changed_range {
        Some((s, e)) => (s.min(start), e.max(start)),
        None => (start, start),
      });
    });
    if let Some((start, end)) = changed_range {
      self.events.push(EditEvent::TextChanged { start, end });
      self.events.push(EditEvent::CursorChanged);
    }
  }

  /// Deletes `n` display columns after each cursor (forward delete).
  pub fn delete_forward(&mut self, buf: &mut TextBuffer, n: usize) {
    if n == 0 {
      return;
    }
    let total = buf.get_length();
    let undo = &mut self.undo;
    let mut changed_range: Option<(usize, usize)> = None;
    self.cursors.for_each_mut_back_to_front(|cursor| {
      let offset = buf.coords_to_offset(cursor.row, cursor.col);
      let end = (offset + n).min(total);
      if offset == end {
        return;
      }
      let payload = buf.extract_range_bytes(offset, end);
      let Ok(payload) = String::from_utf8(payload) else {
        return;
      };
      if buf.replace_range(offset, end, b"").is_err() {
        return;
      }
      undo.record_delete(offset, &payload);
      changed_range = Some(match changed_range {
        Some((s, e)) => (s.min(offset), e.max(offset)),
        None => (offset, offset),
      });
    });
    if let Some((start, end)) = changed_range {
      self.events.push(EditEvent::TextChanged { start, end });
      self.events.push(EditEvent::CursorChanged);
    }
  }

  /// Replaces `[start, end)` global-offset bytes, used for selection-delete
  /// and find/replace style edits outside the cursor model.
  pub fn replace_range(&mut self, buf: &mut TextBuffer, start: usize, end: usize, text: &[u8]) {
    let removed = buf.extract_range_bytes(start, end);
    if buf.replace_range(start, end, text).is_err() {
      return;
    }
    if let Ok(removed) = String::from_utf8(removed) {
      if !removed.is_empty() {
        self.undo.record_delete(start, &removed);
      }
    }
    if let Ok(inserted) = std::str::from_utf8(text) {
      self.undo.record_insert(start, inserted);
    }
    let (row, col) = buf.offset_to_coords(start + text.len());
    self.cursors.clear_to_single(row, col);
    self.events.push(EditEvent::TextChanged { start, end: start + text.len() });
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn undo(&mut self, buf: &mut TextBuffer) {
    let Some(change) = self.undo.pop_undo() else {
      return;
    };
    apply_inverse(buf, &change);
    self.events.push(EditEvent::TextChanged { start: 0, end: buf.get_length() });
    self.events.push(EditEvent::CursorChanged);
  }

  pub fn redo(&mut self, buf: &mut TextBuffer) {
    let Some(change) = self.undo.pop_redo() else {
      return;
    };
    apply_forward(buf, &change);
    self.events.push(EditEvent::TextChanged { start: 0, end: buf.get_length() });
    self.events.push(EditEvent::CursorChanged);
  }
}

fn apply_forward(buf: &mut TextBuffer, change: &Change) {
  for op in change.operations() {
    match op {
      Operation::Insert(insert) => {
        let _ = buf.replace_range(insert.char_idx, insert.char_idx, insert.payload.as_bytes());
      }
      Operation::Delete(delete) => {
        let end = delete.char_idx + delete.payload.chars().count();
        let _ = buf.replace_range(delete.char_idx, end, b"");
      }
    }
  }
}

fn apply_inverse(buf: &mut TextBuffer, change: &Change) {
  for op in change.operations().iter().rev() {
    match op {
      Operation::Insert(insert) => {
        let end = insert.char_idx + insert.payload.chars().count();
        let _ = buf.replace_range(insert.char_idx, end, b"");
      }
      Operation::Delete(delete) => {
        let _ = buf.replace_range(delete.char_idx, delete.char_idx, delete.payload.as_bytes());
      }
    }
  }
}

#[cfg(test)]
mod edit_tests {
  use super::*;
  use crate::cfg::BufferOptions;

  fn buffer_with(text: &str) -> TextBuffer {
    let mut buf = TextBuffer::new(BufferOptions::default());
    buf.set_text(text.as_bytes()).unwrap();
    buf
  }

  #[test]
  fn insert_text_advances_cursor_past_the_inserted_run() {
    let mut buf = buffer_with("ab");
    let mut edit = EditBuffer::new();
    edit.set_primary_cursor(0, 1);
    edit.insert_text(&mut buf, "XYZ");
    assert_eq!(buf.get_plain_text(), b"aXYZb");
    assert_eq!(edit.primary_cursor().col, 4);
  }

  #[test]
  fn delete_backward_removes_the_preceding_run() {
    let mut buf = buffer_with("hello");
    let mut edit = EditBuffer::new();
    edit.set_primary_cursor(0, 5);
    edit.delete_backward(&mut buf, 3);
    assert_eq!(buf.get_plain_text(), b"he");
    assert_eq!(edit.primary_cursor().col, 2);
  }

  #[test]
  fn undo_reverts_the_last_committed_insert() {
    let mut buf = buffer_with("ab");
    let mut edit = EditBuffer::new();
    edit.set_primary_cursor(0, 1);
    edit.insert_text(&mut buf, "X");
    edit.undo(&mut buf);
    assert_eq!(buf.get_plain_text(), b"ab");
  }

  #[test]
  fn redo_reapplies_an_undone_insert() {
    let mut buf = buffer_with("ab");
    let mut edit = EditBuffer::new();
    edit.set_primary_cursor(0, 1);
    edit.insert_text(&mut buf, "X");
    edit.undo(&mut buf);
    edit.redo(&mut buf);
    assert_eq!(buf.get_plain_text(), b"aXb");
  }

  #[test]
  fn multi_cursor_insert_back_to_front_keeps_all_cursors_correct() {
    let mut buf = buffer_with("aa\naa");
    let mut edit = EditBuffer::new();
    edit.set_primary_cursor(0, 0);
    edit.add_cursor(1, 0);
    edit.insert_text(&mut buf, "X");
    assert_eq!(buf.get_plain_text(), b"Xaa\nXaa");
  }
}
