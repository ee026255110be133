//! Cursor movement over a [`TextBuffer`], in display-column coordinates.

use crate::buf::TextBuffer;
use crate::edit::cursor::Cursor;

pub fn move_left(buf: &TextBuffer, cursor: &mut Cursor) {
  if cursor.col > 0 {
    cursor.col -= 1;
  } else if cursor.row > 0 {
    cursor.row -= 1;
    cursor.col = buf.line_width(cursor.row);
  }
  cursor.desired_col = cursor.col;
}

pub fn move_right(buf: &TextBuffer, cursor: &mut Cursor) {
  let width = buf.line_width(cursor.row);
  if cursor.col < width {
    cursor.col += 1;
  } else if cursor.row + 1 < buf.get_line_count() {
    cursor.row += 1;
    cursor.col = 0;
  }
  cursor.desired_col = cursor.col;
}

/// Vertical moves restore `desired_col`, clamped to the target line's width,
/// rather than resetting it, so a ragged column survives repeated up/down.
pub fn move_up(buf: &TextBuffer, cursor: &mut Cursor) {
  if cursor.row > 0 {
    cursor.row -= 1;
    cursor.col = cursor.desired_col.min(buf.line_width(cursor.row));
  }
}

pub fn move_down(buf: &TextBuffer, cursor: &mut Cursor) {
  if cursor.row + 1 < buf.get_line_count() {
    cursor.row += 1;
    cursor.col = cursor.desired_col.min(buf.line_width(cursor.row));
  }
}

pub fn move_line_start(cursor: &mut Cursor) {
  cursor.col = 0;
  cursor.desired_col = 0;
}

pub fn move_line_end(buf: &TextBuffer, cursor: &mut Cursor) {
  cursor.col = buf.line_width(cursor.row);
  cursor.desired_col = cursor.col;
}

pub fn move_document_start(cursor: &mut Cursor) {
  cursor.row = 0;
  cursor.col = 0;
  cursor.desired_col = 0;
}

pub fn move_document_end(buf: &TextBuffer, cursor: &mut Cursor) {
  cursor.row = buf.get_line_count().saturating_sub(1);
  cursor.col = buf.line_width(cursor.row);
  cursor.desired_col = cursor.col;
}

#[cfg(test)]
mod ops_tests {
  use super::*;
  use crate::cfg::BufferOptions;

  fn buffer_with(text: &str) -> TextBuffer {
    let mut buf = TextBuffer::new(BufferOptions::default());
    buf.set_text(text.as_bytes()).unwrap();
    buf
  }

  #[test]
  fn left_at_line_start_wraps_to_previous_line_end() {
    let buf = buffer_with("ab\ncd");
    let mut cursor = Cursor::new(1, 0);
    move_left(&buf, &mut cursor);
    assert_eq!((cursor.row, cursor.col), (0, 2));
  }

  #[test]
  fn right_at_line_end_wraps_to_next_line_start() {
    let buf = buffer_with("ab\ncd");
    let mut cursor = Cursor::new(0, 2);
    move_right(&buf, &mut cursor);
    assert_eq!((cursor.row, cursor.col), (1, 0));
  }

  #[test]
  fn vertical_move_restores_desired_col_through_a_short_line() {
    let buf = buffer_with("abcdef\nxy\nabcdef");
    let mut cursor = Cursor::new(0, 5);
    move_down(&buf, &mut cursor);
    assert_eq!(cursor.col, 2);
    move_down(&buf, &mut cursor);
    assert_eq!(cursor.col, 5);
  }
}
