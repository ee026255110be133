use super::*;

fn ascii_buffer(s: &str) -> TextBuffer {
  let mut buf = TextBuffer::default();
  buf.set_text(s.as_bytes()).unwrap();
  buf
}

#[test]
fn mixed_line_endings_normalise_to_lf() {
  let buf = ascii_buffer("unix\nmac\rwin\r\n");
  assert_eq!(buf.get_line_count(), 4);
  assert_eq!(buf.get_plain_text(), b"unix\nmac\nwin\n");
}

#[test]
fn length_equals_widths_plus_separators() {
  let buf = ascii_buffer("abc\ndefgh\ni");
  let widths: usize = (0..buf.get_line_count()).map(|l| buf.line_width(l)).sum();
  assert_eq!(buf.get_length(), widths + buf.get_line_count() - 1);
}

#[test]
fn coordinate_bijection_holds_for_every_position() {
  let buf = ascii_buffer("abc\ndefgh\ni");
  for row in 0..buf.get_line_count() {
    for col in 0..=buf.line_width(row) {
      let offset = buf.coords_to_offset(row, col);
      assert_eq!(buf.offset_to_coords(offset), (row, col));
    }
  }
}

#[test]
fn set_text_is_idempotent_with_no_highlight_carryover() {
  let mut buf = ascii_buffer("abcdef");
  buf.add_highlight(0, 0, 3, 7, 1, 1);
  buf.set_text(b"abcdef").unwrap();
  assert!(buf.highlights.iter().all(|row| row.is_empty()));
}

#[test]
fn selection_over_zwj_cluster_yields_full_cluster_bytes() {
  let buf = ascii_buffer("a👩‍🚀b");
  let (row, col1) = buf.offset_to_coords(1);
  let (_, col2) = buf.offset_to_coords(2);
  let extracted = buf.line_bytes_in_col_range(row, col1, col2);
  assert_eq!(extracted, "👩‍🚀".as_bytes());
}

#[test]
fn highlight_overlap_resolves_by_priority() {
  let mut buf = ascii_buffer("abcdef");
  buf.add_highlight(0, 0, 5, 10, 1, 1);
  buf.add_highlight(0, 2, 4, 20, 2, 2);
  let spans = buf.get_line_spans(0).to_vec();
  assert_eq!(
    spans,
    vec![
      StyleSpan { col: 0, style_id: 10, next_col: 2 },
      StyleSpan { col: 2, style_id: 20, next_col: 4 },
      StyleSpan { col: 4, style_id: 10, next_col: 5 },
      StyleSpan { col: 5, style_id: 0, next_col: usize::MAX },
    ]
  );
}

#[test]
fn replace_range_splices_without_touching_unrelated_content() {
  let mut buf = ascii_buffer("hello world");
  buf.replace_range(6, 11, b"rust!").unwrap();
  assert_eq!(buf.get_plain_text(), b"hello rust!");
}

#[test]
fn empty_lines_are_adjacent_breaks_with_no_text() {
  let buf = ascii_buffer("a\n\nb");
  assert_eq!(buf.get_line_count(), 3);
  assert_eq!(buf.line_width(1), 0);
}
