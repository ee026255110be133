//! Width-bounded wrap-position finder.

use crate::unicode::{WidthMethod, grapheme_cluster_width, grapheme_indices};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapPosResult {
  pub byte_offset: usize,
  pub columns_used: usize,
  pub grapheme_count: usize,
}

/// Finds the greatest prefix of `bytes` whose display width does not exceed
/// `max_width`. If even the first grapheme's width exceeds `max_width`, the
/// result is the empty prefix (`byte_offset = 0`) — callers that must make
/// progress on an empty line handle that case themselves.
///
/// `ascii_only_hint`, when true, lets the scanner treat one byte as one
/// column instead of walking grapheme clusters.
pub fn find_wrap_pos_by_width(
  bytes: &[u8],
  max_width: usize,
  tab_width: u16,
  ascii_only_hint: bool,
  method: WidthMethod,
) -> WrapPosResult {
  if ascii_only_hint {
    let take = bytes.len().min(max_width);
    return WrapPosResult {
      byte_offset: take,
      columns_used: take,
      grapheme_count: take,
    };
  }

  let s = match std::str::from_utf8(bytes) {
    Ok(s) => s,
    Err(e) => std::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
  };

  let mut columns_used = 0usize;
  let mut byte_offset = 0usize;
  let mut grapheme_count = 0usize;

  for (offset, len) in grapheme_indices(s) {
    let cluster = &s[offset..offset + len];
    let width = grapheme_cluster_width(method, tab_width, cluster);
    if columns_used + width > max_width {
      break;
    }
    columns_used += width;
    byte_offset = offset + len;
    grapheme_count += 1;
  }

  WrapPosResult {
    byte_offset,
    columns_used,
    grapheme_count,
  }
}

#[cfg(test)]
mod wrapwidth_tests {
  use super::*;

  #[test]
  fn ascii_hint_takes_byte_for_byte() {
    let r = find_wrap_pos_by_width(b"abcdefghij", 3, 8, true, WidthMethod::Wcwidth);
    assert_eq!(r.byte_offset, 3);
    assert_eq!(r.columns_used, 3);
    assert_eq!(r.grapheme_count, 3);
  }

  #[test]
  fn stops_before_exceeding_width() {
    let r = find_wrap_pos_by_width(b"abcdefghij", 3, 8, false, WidthMethod::Wcwidth);
    assert_eq!(r.byte_offset, 3);
    assert_eq!(r.grapheme_count, 3);
  }

  #[test]
  fn single_wide_grapheme_exceeding_width_yields_empty_prefix() {
    // Wide CJK char (2 cells) cannot fit into a width-1 budget.
    let r = find_wrap_pos_by_width("中".as_bytes(), 1, 8, false, WidthMethod::Unicode);
    assert_eq!(r.byte_offset, 0);
    assert_eq!(r.grapheme_count, 0);
  }

  #[test]
  fn zwj_cluster_counts_as_one_grapheme() {
    let r = find_wrap_pos_by_width("👩‍🚀".as_bytes(), 10, 8, false, WidthMethod::Unicode);
    assert_eq!(r.grapheme_count, 1);
  }
}
