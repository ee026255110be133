//! Slices a virtual-line sequence down to a [`Viewport`]'s visible rows.

use crate::coord::Viewport;
use crate::view::reflow::VirtualLine;

/// Returns the virtual lines visible within `viewport`, clamped to the
/// sequence's bounds. `viewport.x`/`width` are left to the caller (horizontal
/// clipping happens per-line when rendering, not here).
pub fn slice_virtual_lines<'a>(lines: &'a [VirtualLine], viewport: &Viewport) -> &'a [VirtualLine] {
  let start = viewport.y.min(lines.len());
  let end = viewport.y_range().end.min(lines.len());
  &lines[start..end]
}

#[cfg(test)]
mod viewport_tests {
  use super::*;
  use crate::view::reflow::VirtualChunk;

  fn line(n: usize) -> VirtualLine {
    VirtualLine {
      chunks: vec![VirtualChunk { mem_id: 0, byte_start: 0, byte_end: 0, width: 0 }],
      width: 0,
      char_offset: n,
      source_line: n,
      source_col_offset: 0,
    }
  }

  #[test]
  fn slices_the_requested_window() {
    let lines: Vec<VirtualLine> = (0..10).map(line).collect();
    let vp = Viewport::new(0, 3, 20, 4);
    let visible = slice_virtual_lines(&lines, &vp);
    assert_eq!(visible.iter().map(|l| l.source_line).collect::<Vec<_>>(), vec![3, 4, 5, 6]);
  }

  #[test]
  fn clamps_past_the_end() {
    let lines: Vec<VirtualLine> = (0..5).map(line).collect();
    let vp = Viewport::new(0, 3, 20, 10);
    let visible = slice_virtual_lines(&lines, &vp);
    assert_eq!(visible.len(), 2);
  }
}
