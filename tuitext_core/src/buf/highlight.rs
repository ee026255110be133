//! Highlights and the flattened style spans derived from them.

/// A styled range in display-column units on one logical line. Higher
/// `priority` wins on overlap; `hl_ref` groups highlights for bulk removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
  pub col_start: usize,
  pub col_end: usize,
  pub style_id: u32,
  pub priority: i32,
  pub hl_ref: u32,
}

/// One run of a flattened, gap-free, line-covering style sequence.
/// `next_col == usize::MAX` marks the final span, standing in for "to the
/// end of the line" (the spec's `∞`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
  pub col: usize,
  pub style_id: u32,
  pub next_col: usize,
}

/// Flattens `highlights` over `[0, line_width)` into ordered, non-overlapping
/// spans. Ties in priority are broken by insertion order (earlier wins).
/// `style_id = 0` means "use defaults".
pub fn flatten_line_spans(highlights: &[Highlight], line_width: usize) -> Vec<StyleSpan> {
  if line_width == 0 {
    return vec![StyleSpan {
      col: 0,
      style_id: 0,
      next_col: usize::MAX,
    }];
  }

  let mut winner: Vec<(u32, i32, usize)> = vec![(0u32, i32::MIN, usize::MAX); line_width];
  for (idx, h) in highlights.iter().enumerate() {
    let start = h.col_start.min(line_width);
    let end = h.col_end.min(line_width);
    for slot in winner.iter_mut().take(end).skip(start) {
      let (_, cur_priority, cur_idx) = *slot;
      if h.priority > cur_priority || (h.priority == cur_priority && idx < cur_idx) {
        *slot = (h.style_id, h.priority, idx);
      }
    }
  }

  let mut spans = Vec::new();
  let mut col = 0;
  while col < line_width {
    let style_id = winner[col].0;
    let start = col;
    while col < line_width && winner[col].0 == style_id {
      col += 1;
    }
    spans.push(StyleSpan {
      col: start,
      style_id,
      next_col: col,
    });
  }
  if let Some(last) = spans.last_mut() {
    last.next_col = usize::MAX;
  }
  spans
}

#[cfg(test)]
mod highlight_tests {
  use super::*;

  #[test]
  fn overlap_resolves_by_priority_then_insertion_order() {
    let highlights = [
      Highlight { col_start: 0, col_end: 5, style_id: 10, priority: 1, hl_ref: 1 },
      Highlight { col_start: 2, col_end: 4, style_id: 20, priority: 2, hl_ref: 2 },
    ];
    let spans = flatten_line_spans(&highlights, 6);
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
  fn no_highlights_yields_one_default_span() {
    let spans = flatten_line_spans(&[], 4);
    assert_eq!(spans, vec![StyleSpan { col: 0, style_id: 0, next_col: usize::MAX }]);
  }

  #[test]
  fn equal_priority_keeps_the_earlier_highlight() {
    let highlights = [
      Highlight { col_start: 0, col_end: 3, style_id: 1, priority: 1, hl_ref: 1 },
      Highlight { col_start: 0, col_end: 3, style_id: 2, priority: 1, hl_ref: 2 },
    ];
    let spans = flatten_line_spans(&highlights, 3);
    assert_eq!(spans, vec![StyleSpan { col: 0, style_id: 1, next_col: usize::MAX }]);
  }
}
