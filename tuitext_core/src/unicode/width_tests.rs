use super::width::*;

#[test]
fn ascii_is_one_cell() {
  assert_eq!(char_width(WidthMethod::Wcwidth, 8, 'a'), 1);
  assert_eq!(char_width(WidthMethod::Unicode, 8, 'a'), 1);
}

#[test]
fn tab_expands_to_tab_stop() {
  assert_eq!(char_width(WidthMethod::Wcwidth, 4, '\t'), 4);
  assert_eq!(char_width(WidthMethod::Wcwidth, 8, '\t'), 8);
}

#[test]
fn newline_and_cr_contribute_zero() {
  assert_eq!(char_width(WidthMethod::Wcwidth, 8, '\n'), 0);
  assert_eq!(char_width(WidthMethod::Wcwidth, 8, '\r'), 0);
}

#[test]
fn cjk_is_two_cells_under_unicode_method() {
  // U+4E2D CJK UNIFIED IDEOGRAPH "中"
  assert_eq!(char_width(WidthMethod::Unicode, 8, '中'), 2);
  assert_eq!(char_width(WidthMethod::Wcwidth, 8, '中'), 2);
}

#[test]
fn str_width_sums_chars() {
  assert_eq!(str_width(WidthMethod::Wcwidth, 8, "abc"), 3);
}

#[test]
fn text_width_counts_zwj_cluster_once() {
  let joined = text_width(WidthMethod::Unicode, 8, "a👩‍🚀b");
  let per_char = str_width(WidthMethod::Unicode, 8, "a👩‍🚀b");
  // The ZWJ and the trailing rocket never add their own width once
  // clustered with the base character.
  assert!(joined < per_char);
}
