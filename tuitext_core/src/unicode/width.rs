//! Display-width computation for characters and strings.

use ascii::AsciiChar;
use unicode_width::UnicodeWidthChar;

/// Which table governs ambiguous-width code points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidthMethod {
  /// POSIX `wcwidth`: ambiguous-width code points count as narrow (1 cell).
  #[default]
  Wcwidth,
  /// Unicode East-Asian Width (UAX #11): ambiguous-width code points count
  /// as wide (2 cells) when the surrounding context is CJK.
  Unicode,
}

/// Display width of a single `char`, honoring ASCII control codes
/// (`\t` expands to `tab_stop` cells, `\n`/`\r` contribute zero).
pub fn char_width(method: WidthMethod, tab_stop: u16, c: char) -> usize {
  if c.is_ascii_control() {
    let ac = AsciiChar::from_ascii(c).expect("ascii control code");
    return match ac {
      AsciiChar::Tab => tab_stop as usize,
      AsciiChar::LineFeed | AsciiChar::CarriageReturn => 0,
      _ => 0,
    };
  }
  match method {
    WidthMethod::Wcwidth => UnicodeWidthChar::width(c).unwrap_or(0),
    WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c).unwrap_or(0),
  }
}

/// Display width of a `str`, summing per-`char` widths. Does not account for
/// grapheme clustering; callers that need cluster-aware width should use
/// [`text_width`] instead.
pub fn str_width(method: WidthMethod, tab_stop: u16, s: &str) -> usize {
  s.chars().map(|c| char_width(method, tab_stop, c)).sum()
}

/// Display width of one grapheme cluster: the width of its first scalar
/// value. Combining marks, variation selectors, and zero-width joiners
/// trailing the base character never add to a cluster's width, so a ZWJ
/// emoji sequence occupies the same cells its base glyph would alone.
pub fn grapheme_cluster_width(method: WidthMethod, tab_stop: u16, cluster: &str) -> usize {
  cluster
    .chars()
    .next()
    .map(|c| char_width(method, tab_stop, c))
    .unwrap_or(0)
}

/// Cluster-aware display width of `s`: the sum of [`grapheme_cluster_width`]
/// over its extended grapheme clusters.
pub fn text_width(method: WidthMethod, tab_stop: u16, s: &str) -> usize {
  super::grapheme_indices(s)
    .map(|(offset, len)| grapheme_cluster_width(method, tab_stop, &s[offset..offset + len]))
    .sum()
}
