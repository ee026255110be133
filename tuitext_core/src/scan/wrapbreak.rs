//! Wrap-break enumeration: the positions a word-wrap reflow may break at.

use crate::unicode::grapheme_indices;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapBreakKind {
  Whitespace,
  Punctuation,
  Bracket,
  UnicodeBreaker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapBreak {
  pub byte_offset: usize,
  /// Ordinal index of the grapheme cluster this break sits at, counting
  /// clusters rather than code points (a ZWJ sequence is one unit).
  pub char_offset: usize,
  pub kind: WrapBreakKind,
}

fn classify(cluster: &str) -> Option<WrapBreakKind> {
  // Multi-codepoint clusters (combining marks, ZWJ sequences, flags) are
  // never break candidates; only single-scalar breakers are.
  let c = {
    let mut chars = cluster.chars();
    let first = chars.next()?;
    if chars.next().is_some() {
      return None;
    }
    first
  };
  match c {
    ' ' | '\t' | '\r' | '\n' => Some(WrapBreakKind::Whitespace),
    '-' | '/' | '\\' | '.' | ',' | ';' | ':' | '!' | '?' => Some(WrapBreakKind::Punctuation),
    '(' | ')' | '[' | ']' | '{' | '}' => Some(WrapBreakKind::Bracket),
    '\u{00A0}' // NBSP
    | '\u{2003}' // EM SPACE
    | '\u{3000}' // IDEOGRAPHIC SPACE
    | '\u{00AD}' // SOFT HYPHEN
    | '\u{2010}' // HYPHEN
    | '\u{200B}' // ZERO WIDTH SPACE
    | '\u{2013}' // EN DASH
    | '\u{2014}' // EM DASH
      => Some(WrapBreakKind::UnicodeBreaker),
    _ => None,
  }
}

/// Enumerates wrap-break candidates in `bytes`, in order. `bytes` is treated
/// as UTF-8 when well-formed; otherwise every byte is its own one-column
/// grapheme and no multi-byte breaker classes apply.
pub fn find_wrap_breaks(bytes: &[u8]) -> Vec<WrapBreak> {
  match std::str::from_utf8(bytes) {
    Ok(s) => {
      let mut out = Vec::new();
      for (idx, (byte_offset, len)) in grapheme_indices(s).enumerate() {
        let cluster = &s[byte_offset..byte_offset + len];
        if let Some(kind) = classify(cluster) {
          out.push(WrapBreak {
            byte_offset,
            char_offset: idx,
            kind,
          });
        }
      }
      out
    }
    Err(_) => bytes
      .iter()
      .enumerate()
      .filter_map(|(idx, &b)| {
        classify(std::str::from_utf8(&[b]).ok()?).map(|kind| WrapBreak {
          byte_offset: idx,
          char_offset: idx,
          kind,
        })
      })
      .collect(),
  }
}

#[cfg(test)]
mod wrapbreak_tests {
  use super::*;

  #[test]
  fn spaces_are_whitespace_breaks() {
    let breaks = find_wrap_breaks(b"the quick fox");
    assert_eq!(breaks.len(), 2);
    assert_eq!(breaks[0].kind, WrapBreakKind::Whitespace);
    assert_eq!(breaks[0].byte_offset, 3);
    assert_eq!(breaks[1].byte_offset, 9);
  }

  #[test]
  fn zwj_cluster_is_not_a_break() {
    let breaks = find_wrap_breaks("a👩‍🚀b".as_bytes());
    assert!(breaks.is_empty());
  }

  #[test]
  fn unicode_breakers_detected() {
    let breaks = find_wrap_breaks("a\u{00A0}b".as_bytes());
    assert_eq!(breaks.len(), 1);
    assert_eq!(breaks[0].kind, WrapBreakKind::UnicodeBreaker);
  }
}
