//! ASCII-only test over raw bytes.
//!
//! Scans in 16-byte lanes (the width a real SIMD backend would use) but is
//! written as safe, portable Rust; a vectorised backend must agree with this
//! fallback byte-for-byte.

const LANE: usize = 16;

/// True iff every byte of `bytes` is a printable ASCII byte in `[0x20, 0x7E]`.
/// Control bytes (including `\n`, `\r`, `\t`, DEL) and any byte `>= 0x80`
/// disqualify the slice.
pub fn is_ascii_only(bytes: &[u8]) -> bool {
  let mut chunks = bytes.chunks_exact(LANE);
  for lane in &mut chunks {
    if !lane_is_printable_ascii(lane) {
      return false;
    }
  }
  lane_is_printable_ascii(chunks.remainder())
}

#[inline]
fn lane_is_printable_ascii(lane: &[u8]) -> bool {
  lane.iter().all(|&b| (0x20..=0x7E).contains(&b))
}

#[cfg(test)]
mod ascii_tests {
  use super::*;

  #[test]
  fn empty_is_ascii_only() {
    assert!(is_ascii_only(b""));
  }

  #[test]
  fn printable_ascii_passes() {
    assert!(is_ascii_only(b"the quick brown fox"));
  }

  #[test]
  fn control_bytes_fail() {
    assert!(!is_ascii_only(b"abc\ndef"));
    assert!(!is_ascii_only(b"abc\tdef"));
    assert!(!is_ascii_only(b"abc\rdef"));
  }

  #[test]
  fn non_ascii_bytes_fail() {
    assert!(!is_ascii_only("caf\u{e9}".as_bytes()));
  }

  #[test]
  fn boundary_spans_multiple_lanes() {
    let mut s = "a".repeat(LANE * 2 + 3);
    assert!(is_ascii_only(s.as_bytes()));
    s.push('\n');
    assert!(!is_ascii_only(s.as_bytes()));
  }
}
