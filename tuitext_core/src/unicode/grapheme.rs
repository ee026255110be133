//! Grapheme-cluster iteration and the interning pool for multi-byte clusters.

use crate::prelude::HashMap;
use compact_str::CompactString;
use unicode_segmentation::UnicodeSegmentation;

/// Handle into a [`GraphemePool`], interning a multi-byte grapheme cluster so
/// chunks that repeat the same cluster (wide emoji, combining marks) don't
/// each carry their own copy of its bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GraphemeId(pub u32);

/// Interning table for grapheme clusters wider than a single code point.
#[derive(Debug, Default)]
pub struct GraphemePool {
  clusters: Vec<CompactString>,
  index: HashMap<CompactString, GraphemeId>,
}

impl GraphemePool {
  pub fn new() -> Self {
    Self::default()
  }

  /// Interns `cluster`, returning its stable [`GraphemeId`].
  pub fn intern(&mut self, cluster: &str) -> GraphemeId {
    if let Some(id) = self.index.get(cluster) {
      return *id;
    }
    let id = GraphemeId(self.clusters.len() as u32);
    let owned = CompactString::from(cluster);
    self.clusters.push(owned.clone());
    self.index.insert(owned, id);
    id
  }

  pub fn resolve(&self, id: GraphemeId) -> &str {
    self.clusters[id.0 as usize].as_str()
  }

  pub fn len(&self) -> usize {
    self.clusters.len()
  }

  pub fn is_empty(&self) -> bool {
    self.clusters.is_empty()
  }
}

/// Iterates extended grapheme cluster boundaries of `s`, yielding
/// `(byte_offset, byte_len)` pairs in order. A single user-perceived
/// character such as `👩‍🚀` (woman astronaut, a ZWJ sequence) yields one
/// tuple spanning its full byte range, not one per code point.
pub fn grapheme_indices(s: &str) -> impl Iterator<Item = (usize, usize)> + '_ {
  UnicodeSegmentation::grapheme_indices(s, true).map(|(offset, cluster)| (offset, cluster.len()))
}
