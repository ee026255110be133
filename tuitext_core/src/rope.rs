//! Generic balanced tree of [`Segment`] leaves with aggregated [`Metrics`].

mod metrics;
mod segment;
mod tree;

pub use metrics::Metrics;
pub use segment::{FLAG_ASCII_ONLY, GraphemeInfo, Segment, TextChunk};
pub use tree::{Rope, RopeLeaf};
