//! Unicode tables: display-width methods and grapheme-cluster handling.

mod grapheme;
mod width;

pub use grapheme::{GraphemeId, GraphemePool, grapheme_indices};
pub use width::{WidthMethod, char_width, grapheme_cluster_width, str_width, text_width};

#[cfg(test)]
mod width_tests;
