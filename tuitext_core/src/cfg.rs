//! Configuration structs for the buffer, view, and editor-view layers.
//!
//! Each owning component gets one `derive_builder`-backed options struct,
//! mirroring the pattern of a global options object with a paired builder.

use crate::unicode::WidthMethod;
use derive_builder::Builder;

/// Wrap behaviour for a [`crate::view::TextBufferView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapMode {
  #[default]
  None,
  Char,
  Word,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba(pub f32, pub f32, pub f32, pub f32);

impl Default for Rgba {
  fn default() -> Self {
    Rgba(1.0, 1.0, 1.0, 1.0)
  }
}

#[derive(Debug, Clone, Builder)]
#[builder(pattern = "owned", build_fn(error = "std::convert::Infallible"))]
pub struct BufferOptions {
  #[builder(default = "WidthMethod::Wcwidth")]
  pub width_method: WidthMethod,

  #[builder(default = "8")]
  pub tab_stop: u16,

  #[builder(default)]
  pub default_fg: Rgba,

  #[builder(default)]
  pub default_bg: Rgba,

  #[builder(default)]
  pub default_attributes: u8,
}

impl Default for BufferOptions {
  fn default() -> Self {
    BufferOptionsBuilder::default().build().unwrap()
  }
}

impl BufferOptions {
  pub fn builder() -> BufferOptionsBuilder {
    BufferOptionsBuilder::default()
  }
}

#[derive(Debug, Clone, Builder)]
#[builder(pattern = "owned", build_fn(error = "std::convert::Infallible"))]
pub struct ViewOptions {
  #[builder(default = "WrapMode::None")]
  pub wrap_mode: WrapMode,

  #[builder(default)]
  pub wrap_width: Option<usize>,
}

impl Default for ViewOptions {
  fn default() -> Self {
    ViewOptionsBuilder::default().build().unwrap()
  }
}

impl ViewOptions {
  pub fn builder() -> ViewOptionsBuilder {
    ViewOptionsBuilder::default()
  }
}

#[derive(Debug, Clone, Builder)]
#[builder(pattern = "owned", build_fn(error = "std::convert::Infallible"))]
pub struct EditorViewOptions {
  /// Fraction of the viewport kept clear on each side of the cursor, in
  /// `[0, 0.5]`.
  #[builder(default = "0.125")]
  pub scroll_margin: f64,
}

impl Default for EditorViewOptions {
  fn default() -> Self {
    EditorViewOptionsBuilder::default().build().unwrap()
  }
}

impl EditorViewOptions {
  pub fn builder() -> EditorViewOptionsBuilder {
    EditorViewOptionsBuilder::default()
  }

  pub fn clamped_scroll_margin(&self) -> f64 {
    self.scroll_margin.clamp(0.0, 0.5)
  }
}
