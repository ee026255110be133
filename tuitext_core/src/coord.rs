//! Coordinate types shared by the view and editor-view layers.
//!
//! Display-column coordinates are "upside down" relative to mathematical
//! Cartesian coordinates: the origin is the top-left cell, Y grows downward.

use geo::{Point, Rect};

/// Position using [`usize`] components: a (row, column) pair in display-width
/// units, or an (x, y) pair in viewport-relative cells.
pub type UPos = Point<usize>;

/// Rectangle using [`usize`] components: a viewport `(x, y, width, height)`.
pub type URect = Rect<usize>;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Size {
  pub width: usize,
  pub height: usize,
}

impl Size {
  pub fn new(width: usize, height: usize) -> Self {
    Self { width, height }
  }
}

/// A rectangular viewport into virtual-line space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Viewport {
  pub x: usize,
  pub y: usize,
  pub width: usize,
  pub height: usize,
}

impl Viewport {
  pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
    Self { x, y, width, height }
  }

  pub fn y_range(&self) -> std::ops::Range<usize> {
    self.y..self.y.saturating_add(self.height)
  }
}
