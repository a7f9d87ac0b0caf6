//! Dense blocks of cell indices between an inclusive min and max.
//!
//! # Memory Layout
//!
//! ```text
//! linear = (ox * dims_y + oy) * dims_z + oz
//!
//! X is the major axis, Z the minor one, so iteration order is
//! lexicographic by (x, y, z) offset from `min`.
//! ```

use crate::types::CellIndex;

/// Inclusive 3D block of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBlock {
  /// First cell of the block.
  pub min: CellIndex,
  /// Cells per axis (each >= 1).
  pub dims: [usize; 3],
}

impl CellBlock {
  /// Block spanning `min..=max`.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: CellIndex, max: CellIndex) -> Self {
    debug_assert!(
      min.x <= max.x && min.y <= max.y && min.z <= max.z,
      "block min must be <= max on all axes"
    );
    Self {
      min,
      dims: [
        (max.x as i64 - min.x as i64) as usize + 1,
        (max.y as i64 - min.y as i64) as usize + 1,
        (max.z as i64 - min.z as i64) as usize + 1,
      ],
    }
  }

  /// Last cell of the block.
  pub fn max(&self) -> CellIndex {
    CellIndex::new(
      self.min.x + self.dims[0] as i32 - 1,
      self.min.y + self.dims[1] as i32 - 1,
      self.min.z + self.dims[2] as i32 - 1,
    )
  }

  /// Number of cells.
  #[inline]
  pub fn len(&self) -> usize {
    self.dims[0] * self.dims[1] * self.dims[2]
  }

  /// Never true: a block holds at least one cell.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Convert a per-axis offset to a linear buffer index.
  #[inline(always)]
  pub fn linear(&self, offset: [usize; 3]) -> usize {
    (offset[0] * self.dims[1] + offset[1]) * self.dims[2] + offset[2]
  }

  /// Convert a linear buffer index back to a per-axis offset.
  #[inline(always)]
  pub fn offset(&self, linear: usize) -> [usize; 3] {
    let z = linear % self.dims[2];
    let rest = linear / self.dims[2];
    [rest / self.dims[1], rest % self.dims[1], z]
  }

  /// Absolute cell at a per-axis offset.
  #[inline]
  pub fn cell(&self, offset: [usize; 3]) -> CellIndex {
    CellIndex::new(
      self.min.x + offset[0] as i32,
      self.min.y + offset[1] as i32,
      self.min.z + offset[2] as i32,
    )
  }

  /// Absolute cell at a linear buffer index.
  #[inline]
  pub fn cell_at(&self, linear: usize) -> CellIndex {
    self.cell(self.offset(linear))
  }

  /// Every cell of the block in linear order.
  pub fn cells(&self) -> Vec<CellIndex> {
    (0..self.len()).map(|i| self.cell_at(i)).collect()
  }
}

/// A single-Z-layer block: the 2D result of marking a rect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellSlice {
  /// Shared Z index of every cell.
  pub z: i32,
  dims: [usize; 2],
  cells: Vec<CellIndex>,
}

impl CellSlice {
  /// Flatten a block that spans exactly one Z layer.
  ///
  /// # Panics
  /// If the block is more than one layer deep. Rect callers always produce a
  /// single layer; anything else is a broken invariant.
  pub fn from_block(block: &CellBlock) -> Self {
    assert_eq!(
      block.dims[2], 1,
      "a 2D slice must span exactly one Z layer, got {}",
      block.dims[2]
    );
    Self {
      z: block.min.z,
      dims: [block.dims[0], block.dims[1]],
      cells: block.cells(),
    }
  }

  /// Cells along X and Y.
  pub fn dims(&self) -> [usize; 2] {
    self.dims
  }

  /// Cell at (ix, iy) offset from the slice origin.
  pub fn get(&self, ix: usize, iy: usize) -> Option<CellIndex> {
    if ix >= self.dims[0] || iy >= self.dims[1] {
      return None;
    }
    self.cells.get(ix * self.dims[1] + iy).copied()
  }

  pub fn len(&self) -> usize {
    self.cells.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cells.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &CellIndex> {
    self.cells.iter()
  }

  pub fn as_slice(&self) -> &[CellIndex] {
    &self.cells
  }

  pub fn into_vec(self) -> Vec<CellIndex> {
    self.cells
  }
}

#[cfg(test)]
#[path = "block_test.rs"]
mod block_test;
