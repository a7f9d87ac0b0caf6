//! GridConfig - cell size and marching tunables.

use crate::constants::{DEFAULT_CELL_SIZE, DEFAULT_MAX_BLOCK_CELLS, DEFAULT_PARALLEL_THRESHOLD, EPSILON};
use crate::error::{GridError, GridResult};

/// Configuration for a [`SpatialGrid`](crate::SpatialGrid).
#[derive(Clone, Debug, PartialEq)]
pub struct GridConfig {
  /// Edge length of one cubic cell in world units.
  pub cell_size: f64,

  /// Block size (cells) at or above which stripes are marched on the rayon
  /// pool. 0 disables parallel marching.
  pub parallel_threshold: usize,

  /// Relative tolerance for the intersection predicates.
  pub epsilon: f64,

  /// Largest index block a triangle or rect may span before marking is
  /// refused.
  pub max_block_cells: usize,
}

impl Default for GridConfig {
  fn default() -> Self {
    Self {
      cell_size: DEFAULT_CELL_SIZE,
      parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
      epsilon: EPSILON,
      max_block_cells: DEFAULT_MAX_BLOCK_CELLS,
    }
  }
}

impl GridConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_cell_size(mut self, size: f64) -> Self {
    self.cell_size = size;
    self
  }

  pub fn with_parallel_threshold(mut self, cells: usize) -> Self {
    self.parallel_threshold = cells;
    self
  }

  pub fn with_epsilon(mut self, epsilon: f64) -> Self {
    self.epsilon = epsilon;
    self
  }

  pub fn with_max_block_cells(mut self, cells: usize) -> Self {
    self.max_block_cells = cells;
    self
  }

  /// Half the cell edge length.
  #[inline]
  pub fn half_cell(&self) -> f64 {
    self.cell_size * 0.5
  }

  /// True when a block of `cells` cells should be marched in parallel.
  #[inline]
  pub fn marches_in_parallel(&self, cells: usize) -> bool {
    self.parallel_threshold != 0 && cells >= self.parallel_threshold
  }

  /// Reject configurations the grid cannot run with.
  pub fn validate(&self) -> GridResult<()> {
    if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
      return Err(GridError::InvalidCellSize(self.cell_size));
    }
    if !self.epsilon.is_finite() || self.epsilon < 0.0 {
      return Err(GridError::InvalidEpsilon(self.epsilon));
    }
    if self.max_block_cells == 0 {
      return Err(GridError::InvalidBlockLimit);
    }
    Ok(())
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
