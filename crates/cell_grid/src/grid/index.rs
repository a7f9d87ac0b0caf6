//! Continuous-to-cell mapping and geometry bounds.
//!
//! Every call site (points, triangle corners, query bounds) goes through
//! [`index_of`], so a coordinate always lands in the same cell.

use glam::DVec3;
use smallvec::SmallVec;

use crate::constants::MAX_CELL_INDEX;
use crate::error::{GridError, GridResult};
use crate::types::{Aabb, CellIndex};

/// Map one coordinate to its cell index along an axis.
///
/// `ceil((coord - cell_size / 2) / cell_size)`: cell `i` owns
/// `((i - 0.5) * cell_size, (i + 0.5) * cell_size]`, so a coordinate exactly
/// on a wall maps to the lower cell. Monotonic non-decreasing in `coord`.
/// `cell_size` is validated once by the grid, not here.
#[inline(always)]
pub fn index_of(coord: f64, cell_size: f64) -> i32 {
  ((coord - cell_size * 0.5) / cell_size).ceil() as i32
}

/// Map a point to its cell by applying [`index_of`] per axis.
#[inline]
pub fn index_of_point(point: DVec3, cell_size: f64) -> CellIndex {
  CellIndex::new(
    index_of(point.x, cell_size),
    index_of(point.y, cell_size),
    index_of(point.z, cell_size),
  )
}

/// World-space center of a cell.
#[inline]
pub fn cell_center(index: CellIndex, cell_size: f64) -> DVec3 {
  DVec3::new(index.x as f64, index.y as f64, index.z as f64) * cell_size
}

/// World-space cube of a cell.
#[inline]
pub fn cell_bounds(index: CellIndex, cell_size: f64) -> Aabb {
  Aabb::from_center_half_extents(cell_center(index, cell_size), DVec3::splat(cell_size * 0.5))
}

/// World-space box covered by the inclusive cell range `min..=max`.
#[inline]
pub fn cell_range_bounds(min: CellIndex, max: CellIndex, cell_size: f64) -> Aabb {
  Aabb::new(cell_bounds(min, cell_size).min, cell_bounds(max, cell_size).max)
}

/// Reject points whose cell index would pass `MAX_CELL_INDEX` on any axis.
pub fn ensure_indexable(points: &[DVec3], cell_size: f64) -> GridResult<()> {
  let limit = MAX_CELL_INDEX as f64 * cell_size;
  if points.iter().all(|p| p.abs().max_element() <= limit) {
    Ok(())
  } else {
    Err(GridError::IndexOutOfRange)
  }
}

/// Float and index-space bounds of a primitive, computed once at registration.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometryBounds {
  /// Componentwise min/max of the input points.
  pub aabb: Aabb,
  /// Componentwise min of the 8 corner cells.
  pub cell_min: CellIndex,
  /// Componentwise max of the 8 corner cells.
  pub cell_max: CellIndex,
  /// Cell of each input point, in input order.
  pub point_cells: SmallVec<[CellIndex; 4]>,
}

impl GeometryBounds {
  /// Build bounds for a point set (3 for a triangle, 4 for a rect).
  ///
  /// The index AABB comes from mapping all 8 corners of the float AABB, so
  /// it contains the cell of every input point.
  pub fn from_points(points: &[DVec3], cell_size: f64) -> Self {
    let aabb = Aabb::from_points(points);

    let mut cell_min = CellIndex::new(i32::MAX, i32::MAX, i32::MAX);
    let mut cell_max = CellIndex::new(i32::MIN, i32::MIN, i32::MIN);
    for corner in aabb.corners() {
      let cell = index_of_point(corner, cell_size);
      cell_min = cell_min.min(cell);
      cell_max = cell_max.max(cell);
    }

    let point_cells = points
      .iter()
      .map(|&p| index_of_point(p, cell_size))
      .collect();

    Self {
      aabb,
      cell_min,
      cell_max,
      point_cells,
    }
  }

  /// True when the whole primitive falls into one cell.
  #[inline]
  pub fn is_single_cell(&self) -> bool {
    self.cell_min == self.cell_max
  }

  /// Cells per axis of the index AABB.
  #[inline]
  pub fn dims(&self) -> [usize; 3] {
    [
      (self.cell_max.x as i64 - self.cell_min.x as i64) as usize + 1,
      (self.cell_max.y as i64 - self.cell_min.y as i64) as usize + 1,
      (self.cell_max.z as i64 - self.cell_min.z as i64) as usize + 1,
    ]
  }

  /// Number of cells in the index AABB.
  #[inline]
  pub fn cell_count(&self) -> usize {
    let [x, y, z] = self.dims();
    x * y * z
  }

  /// `cell_count`, or `None` when it does not fit in `usize`.
  pub fn checked_cell_count(&self) -> Option<usize> {
    let [x, y, z] = self.dims();
    x.checked_mul(y)?.checked_mul(z)
  }

  #[inline]
  pub fn contains_cell(&self, cell: &CellIndex) -> bool {
    cell.within(&self.cell_min, &self.cell_max)
  }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
