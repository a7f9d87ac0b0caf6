//! Core value types: cell indices, boxes, triangles, rects and mark results.

use glam::{DVec2, DVec3, IVec3};

use crate::constants::CORNER_SIGNS;
use crate::error::{GridError, GridResult};
use crate::token::PendingId;

/// Integer grid coordinates of one cell.
///
/// Cell `(x, y, z)` is the cube of edge `cell_size` centered on
/// `(x, y, z) * cell_size`. Ordering is lexicographic by x, then y, then z.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
pub struct CellIndex {
  pub x: i32,
  pub y: i32,
  pub z: i32,
}

impl CellIndex {
  pub const ZERO: Self = Self { x: 0, y: 0, z: 0 };

  pub const fn new(x: i32, y: i32, z: i32) -> Self {
    Self { x, y, z }
  }

  /// Component along `axis` (0 = X, 1 = Y, 2 = Z).
  #[inline]
  pub fn axis(&self, axis: usize) -> i32 {
    match axis {
      0 => self.x,
      1 => self.y,
      _ => self.z,
    }
  }

  /// Copy with the component along `axis` replaced.
  #[inline]
  pub fn with_axis(mut self, axis: usize, value: i32) -> Self {
    match axis {
      0 => self.x = value,
      1 => self.y = value,
      _ => self.z = value,
    }
    self
  }

  /// Componentwise minimum.
  #[inline]
  pub fn min(self, other: Self) -> Self {
    Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
  }

  /// Componentwise maximum.
  #[inline]
  pub fn max(self, other: Self) -> Self {
    Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
  }

  /// True when `min <= self <= max` on every axis.
  #[inline]
  pub fn within(&self, min: &CellIndex, max: &CellIndex) -> bool {
    (min.x..=max.x).contains(&self.x)
      && (min.y..=max.y).contains(&self.y)
      && (min.z..=max.z).contains(&self.z)
  }
}

impl From<IVec3> for CellIndex {
  fn from(v: IVec3) -> Self {
    Self::new(v.x, v.y, v.z)
  }
}

impl From<CellIndex> for IVec3 {
  fn from(c: CellIndex) -> Self {
    IVec3::new(c.x, c.y, c.z)
  }
}

impl From<[i32; 3]> for CellIndex {
  fn from(v: [i32; 3]) -> Self {
    Self::new(v[0], v[1], v[2])
  }
}

/// Double-precision axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
  /// Minimum corner (inclusive).
  pub min: DVec3,
  /// Maximum corner (inclusive).
  pub max: DVec3,
}

impl Aabb {
  /// Create AABB with inverted extents (ready for encapsulation).
  pub fn empty() -> Self {
    Self {
      min: DVec3::splat(f64::INFINITY),
      max: DVec3::splat(f64::NEG_INFINITY),
    }
  }

  /// Create an AABB from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: DVec3, max: DVec3) -> Self {
    debug_assert!(
      min.cmple(max).all(),
      "AABB min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Create an AABB from center and half-extents.
  pub fn from_center_half_extents(center: DVec3, half_extents: DVec3) -> Self {
    Self {
      min: center - half_extents,
      max: center + half_extents,
    }
  }

  /// Tightest box around a point set.
  pub fn from_points(points: &[DVec3]) -> Self {
    let mut aabb = Self::empty();
    for &p in points {
      aabb.encapsulate(p);
    }
    aabb
  }

  /// Expand to include a point.
  #[inline]
  pub fn encapsulate(&mut self, point: DVec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Check if AABB is valid (min <= max on all axes).
  pub fn is_valid(&self) -> bool {
    self.min.cmple(self.max).all()
  }

  /// Check if this AABB overlaps another, boundaries included.
  #[inline]
  pub fn overlaps(&self, other: &Aabb) -> bool {
    self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
  }

  /// Check if this AABB contains a point, boundaries included.
  #[inline]
  pub fn contains_point(&self, point: DVec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }

  /// One of the 8 corners, see [`CORNER_SIGNS`] for the order.
  #[inline]
  pub fn corner(&self, i: usize) -> DVec3 {
    let s = CORNER_SIGNS[i];
    DVec3::new(
      if s[0] { self.max.x } else { self.min.x },
      if s[1] { self.max.y } else { self.min.y },
      if s[2] { self.max.z } else { self.min.z },
    )
  }

  /// All 8 corners.
  pub fn corners(&self) -> [DVec3; 8] {
    std::array::from_fn(|i| self.corner(i))
  }

  /// Copy grown by `margin` on every side.
  #[inline]
  pub fn inflated(&self, margin: f64) -> Aabb {
    Aabb {
      min: self.min - DVec3::splat(margin),
      max: self.max + DVec3::splat(margin),
    }
  }

  #[inline]
  pub fn size(&self) -> DVec3 {
    self.max - self.min
  }

  #[inline]
  pub fn center(&self) -> DVec3 {
    (self.min + self.max) * 0.5
  }
}

impl Default for Aabb {
  fn default() -> Self {
    Self::empty()
  }
}

/// A triangle in world space.
///
/// Normal and area are computed on demand; the type is an immutable value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
  pub points: [DVec3; 3],
}

impl Triangle {
  pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
    Self { points: [a, b, c] }
  }

  /// Unnormalized face normal `(b - a) x (c - a)`.
  #[inline]
  pub fn normal(&self) -> DVec3 {
    let [a, b, c] = self.points;
    (b - a).cross(c - a)
  }

  #[inline]
  pub fn area(&self) -> f64 {
    self.normal().length() * 0.5
  }

  pub fn aabb(&self) -> Aabb {
    Aabb::from_points(&self.points)
  }

  pub fn is_finite(&self) -> bool {
    self.points.iter().all(|p| p.is_finite())
  }
}

/// Axis-aligned rectangle in the XY plane.
///
/// The Z coordinate is supplied separately when marking, so the rectangle is
/// always coplanar with two grid axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
  pub min: DVec2,
  pub max: DVec2,
}

impl Rect {
  /// Create a rect from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on both axes.
  pub fn new(min: DVec2, max: DVec2) -> Self {
    debug_assert!(min.cmple(max).all(), "Rect min must be <= max");
    Self { min, max }
  }

  /// Build a rect from four corners in any order.
  ///
  /// The corners must take exactly two distinct X values and two distinct Y
  /// values, each shared by two corners, or be a degenerate (zero-width)
  /// version of that.
  pub fn from_corners(corners: [DVec2; 4]) -> GridResult<Self> {
    if corners.iter().any(|c| !c.is_finite()) {
      return Err(GridError::NonFiniteCoordinate);
    }

    let mut min = corners[0];
    let mut max = corners[0];
    for c in &corners[1..] {
      min = min.min(*c);
      max = max.max(*c);
    }

    // Every corner must sit on the min or max line of both axes, and each
    // of the four (min|max, min|max) combinations must be present.
    let mut seen = [false; 4];
    for c in &corners {
      let on_x = |v: f64| v == min.x || v == max.x;
      let on_y = |v: f64| v == min.y || v == max.y;
      if !on_x(c.x) || !on_y(c.y) {
        return Err(GridError::NotAxisAligned);
      }
      let slot = (c.x == max.x) as usize | (((c.y == max.y) as usize) << 1);
      seen[slot] = true;
    }
    let degenerate_x = min.x == max.x;
    let degenerate_y = min.y == max.y;
    if !degenerate_x && !degenerate_y && !seen.iter().all(|&s| s) {
      return Err(GridError::NotAxisAligned);
    }

    Ok(Self { min, max })
  }

  /// Reject non-finite or inverted rects.
  pub fn validate(&self) -> GridResult<()> {
    if !self.min.is_finite() || !self.max.is_finite() {
      return Err(GridError::NonFiniteCoordinate);
    }
    if !self.min.cmple(self.max).all() {
      return Err(GridError::InvalidRect {
        min: self.min.to_array(),
        max: self.max.to_array(),
      });
    }
    Ok(())
  }

  /// The four corners lifted to height `z`, counter-clockwise from min.
  pub fn corners_at(&self, z: f64) -> [DVec3; 4] {
    [
      DVec3::new(self.min.x, self.min.y, z),
      DVec3::new(self.max.x, self.min.y, z),
      DVec3::new(self.max.x, self.max.y, z),
      DVec3::new(self.min.x, self.max.y, z),
    ]
  }
}

/// Outcome of a `mark_*` call.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkResult {
  /// Index-space AABB min of the marked geometry.
  pub aabb_min: CellIndex,
  /// Index-space AABB max of the marked geometry.
  pub aabb_max: CellIndex,
  /// Cells committed to the store by this call. Empty for deferred marks.
  pub marked_cells: Vec<CellIndex>,
  /// Queue handle when the mark was deferred.
  pub pending: Option<PendingId>,
}

impl MarkResult {
  /// True when the cells were not computed yet.
  pub fn is_deferred(&self) -> bool {
    self.pending.is_some()
  }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
