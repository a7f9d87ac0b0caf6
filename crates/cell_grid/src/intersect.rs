//! Geometric predicates the grid relies on.
//!
//! - [`triangle_intersection`]: separating axis test between two triangles
//! - [`aabb_intersects_sphere`]: closest-point test between a box and a sphere
//!
//! Box/box overlap lives on [`Aabb::overlaps`].

use glam::DVec3;

use crate::types::Aabb;

/// Contact between two intersecting triangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriangleContact {
  /// Unit axis of minimum overlap.
  pub axis: DVec3,
  /// Overlap along `axis`. Zero for touching triangles.
  pub depth: f64,
}

/// Test two triangles for intersection using the Separating Axis Theorem.
///
/// Tests up to 17 candidate axes:
/// - 2 face normals
/// - 9 edge cross products (3 edges from each triangle)
/// - 6 in-plane edge normals, which separate coplanar triangles
///
/// `epsilon` is relative: axes are dropped when their length is below
/// `epsilon` times the lengths of the vectors that produced them, and the
/// touching tolerance is `epsilon` times the larger triangle extent. The
/// answer is therefore the same at any uniform scale. Dropped axes
/// (parallel edges, degenerate triangles) can only err on the side of
/// reporting contact.
#[must_use]
pub fn triangle_intersection(
  tri_a: &[DVec3; 3],
  tri_b: &[DVec3; 3],
  epsilon: f64,
) -> Option<TriangleContact> {
  let bounds_a = Aabb::from_points(tri_a);
  let bounds_b = Aabb::from_points(tri_b);
  let extent = bounds_a.size().max_element().max(bounds_b.size().max_element());
  let tolerance = epsilon * extent;
  if !bounds_a.inflated(tolerance).overlaps(&bounds_b) {
    return None;
  }

  let edges_a = [tri_a[1] - tri_a[0], tri_a[2] - tri_a[1], tri_a[0] - tri_a[2]];
  let edges_b = [tri_b[1] - tri_b[0], tri_b[2] - tri_b[1], tri_b[0] - tri_b[2]];
  let lens_a = edges_a.map(DVec3::length);
  let lens_b = edges_b.map(DVec3::length);
  let normal_a = edges_a[0].cross(edges_a[1]);
  let normal_b = edges_b[0].cross(edges_b[1]);
  let normal_a_len = normal_a.length();
  let normal_b_len = normal_b.length();

  let mut best = TriangleContact {
    axis: DVec3::ZERO,
    depth: f64::INFINITY,
  };

  // (axis, product of the input lengths it was crossed from)
  let mut axes = [(DVec3::ZERO, 0.0); 17];
  axes[0] = (normal_a, lens_a[0] * lens_a[1]);
  axes[1] = (normal_b, lens_b[0] * lens_b[1]);
  for (i, ea) in edges_a.iter().enumerate() {
    for (j, eb) in edges_b.iter().enumerate() {
      axes[2 + i * 3 + j] = (ea.cross(*eb), lens_a[i] * lens_b[j]);
    }
    axes[11 + i] = (normal_a.cross(*ea), normal_a_len * lens_a[i]);
    axes[14 + i] = (normal_b.cross(edges_b[i]), normal_b_len * lens_b[i]);
  }

  for (axis, scale) in axes {
    let len = axis.length();
    if len == 0.0 || len < epsilon * scale {
      continue;
    }
    let axis = axis / len;
    let (min_a, max_a) = project(tri_a, axis);
    let (min_b, max_b) = project(tri_b, axis);
    let overlap = (max_a - min_b).min(max_b - min_a);
    if overlap < -tolerance {
      return None;
    }
    if overlap < best.depth {
      best.depth = overlap.max(0.0);
      best.axis = axis;
    }
  }

  if best.depth.is_infinite() {
    best.depth = 0.0;
  }
  Some(best)
}

/// Project a triangle onto a unit axis.
#[inline]
fn project(tri: &[DVec3; 3], axis: DVec3) -> (f64, f64) {
  let d0 = tri[0].dot(axis);
  let d1 = tri[1].dot(axis);
  let d2 = tri[2].dot(axis);
  (d0.min(d1).min(d2), d0.max(d1).max(d2))
}

/// Check if a sphere touches a box, boundaries included.
#[inline]
pub fn aabb_intersects_sphere(aabb: &Aabb, center: DVec3, radius: f64) -> bool {
  let closest = center.clamp(aabb.min, aabb.max);
  closest.distance_squared(center) <= radius * radius
}

#[cfg(test)]
#[path = "intersect_test.rs"]
mod intersect_test;
