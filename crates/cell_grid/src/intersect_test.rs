use glam::DVec3;

use super::*;
use crate::constants::EPSILON;

fn tri(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> [DVec3; 3] {
  [DVec3::from(a), DVec3::from(b), DVec3::from(c)]
}

// =========================================================================
// Triangle / triangle
// =========================================================================

#[test]
fn test_crossing_triangles_intersect() {
  // Horizontal triangle pierced by a vertical one
  let a = tri([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
  let b = tri([0.0, 0.0, -1.0], [0.0, 0.0, 1.0], [0.0, 0.5, 0.0]);
  let contact = triangle_intersection(&a, &b, EPSILON).expect("should intersect");
  assert!(contact.depth >= 0.0);
  assert!((contact.axis.length() - 1.0).abs() < 1e-9);
}

#[test]
fn test_parallel_planes_do_not_intersect() {
  let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
  let b = tri([0.0, 0.0, 0.5], [1.0, 0.0, 0.5], [0.0, 1.0, 0.5]);
  assert!(triangle_intersection(&a, &b, EPSILON).is_none());
}

#[test]
fn test_far_apart_rejected_by_bounds() {
  let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
  let b = tri([5.0, 5.0, 5.0], [6.0, 5.0, 5.0], [5.0, 6.0, 5.0]);
  assert!(triangle_intersection(&a, &b, EPSILON).is_none());
}

/// Coplanar triangles whose bounding boxes overlap but shapes do not.
#[test]
fn test_coplanar_separated_by_in_plane_axis() {
  let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
  let b = tri([1.0, 1.0, 0.0], [0.6, 1.0, 0.0], [1.0, 0.6, 0.0]);
  assert!(triangle_intersection(&a, &b, EPSILON).is_none());
}

#[test]
fn test_coplanar_overlapping() {
  let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
  let b = tri([0.1, 0.1, 0.0], [0.3, 0.1, 0.0], [0.1, 0.3, 0.0]);
  assert!(triangle_intersection(&a, &b, EPSILON).is_some());
}

#[test]
fn test_touching_at_vertex_counts() {
  let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
  let b = tri([1.0, 0.0, 0.0], [2.0, 0.0, 1.0], [2.0, 1.0, 0.0]);
  let contact = triangle_intersection(&a, &b, EPSILON).expect("touching should count");
  assert_eq!(contact.depth, 0.0);
}

#[test]
fn test_near_miss_rejected() {
  // Vertical triangle that stops just short of the horizontal one
  let a = tri([-1.0, -1.0, 0.0], [1.0, -1.0, 0.0], [0.0, 1.0, 0.0]);
  let b = tri([0.0, 0.0, 0.01], [0.0, 0.0, 1.0], [0.0, 0.5, 1.0]);
  assert!(triangle_intersection(&a, &b, EPSILON).is_none());
}

#[test]
fn test_symmetry() {
  let a = tri([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
  let b = tri([0.5, 0.5, -1.0], [0.5, 0.5, 1.0], [1.5, 0.5, 0.0]);
  assert_eq!(
    triangle_intersection(&a, &b, EPSILON).is_some(),
    triangle_intersection(&b, &a, EPSILON).is_some()
  );
}

/// Tiny triangles must not lose their separating axes.
#[test]
fn test_answer_independent_of_scale() {
  let a = tri([0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
  let apart = tri([0.0, 0.0, 0.01], [0.0, 0.0, 1.0], [0.0, 0.5, 1.0]);
  let crossing = tri([0.2, 0.2, -1.0], [0.2, 0.2, 1.0], [0.3, 0.2, 0.0]);
  let coplanar = tri([1.0, 1.0, 0.0], [0.6, 1.0, 0.0], [1.0, 0.6, 0.0]);

  for scale in [1e3, 1.0, 1e-4, 1e-7, 1e-10] {
    let s = |t: [DVec3; 3]| t.map(|p| p * scale);
    assert!(
      triangle_intersection(&s(a), &s(apart), EPSILON).is_none(),
      "scale {scale}"
    );
    assert!(
      triangle_intersection(&s(a), &s(crossing), EPSILON).is_some(),
      "scale {scale}"
    );
    assert!(
      triangle_intersection(&s(a), &s(coplanar), EPSILON).is_none(),
      "scale {scale}"
    );
  }
}

// =========================================================================
// AABB / sphere
// =========================================================================

#[test]
fn test_sphere_inside_box() {
  let aabb = Aabb::new(DVec3::splat(-1.0), DVec3::splat(1.0));
  assert!(aabb_intersects_sphere(&aabb, DVec3::ZERO, 0.1));
}

#[test]
fn test_sphere_near_corner() {
  let aabb = Aabb::new(DVec3::ZERO, DVec3::splat(1.0));
  let center = DVec3::splat(2.0);
  // Distance to corner (1,1,1) is sqrt(3)
  assert!(!aabb_intersects_sphere(&aabb, center, 1.7));
  assert!(aabb_intersects_sphere(&aabb, center, 1.74));
}

#[test]
fn test_sphere_touching_face() {
  let aabb = Aabb::new(DVec3::ZERO, DVec3::splat(1.0));
  assert!(aabb_intersects_sphere(&aabb, DVec3::new(2.0, 0.5, 0.5), 1.0));
  assert!(!aabb_intersects_sphere(&aabb, DVec3::new(2.0, 0.5, 0.5), 0.99));
}
