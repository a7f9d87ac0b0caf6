use glam::{DVec2, DVec3, IVec3};

use super::*;

// CellIndex tests
#[test]
fn test_cell_index_ordering_is_xyz_lexicographic() {
  let mut cells = vec![
    CellIndex::new(1, 0, 0),
    CellIndex::new(0, 1, 0),
    CellIndex::new(0, 0, 1),
    CellIndex::new(0, 0, 0),
  ];
  cells.sort();
  assert_eq!(
    cells,
    vec![
      CellIndex::new(0, 0, 0),
      CellIndex::new(0, 0, 1),
      CellIndex::new(0, 1, 0),
      CellIndex::new(1, 0, 0),
    ]
  );
}

#[test]
fn test_cell_index_axis_access() {
  let c = CellIndex::new(3, -4, 5);
  assert_eq!(c.axis(0), 3);
  assert_eq!(c.axis(1), -4);
  assert_eq!(c.axis(2), 5);
  assert_eq!(c.with_axis(1, 7), CellIndex::new(3, 7, 5));
}

#[test]
fn test_cell_index_ivec3_conversion() {
  let c: CellIndex = IVec3::new(1, 2, 3).into();
  assert_eq!(c, CellIndex::new(1, 2, 3));
  assert_eq!(IVec3::from(c), IVec3::new(1, 2, 3));
}

#[test]
fn test_cell_index_within() {
  let min = CellIndex::new(-1, -1, -1);
  let max = CellIndex::new(1, 1, 1);
  assert!(CellIndex::ZERO.within(&min, &max));
  assert!(max.within(&min, &max));
  assert!(!CellIndex::new(2, 0, 0).within(&min, &max));
}

// Aabb tests
#[test]
fn test_aabb_encapsulate() {
  let mut aabb = Aabb::empty();
  assert!(!aabb.is_valid());
  aabb.encapsulate(DVec3::new(1.0, 2.0, 3.0));
  aabb.encapsulate(DVec3::new(-1.0, -2.0, -3.0));

  assert_eq!(aabb.min, DVec3::new(-1.0, -2.0, -3.0));
  assert_eq!(aabb.max, DVec3::new(1.0, 2.0, 3.0));
  assert!(aabb.is_valid());
}

#[test]
fn test_aabb_overlaps_touching() {
  // Touching at boundary counts as overlapping
  let a = Aabb::new(DVec3::ZERO, DVec3::splat(10.0));
  let b = Aabb::new(DVec3::splat(10.0), DVec3::splat(20.0));
  let c = Aabb::new(DVec3::splat(11.0), DVec3::splat(20.0));
  assert!(a.overlaps(&b));
  assert!(b.overlaps(&a));
  assert!(!a.overlaps(&c));
}

#[test]
fn test_aabb_corners() {
  let aabb = Aabb::new(DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0));
  let corners = aabb.corners();
  assert_eq!(corners[0], DVec3::ZERO);
  assert_eq!(corners[1], DVec3::new(1.0, 0.0, 0.0));
  assert_eq!(corners[6], DVec3::new(0.0, 2.0, 3.0));
  assert_eq!(corners[7], DVec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_aabb_center_and_size() {
  let aabb = Aabb::from_center_half_extents(DVec3::new(1.0, 1.0, 1.0), DVec3::splat(2.0));
  assert_eq!(aabb.center(), DVec3::splat(1.0));
  assert_eq!(aabb.size(), DVec3::splat(4.0));
  assert!(aabb.contains_point(DVec3::splat(3.0)));
  assert!(!aabb.contains_point(DVec3::splat(3.1)));
}

// Triangle tests
#[test]
fn test_triangle_normal_and_area() {
  let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::Y);
  assert_eq!(tri.normal(), DVec3::Z);
  assert!((tri.area() - 0.5).abs() < 1e-12);
  assert_eq!(tri.aabb().max, DVec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_triangle_finite() {
  let tri = Triangle::new(DVec3::ZERO, DVec3::X, DVec3::new(f64::NAN, 0.0, 0.0));
  assert!(!tri.is_finite());
}

// Rect tests
#[test]
fn test_rect_from_corners_any_order() {
  let rect = Rect::from_corners([
    DVec2::new(2.0, 3.0),
    DVec2::new(0.0, 1.0),
    DVec2::new(0.0, 3.0),
    DVec2::new(2.0, 1.0),
  ])
  .unwrap();
  assert_eq!(rect.min, DVec2::new(0.0, 1.0));
  assert_eq!(rect.max, DVec2::new(2.0, 3.0));
}

#[test]
fn test_rect_from_rotated_corners_is_rejected() {
  let result = Rect::from_corners([
    DVec2::new(0.0, 1.0),
    DVec2::new(1.0, 0.0),
    DVec2::new(2.0, 1.0),
    DVec2::new(1.0, 2.0),
  ]);
  assert_eq!(result, Err(GridError::NotAxisAligned));
}

#[test]
fn test_rect_missing_corner_is_rejected() {
  let result = Rect::from_corners([
    DVec2::new(0.0, 0.0),
    DVec2::new(1.0, 0.0),
    DVec2::new(1.0, 1.0),
    DVec2::new(1.0, 1.0),
  ]);
  assert_eq!(result, Err(GridError::NotAxisAligned));
}

#[test]
fn test_rect_degenerate_line_is_accepted() {
  let rect = Rect::from_corners([
    DVec2::new(0.0, 0.0),
    DVec2::new(0.0, 2.0),
    DVec2::new(0.0, 0.0),
    DVec2::new(0.0, 2.0),
  ])
  .unwrap();
  assert_eq!(rect.min.x, rect.max.x);
}

#[test]
fn test_rect_validate() {
  let inverted = Rect {
    min: DVec2::new(1.0, 0.0),
    max: DVec2::new(0.0, 1.0),
  };
  assert!(matches!(
    inverted.validate(),
    Err(GridError::InvalidRect { .. })
  ));

  let nan = Rect {
    min: DVec2::new(f64::NAN, 0.0),
    max: DVec2::new(1.0, 1.0),
  };
  assert_eq!(nan.validate(), Err(GridError::NonFiniteCoordinate));
}

#[test]
fn test_rect_corners_at() {
  let rect = Rect::new(DVec2::ZERO, DVec2::new(1.0, 2.0));
  let corners = rect.corners_at(5.0);
  assert!(corners.iter().all(|c| c.z == 5.0));
  assert_eq!(corners[2], DVec3::new(1.0, 2.0, 5.0));
}
