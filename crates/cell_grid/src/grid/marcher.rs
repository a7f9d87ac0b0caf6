//! Face-stripe marching: the exact set of cells a triangle touches.
//!
//! # Algorithm Overview
//!
//! The triangle's index AABB is a dense [`CellBlock`]. For each principal
//! axis the block is cut into 1D stripes (the other two axes fixed). A stripe
//! of `n` cells owns `n` faces: the lower wall of every cell, so face `k`
//! sits between cells `k - 1` and `k`, and face `0` borders the outside.
//!
//! ```text
//!   face:   0     1     2     3
//!           │     │     │     │
//!           ▼     ▼     ▼     ▼
//!           ┌─────┬─────┬─────┬─────┐
//!   cell:   │  0  │  1  │  2  │  3  │  ──► axis
//!           └─────┴─────┴─────┴─────┘
//!                       ▲
//!                      mid: walk forward 2,3 then backward 1,0
//! ```
//!
//! Each stripe is walked outward from its midpoint in both directions. A face
//! that intersects the triangle marks its one or two adjacent cells. After the
//! first hit in a direction, the first miss ends that direction: the
//! triangle clipped to the stripe is convex, so the faces it crosses are
//! contiguous along the stripe.
//!
//! Marks from all stripes of all three axes land in one boolean buffer
//! shaped like the block, which is then translated back to absolute indices.
//!
//! Stripes are independent, so large blocks are marched on the rayon pool.

use glam::DVec3;
use rayon::prelude::*;
use smallvec::SmallVec;

use super::block::CellBlock;
use super::index::{cell_center, GeometryBounds};
use crate::config::GridConfig;
use crate::constants::ORTHOGONAL_AXES;
use crate::intersect::triangle_intersection;
use crate::types::{CellIndex, Triangle};

/// Result of marching one triangle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarchOutput {
  /// Touched cells in block order (lexicographic by x, y, z).
  pub cells: Vec<CellIndex>,
  /// Triangle/face intersection tests performed.
  pub face_tests: u64,
  /// True when the single-cell fast path answered.
  pub fast_path: bool,
}

/// One 1D run of cells through the block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Stripe {
  /// Axis the stripe runs along.
  axis: usize,
  /// Offset of the stripe's first cell (component along `axis` is 0).
  origin: [usize; 3],
}

impl Stripe {
  #[inline]
  fn offset(&self, k: usize) -> [usize; 3] {
    let mut offset = self.origin;
    offset[self.axis] = k;
    offset
  }
}

/// Marks produced by one stripe: cell positions along the stripe.
#[derive(Debug)]
struct StripeHits {
  stripe: Stripe,
  cells: SmallVec<[usize; 8]>,
  face_tests: u64,
}

struct StripeMarcher<'a> {
  triangle: &'a [DVec3; 3],
  block: CellBlock,
  cell_size: f64,
  epsilon: f64,
}

impl StripeMarcher<'_> {
  /// All stripes of every axis that has at least two cells.
  fn stripes(&self) -> Vec<Stripe> {
    let dims = self.block.dims;
    let mut stripes = Vec::new();
    for axis in 0..3 {
      // A stripe of length 1 has nothing to march.
      if dims[axis] < 2 {
        continue;
      }
      let [u, v] = ORTHOGONAL_AXES[axis];
      for a in 0..dims[u] {
        for b in 0..dims[v] {
          let mut origin = [0; 3];
          origin[u] = a;
          origin[v] = b;
          stripes.push(Stripe { axis, origin });
        }
      }
    }
    stripes
  }

  /// The two triangles of face `k`: the lower wall of cell `k` in the stripe.
  fn face(&self, stripe: Stripe, k: usize) -> [[DVec3; 3]; 2] {
    let half = self.cell_size * 0.5;
    let axis = stripe.axis;
    let [u, v] = ORTHOGONAL_AXES[axis];

    let center = cell_center(self.block.cell(stripe.offset(k)), self.cell_size);
    let base = center - DVec3::AXES[axis] * half;
    let du = DVec3::AXES[u] * half;
    let dv = DVec3::AXES[v] * half;

    let c00 = base - du - dv;
    let c10 = base + du - dv;
    let c11 = base + du + dv;
    let c01 = base - du + dv;
    [[c00, c10, c11], [c00, c11, c01]]
  }

  fn face_intersects(&self, stripe: Stripe, k: usize) -> bool {
    self
      .face(stripe, k)
      .iter()
      .any(|half| triangle_intersection(self.triangle, half, self.epsilon).is_some())
  }

  /// Walk one direction, stopping at the first miss after a hit.
  fn walk(&self, stripe: Stripe, faces: impl Iterator<Item = usize>, out: &mut StripeHits) {
    let mut hit_seen = false;
    for k in faces {
      out.face_tests += 1;
      if self.face_intersects(stripe, k) {
        out.cells.push(k);
        if k > 0 {
          out.cells.push(k - 1);
        }
        hit_seen = true;
      } else if hit_seen {
        break;
      }
    }
  }

  fn march_stripe(&self, stripe: Stripe) -> StripeHits {
    let n = self.block.dims[stripe.axis];
    let mid = n / 2;
    let mut out = StripeHits {
      stripe,
      cells: SmallVec::new(),
      face_tests: 0,
    };
    self.walk(stripe, mid..n, &mut out);
    self.walk(stripe, (0..mid).rev(), &mut out);
    out
  }
}

/// Cells touched by a triangle whose bounds were computed with the same cell
/// size as `config`.
///
/// Always a subset of the index AABB in `bounds`. The cell of every vertex is
/// included.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "marcher::march_triangle"))]
pub fn march_triangle(triangle: &Triangle, bounds: &GeometryBounds, config: &GridConfig) -> MarchOutput {
  if bounds.is_single_cell() {
    return MarchOutput {
      cells: vec![bounds.cell_min],
      face_tests: 0,
      fast_path: true,
    };
  }

  let block = CellBlock::new(bounds.cell_min, bounds.cell_max);
  let marcher = StripeMarcher {
    triangle: &triangle.points,
    block,
    cell_size: config.cell_size,
    epsilon: config.epsilon,
  };

  let stripes = marcher.stripes();
  let hits: Vec<StripeHits> = if config.marches_in_parallel(block.len()) {
    stripes
      .into_par_iter()
      .map(|stripe| marcher.march_stripe(stripe))
      .collect()
  } else {
    stripes
      .into_iter()
      .map(|stripe| marcher.march_stripe(stripe))
      .collect()
  };

  let mut marks = vec![false; block.len()];
  let mut face_tests = 0;
  for hit in &hits {
    face_tests += hit.face_tests;
    for &k in &hit.cells {
      marks[block.linear(hit.stripe.offset(k))] = true;
    }
  }

  // Vertex cells are touched by definition.
  for cell in &bounds.point_cells {
    let offset = [
      (cell.x - block.min.x) as usize,
      (cell.y - block.min.y) as usize,
      (cell.z - block.min.z) as usize,
    ];
    marks[block.linear(offset)] = true;
  }

  let cells = marks
    .iter()
    .enumerate()
    .filter(|(_, marked)| **marked)
    .map(|(i, _)| block.cell_at(i))
    .collect();

  MarchOutput {
    cells,
    face_tests,
    fast_path: false,
  }
}

#[cfg(test)]
#[path = "marcher_test.rs"]
mod marcher_test;
