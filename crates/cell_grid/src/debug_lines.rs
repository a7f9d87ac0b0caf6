//! Wireframe extraction for visualizing marked cells.
//!
//! Every cell contributes its 12 edges. Edges live on the half-cell lattice
//! (`2 * index ± 1`), so shared edges of neighbouring cells compare exactly
//! and are kept once. Collinear unit edges are then merged into maximal runs:
//!
//! ```text
//!   ┌───┬───┐        ┌───────┐
//!   │   │   │   ──►  │   │   │     4 X-edges of length 1 become 2 of length 2
//!   └───┴───┘        └───────┘
//! ```

use std::collections::{BTreeMap, HashSet};

use glam::DVec3;

use crate::constants::ORTHOGONAL_AXES;
use crate::types::CellIndex;

/// One wireframe segment in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
  pub start: DVec3,
  pub end: DVec3,
}

impl LineSegment {
  pub fn length(&self) -> f64 {
    self.start.distance(self.end)
  }
}

/// A unit cell edge on the half-cell lattice.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
struct LatticeEdge {
  axis: usize,
  /// Lattice coordinates on the two other axes, in `ORTHOGONAL_AXES` order.
  fixed: [i64; 2],
  /// Lattice coordinate of the lower end along `axis`.
  start: i64,
}

fn lattice(index: CellIndex) -> [i64; 3] {
  [2 * index.x as i64, 2 * index.y as i64, 2 * index.z as i64]
}

/// Deduplicated, merged wireframe of `cells`.
///
/// Output is ordered by axis, then by the line's fixed coordinates, then
/// along the line.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "debug_lines"))]
pub fn debug_lines(cells: &[CellIndex], cell_size: f64) -> Vec<LineSegment> {
  let mut edges: HashSet<LatticeEdge> = HashSet::with_capacity(cells.len() * 12);
  for &cell in cells {
    let center = lattice(cell);
    for (axis, [u, v]) in ORTHOGONAL_AXES.iter().copied().enumerate() {
      for du in [-1, 1] {
        for dv in [-1, 1] {
          edges.insert(LatticeEdge {
            axis,
            fixed: [center[u] + du, center[v] + dv],
            start: center[axis] - 1,
          });
        }
      }
    }
  }

  let mut lines: BTreeMap<(usize, [i64; 2]), Vec<i64>> = BTreeMap::new();
  for edge in edges {
    lines.entry((edge.axis, edge.fixed)).or_default().push(edge.start);
  }

  let half = cell_size * 0.5;
  let point = |axis: usize, fixed: [i64; 2], along: i64| {
    let [u, v] = ORTHOGONAL_AXES[axis];
    let mut p = [0.0; 3];
    p[axis] = along as f64 * half;
    p[u] = fixed[0] as f64 * half;
    p[v] = fixed[1] as f64 * half;
    DVec3::from(p)
  };

  let mut segments = Vec::new();
  for ((axis, fixed), mut starts) in lines {
    starts.sort_unstable();
    let mut run_start = starts[0];
    let mut run_end = starts[0] + 2;
    for &s in &starts[1..] {
      if s == run_end {
        run_end += 2;
      } else {
        segments.push(LineSegment {
          start: point(axis, fixed, run_start),
          end: point(axis, fixed, run_end),
        });
        run_start = s;
        run_end = s + 2;
      }
    }
    segments.push(LineSegment {
      start: point(axis, fixed, run_start),
      end: point(axis, fixed, run_end),
    });
  }
  segments
}
