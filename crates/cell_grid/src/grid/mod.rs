//! SpatialGrid - sparse uniform grid of marked cells.
//!
//! Geometry is marked into named layers, then looked up by sphere or box.
//!
//! ```text
//!   mark_point ─┐
//!   mark_rect ──┼──────────────────────────► MarkedStore ──► query_* / flush_all
//!   mark_triangle ─┬─ now ──► march ────────►     ▲
//!                  └─ later ─► PendingQueue ──────┘
//!                                 (taken by the cells a query reads, or flush_all)
//! ```
//!
//! Deferred triangles stay invisible until a query reads a cell they could
//! mark, or `flush_all` drains the queue. They are then marched and merged
//! under the layer they were registered with, so a query answers the same
//! whether its triangles were marked now or later.
//!
//! # Threading
//!
//! A grid is owned by one writer. Marching fans out on rayon internally, but
//! `&mut self` methods need external synchronization to be shared.

pub mod block;
pub mod index;
pub mod marcher;
pub mod pending;
pub mod store;

use glam::DVec3;
use web_time::Instant;

pub use block::{CellBlock, CellSlice};
pub use index::{
  cell_bounds, cell_center, cell_range_bounds, ensure_indexable, index_of, index_of_point, GeometryBounds,
};
pub use marcher::{march_triangle, MarchOutput};
pub use pending::{materialize, Materialized, PendingQueue, PendingTriangle};
pub use store::{KeyFilter, LayerKey, MarkedStore};

use crate::config::GridConfig;
use crate::error::{GridError, GridResult};
use crate::metrics::GridMetrics;
use crate::token::GridId;
use crate::types::{Aabb, CellIndex, MarkResult, Rect, Triangle};

fn ensure_finite(points: &[DVec3]) -> GridResult<()> {
  if points.iter().all(|p| p.is_finite()) {
    Ok(())
  } else {
    Err(GridError::NonFiniteCoordinate)
  }
}

/// Bounds of a primitive that is about to be marched or enumerated.
fn block_bounds(points: &[DVec3], config: &GridConfig) -> GridResult<GeometryBounds> {
  ensure_finite(points)?;
  ensure_indexable(points, config.cell_size)?;
  let bounds = GeometryBounds::from_points(points, config.cell_size);
  let cells = bounds.checked_cell_count().unwrap_or(usize::MAX);
  if cells > config.max_block_cells {
    return Err(GridError::BlockTooLarge {
      cells,
      limit: config.max_block_cells,
    });
  }
  Ok(bounds)
}

fn elapsed_us(start: Instant) -> u64 {
  start.elapsed().as_micros() as u64
}

// =============================================================================
// SpatialGrid
// =============================================================================

/// Layered marked-cell store with deferred triangle marking.
#[derive(Debug)]
pub struct SpatialGrid {
  id: GridId,
  config: GridConfig,
  store: MarkedStore,
  pending: PendingQueue,
  metrics: GridMetrics,
}

impl SpatialGrid {
  /// Create a grid, rejecting an invalid config.
  pub fn new(config: GridConfig) -> GridResult<Self> {
    config.validate()?;
    Ok(Self {
      id: GridId::new(),
      config,
      store: MarkedStore::new(),
      pending: PendingQueue::new(),
      metrics: GridMetrics::new(),
    })
  }

  /// Create a grid with default tunables and the given cell size.
  pub fn with_cell_size(cell_size: f64) -> GridResult<Self> {
    Self::new(GridConfig::default().with_cell_size(cell_size))
  }

  pub fn id(&self) -> GridId {
    self.id
  }

  pub fn config(&self) -> &GridConfig {
    &self.config
  }

  pub fn metrics(&self) -> &GridMetrics {
    &self.metrics
  }

  // ---------------------------------------------------------------------------
  // Cell geometry
  // ---------------------------------------------------------------------------

  /// Cell containing `point`.
  #[inline]
  pub fn index_of(&self, point: DVec3) -> CellIndex {
    index_of_point(point, self.config.cell_size)
  }

  #[inline]
  pub fn cell_center(&self, index: CellIndex) -> DVec3 {
    cell_center(index, self.config.cell_size)
  }

  #[inline]
  pub fn cell_bounds(&self, index: CellIndex) -> Aabb {
    cell_bounds(index, self.config.cell_size)
  }

  /// Cells the triangle surface touches, sorted. Marks nothing.
  pub fn cells_touching(&self, triangle: &Triangle) -> GridResult<Vec<CellIndex>> {
    let bounds = block_bounds(&triangle.points, &self.config)?;
    Ok(march_triangle(triangle, &bounds, &self.config).cells)
  }

  /// Every cell of the rect's index range in the single Z layer of `z`.
  pub fn cells_touching_rect(&self, rect: &Rect, z: f64) -> GridResult<CellSlice> {
    rect.validate()?;
    if !z.is_finite() {
      return Err(GridError::NonFiniteCoordinate);
    }
    let bounds = block_bounds(&rect.corners_at(z), &self.config)?;
    Ok(CellSlice::from_block(&CellBlock::new(bounds.cell_min, bounds.cell_max)))
  }

  // ---------------------------------------------------------------------------
  // Marking
  // ---------------------------------------------------------------------------

  /// Mark the cell containing `point`.
  pub fn mark_point(&mut self, point: DVec3, key: impl Into<LayerKey>) -> GridResult<MarkResult> {
    ensure_finite(&[point])?;
    ensure_indexable(&[point], self.config.cell_size)?;
    let key = key.into();
    let cell = self.index_of(point);
    self.store.insert(&key, cell);
    self.metrics.record_point();

    Ok(MarkResult {
      aabb_min: cell,
      aabb_max: cell,
      marked_cells: vec![cell],
      pending: None,
    })
  }

  /// Mark the cells a triangle touches, now or on first relevant query.
  ///
  /// A deferred mark returns no cells and a pending handle. Marching it later
  /// yields the same cells an immediate mark would.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "grid::mark_triangle"))]
  pub fn mark_triangle(
    &mut self,
    triangle: &Triangle,
    key: impl Into<LayerKey>,
    materialize_now: bool,
  ) -> GridResult<MarkResult> {
    let bounds = block_bounds(&triangle.points, &self.config)?;
    let key = key.into();
    let (aabb_min, aabb_max) = (bounds.cell_min, bounds.cell_max);

    if !materialize_now {
      let id = self.pending.push(key, *triangle, bounds);
      return Ok(MarkResult {
        aabb_min,
        aabb_max,
        marked_cells: Vec::new(),
        pending: Some(id),
      });
    }

    let start = Instant::now();
    let output = march_triangle(triangle, &bounds, &self.config);
    self
      .metrics
      .record_march(output.face_tests, output.fast_path, elapsed_us(start));
    self.store.extend(&key, &output.cells);

    Ok(MarkResult {
      aabb_min,
      aabb_max,
      marked_cells: output.cells,
      pending: None,
    })
  }

  /// Mark every cell of an axis-aligned rect at height `z`.
  pub fn mark_rect(&mut self, rect: &Rect, z: f64, key: impl Into<LayerKey>) -> GridResult<MarkResult> {
    let slice = self.cells_touching_rect(rect, z)?;
    let key = key.into();
    self.store.extend(&key, slice.iter());
    self.metrics.record_rect();

    let cells = slice.into_vec();
    let aabb_min = cells.first().copied().unwrap_or_default();
    let aabb_max = cells.last().copied().unwrap_or_default();
    Ok(MarkResult {
      aabb_min,
      aabb_max,
      marked_cells: cells,
      pending: None,
    })
  }

  // ---------------------------------------------------------------------------
  // Queries
  // ---------------------------------------------------------------------------

  /// Marked cells inside the sphere's index AABB.
  ///
  /// With `exact`, a cell is kept only if its center lies within `radius` of
  /// `center`. Otherwise the index AABB alone decides, which over-reports
  /// cells near the box corners.
  ///
  /// Pending triangles that could mark any cell of the index AABB are
  /// materialized first. That covers every triangle whose AABB meets the
  /// sphere's AABB.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "grid::query_sphere"))]
  pub fn query_sphere(
    &mut self,
    center: DVec3,
    radius: f64,
    exact: bool,
    filter: &KeyFilter,
  ) -> GridResult<Vec<CellIndex>> {
    ensure_finite(&[center])?;
    if !radius.is_finite() || radius < 0.0 {
      return Err(GridError::InvalidRadius(radius));
    }

    let size = self.config.cell_size;
    let lo = index_of_point(center - DVec3::splat(radius), size);
    let hi = index_of_point(center + DVec3::splat(radius), size);

    let taken = self
      .pending
      .take_reaching(&cell_range_bounds(lo, hi, size), &self.config);
    self.absorb(taken);
    self.metrics.record_query();

    let radius_sq = radius * radius;

    Ok(self.store.collect_filtered(filter, |cell| {
      cell.within(&lo, &hi) && (!exact || cell_center(*cell, size).distance_squared(center) <= radius_sq)
    }))
  }

  /// Marked cells inside the index AABB of the box spanned by `a` and `b`.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "grid::query_aabb"))]
  pub fn query_aabb(&mut self, a: DVec3, b: DVec3, filter: &KeyFilter) -> GridResult<Vec<CellIndex>> {
    ensure_finite(&[a, b])?;
    let size = self.config.cell_size;
    let bounds = GeometryBounds::from_points(&[a.min(b), a.max(b)], size);

    let taken = self.pending.take_reaching(
      &cell_range_bounds(bounds.cell_min, bounds.cell_max, size),
      &self.config,
    );
    self.absorb(taken);
    self.metrics.record_query();

    Ok(
      self
        .store
        .collect_filtered(filter, |cell| bounds.contains_cell(cell)),
    )
  }

  /// Materialize every pending triangle, then return all admitted cells.
  #[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "grid::flush_all"))]
  pub fn flush_all(&mut self, filter: &KeyFilter) -> Vec<CellIndex> {
    let taken = self.pending.take_all();
    self.absorb(taken);
    self.store.collect_filtered(filter, |_| true)
  }

  /// March taken pending triangles and merge them under their own keys.
  fn absorb(&mut self, taken: Vec<PendingTriangle>) {
    if taken.is_empty() {
      return;
    }
    let count = taken.len();
    let start = Instant::now();
    let done = materialize(taken, &self.config);
    let per_item_us = elapsed_us(start) / count as u64;

    for Materialized { pending, output } in &done {
      self.store.extend(&pending.key, &output.cells);
      self
        .metrics
        .record_march(output.face_tests, output.fast_path, per_item_us);
    }
    self.metrics.record_materialized(count);

    #[cfg(feature = "tracing")]
    {
      let cells: usize = done.iter().map(|m| m.output.cells.len()).sum();
      tracing::debug!(
        triangles = count,
        cells,
        remaining = self.pending.len(),
        "materialized pending triangles"
      );
    }
  }

  // ---------------------------------------------------------------------------
  // Inspection
  // ---------------------------------------------------------------------------

  /// True when `index` is committed under `key`. Pending marks do not count.
  pub fn is_marked(&self, index: CellIndex, key: impl Into<LayerKey>) -> bool {
    self.store.contains(&key.into(), &index)
  }

  /// Committed cell count of one layer.
  pub fn marked_count(&self, key: impl Into<LayerKey>) -> usize {
    self.store.len(&key.into())
  }

  /// Layers written to so far, in no particular order.
  pub fn keys(&self) -> impl Iterator<Item = &LayerKey> {
    self.store.keys()
  }

  pub fn pending_count(&self) -> usize {
    self.pending.len()
  }
}
