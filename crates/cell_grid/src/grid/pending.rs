//! Pending queue: triangles whose cell marking is deferred.
//!
//! Following the Enqueue → Take → Materialize pattern:
//! - `push` stores the key, bounds and a copy of the triangle
//! - a query takes every item that can mark a cell inside its region
//! - `materialize` runs the marcher on the taken items (in parallel)
//!
//! Each item leaves the queue exactly once.

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::index::GeometryBounds;
use super::marcher::{march_triangle, MarchOutput};
use super::store::LayerKey;
use crate::config::GridConfig;
use crate::token::PendingId;
use crate::types::{Aabb, Triangle};

/// A registered triangle waiting to be marched.
#[derive(Clone, Debug)]
pub struct PendingTriangle {
  pub id: PendingId,
  pub key: LayerKey,
  pub bounds: GeometryBounds,
  pub triangle: Triangle,
}

/// A pending triangle together with its marched cells.
pub struct Materialized {
  pub pending: PendingTriangle,
  pub output: MarchOutput,
}

/// Deferred triangles ordered by registration.
#[derive(Debug, Default)]
pub struct PendingQueue {
  items: BTreeMap<PendingId, PendingTriangle>,
}

impl PendingQueue {
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a triangle, returning its handle.
  pub fn push(&mut self, key: LayerKey, triangle: Triangle, bounds: GeometryBounds) -> PendingId {
    let id = PendingId::next();
    self.items.insert(
      id,
      PendingTriangle {
        id,
        key,
        bounds,
        triangle,
      },
    );
    id
  }

  pub fn len(&self) -> usize {
    self.items.len()
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn contains(&self, id: PendingId) -> bool {
    self.items.contains_key(&id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &PendingTriangle> {
    self.items.values()
  }

  /// Remove and return every item matching `pred`, oldest first.
  pub fn take_where(&mut self, mut pred: impl FnMut(&PendingTriangle) -> bool) -> Vec<PendingTriangle> {
    let ids: Vec<PendingId> = self
      .items
      .values()
      .filter(|item| pred(item))
      .map(|item| item.id)
      .collect();
    ids
      .into_iter()
      .filter_map(|id| self.items.remove(&id))
      .collect()
  }

  /// Items that can mark a cell inside `region`.
  ///
  /// An item qualifies when its float AABB, grown by the marcher's touching
  /// tolerance, overlaps `region`. Callers pass the float extent of the cells
  /// they are about to read, so nothing that would land there stays pending.
  pub fn take_reaching(&mut self, region: &Aabb, config: &GridConfig) -> Vec<PendingTriangle> {
    self.take_where(|item| {
      let aabb = &item.bounds.aabb;
      let tolerance = config.epsilon * aabb.size().max_element().max(config.cell_size);
      aabb.inflated(tolerance).overlaps(region)
    })
  }

  /// Drain the whole queue, oldest first.
  pub fn take_all(&mut self) -> Vec<PendingTriangle> {
    std::mem::take(&mut self.items).into_values().collect()
  }
}

/// March taken items. Output order matches input order.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, name = "pending::materialize"))]
pub fn materialize(items: Vec<PendingTriangle>, config: &GridConfig) -> Vec<Materialized> {
  let march = |pending: PendingTriangle| {
    let output = march_triangle(&pending.triangle, &pending.bounds, config);
    Materialized { pending, output }
  };

  if config.parallel_threshold != 0 && items.len() > 1 {
    items.into_par_iter().map(march).collect()
  } else {
    items.into_iter().map(march).collect()
  }
}

#[cfg(test)]
#[path = "pending_test.rs"]
mod pending_test;
