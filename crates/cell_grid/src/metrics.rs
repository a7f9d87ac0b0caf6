//! Marking and query statistics.
//!
//! Feature-gated and runtime-toggled to ensure zero overhead when disabled.
//!
//! # Usage
//!
//! ```ignore
//! use cell_grid::metrics::COLLECT_METRICS;
//!
//! // Compile with --features metrics
//! // Runtime toggle:
//! COLLECT_METRICS.store(false, Ordering::Relaxed);
//!
//! // Read after marking:
//! let m = grid.metrics();
//! println!("{} face tests, avg {:.1}us", m.face_tests, m.avg_march_timing_us());
//! ```

use std::collections::VecDeque;
#[cfg(feature = "metrics")]
use std::sync::atomic::Ordering;
use std::sync::atomic::AtomicBool;

use crate::constants::TIMING_WINDOW;

/// Runtime toggle for metrics collection.
/// Set to false to disable metrics gathering at runtime.
pub static COLLECT_METRICS: AtomicBool = AtomicBool::new(true);

/// Check if metrics collection is enabled (both compile-time and runtime).
#[inline]
pub fn is_enabled() -> bool {
  #[cfg(feature = "metrics")]
  {
    COLLECT_METRICS.load(Ordering::Relaxed)
  }
  #[cfg(not(feature = "metrics"))]
  {
    false
  }
}

/// Rolling window for storing recent values (e.g., timing history).
#[derive(Debug, Clone)]
pub struct RollingWindow<T> {
  buffer: VecDeque<T>,
  capacity: usize,
}

impl<T> RollingWindow<T> {
  pub fn new(capacity: usize) -> Self {
    Self {
      buffer: VecDeque::with_capacity(capacity),
      capacity,
    }
  }

  /// Push a new value, evicting the oldest if at capacity.
  pub fn push(&mut self, value: T) {
    if self.buffer.len() >= self.capacity {
      self.buffer.pop_front();
    }
    self.buffer.push_back(value);
  }

  pub fn len(&self) -> usize {
    self.buffer.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffer.is_empty()
  }

  pub fn clear(&mut self) {
    self.buffer.clear();
  }

  /// Iterate over values (oldest to newest).
  pub fn iter(&self) -> impl Iterator<Item = &T> {
    self.buffer.iter()
  }

  pub fn last(&self) -> Option<&T> {
    self.buffer.back()
  }
}

impl RollingWindow<u64> {
  pub fn sum(&self) -> u64 {
    self.buffer.iter().sum()
  }

  pub fn average(&self) -> f64 {
    if self.buffer.is_empty() {
      0.0
    } else {
      self.sum() as f64 / self.buffer.len() as f64
    }
  }

  pub fn min_max(&self) -> Option<(u64, u64)> {
    let min = self.buffer.iter().min()?;
    let max = self.buffer.iter().max()?;
    Some((*min, *max))
  }
}

impl Default for RollingWindow<u64> {
  fn default() -> Self {
    Self::new(TIMING_WINDOW)
  }
}

/// Grid-level counters, cumulative over the grid's lifetime.
#[derive(Debug, Clone, Default)]
pub struct GridMetrics {
  // Marching
  /// Triangle/face intersection tests performed.
  pub face_tests: u64,
  /// Triangles answered by the single-cell fast path.
  pub fast_path_hits: u64,
  /// Triangles run through the marcher (fast path included).
  pub triangles_marched: u64,
  /// Deferred triangles materialized by queries or flushes.
  pub pending_materialized: u64,

  // Marking
  pub points_marked: u64,
  pub rects_marked: u64,

  // Queries
  pub queries: u64,

  // Timing
  /// Rolling window of per-triangle marching times in microseconds.
  pub march_timings: RollingWindow<u64>,
  /// Last marching time in microseconds.
  pub last_march_us: u64,
}

impl GridMetrics {
  pub fn new() -> Self {
    Self::default()
  }

  /// Reset all counters and timings.
  pub fn reset(&mut self) {
    *self = Self::default();
  }

  /// Record one marched triangle.
  pub fn record_march(&mut self, face_tests: u64, fast_path: bool, timing_us: u64) {
    if !is_enabled() {
      return;
    }
    self.triangles_marched += 1;
    self.face_tests += face_tests;
    if fast_path {
      self.fast_path_hits += 1;
    }
    self.march_timings.push(timing_us);
    self.last_march_us = timing_us;
  }

  pub fn record_materialized(&mut self, count: usize) {
    if is_enabled() {
      self.pending_materialized += count as u64;
    }
  }

  pub fn record_point(&mut self) {
    if is_enabled() {
      self.points_marked += 1;
    }
  }

  pub fn record_rect(&mut self) {
    if is_enabled() {
      self.rects_marked += 1;
    }
  }

  pub fn record_query(&mut self) {
    if is_enabled() {
      self.queries += 1;
    }
  }

  pub fn avg_march_timing_us(&self) -> f64 {
    self.march_timings.average()
  }

  /// Share of triangles that skipped face evaluation.
  pub fn fast_path_ratio(&self) -> f64 {
    if self.triangles_marched == 0 {
      0.0
    } else {
      self.fast_path_hits as f64 / self.triangles_marched as f64
    }
  }
}

#[cfg(all(test, feature = "metrics"))]
mod tests {
  use super::*;

  #[test]
  fn test_rolling_window() {
    let mut window = RollingWindow::new(3);
    assert!(window.is_empty());

    window.push(10u64);
    window.push(20);
    window.push(30);
    assert_eq!(window.len(), 3);
    assert_eq!(window.sum(), 60);
    assert_eq!(window.average(), 20.0);

    // Push one more, oldest should be evicted
    window.push(40);
    assert_eq!(window.len(), 3);
    assert_eq!(window.sum(), 90);

    let (min, max) = window.min_max().unwrap();
    assert_eq!(min, 20);
    assert_eq!(max, 40);
  }

  #[test]
  fn test_record_march() {
    let mut metrics = GridMetrics::new();
    metrics.record_march(0, true, 5);
    metrics.record_march(40, false, 15);

    assert_eq!(metrics.triangles_marched, 2);
    assert_eq!(metrics.fast_path_hits, 1);
    assert_eq!(metrics.face_tests, 40);
    assert_eq!(metrics.last_march_us, 15);
    assert_eq!(metrics.avg_march_timing_us(), 10.0);
    assert_eq!(metrics.fast_path_ratio(), 0.5);
  }

  #[test]
  fn test_reset() {
    let mut metrics = GridMetrics::new();
    metrics.record_point();
    metrics.record_query();
    metrics.reset();
    assert_eq!(metrics.points_marked, 0);
    assert_eq!(metrics.queries, 0);
    assert!(metrics.march_timings.is_empty());
  }
}
