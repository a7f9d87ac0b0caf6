//! Monotonic tokens for ordering deferred work and identifying grids.

use std::sync::atomic::{AtomicU64, Ordering};

// =============================================================================
// PendingId - deferred triangle handle
// =============================================================================

/// Atomic counter shared by every grid in the process.
static PENDING_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Handle of a deferred triangle.
///
/// Generated atomically, strictly increasing within the process lifetime, so
/// ordering by id is ordering by registration.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct PendingId(u64);

impl PendingId {
  /// Generate the next id.
  pub fn next() -> Self {
    Self(PENDING_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  /// Get the raw id value.
  pub fn raw(&self) -> u64 {
    self.0
  }
}

// =============================================================================
// GridId - unique identifier
// =============================================================================

static GRID_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Opaque grid identifier, unique within the process lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct GridId(u64);

impl GridId {
  pub fn new() -> Self {
    Self(GRID_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
  }

  pub fn raw(&self) -> u64 {
    self.0
  }
}

impl Default for GridId {
  fn default() -> Self {
    Self::new()
  }
}
