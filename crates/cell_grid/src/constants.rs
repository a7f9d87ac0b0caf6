//! Numeric constants shared by the grid, the marcher and the predicates.
//!
//! # Cell Layout
//!
//! ```text
//!   index:      -1        0         1         2
//!           ┌─────────┬─────────┬─────────┬─────────┐
//!           │    ·    │    ·    │    ·    │    ·    │
//!           └─────────┴─────────┴─────────┴─────────┘
//!   coord: -1.5     -0.5       0.5       1.5       2.5   (× cell_size)
//! ```
//!
//! Cell `i` is centered on `i * cell_size` and owns the half-open interval
//! `((i - 0.5) * cell_size, (i + 0.5) * cell_size]`. A coordinate exactly on a
//! wall belongs to the lower cell.
//!
//! # Corner Order
//!
//! ```text
//! Corner indices (binary: ZYX):
//!   0 = (-,-,-)    4 = (-,-,+)
//!   1 = (+,-,-)    5 = (+,-,+)
//!   2 = (-,+,-)    6 = (-,+,+)
//!   3 = (+,+,-)    7 = (+,+,+)
//! ```

/// Tolerance for near-zero and near-equal comparisons in the predicates.
pub const EPSILON: f64 = 1e-9;

/// Default edge length of one cell in world units.
pub const DEFAULT_CELL_SIZE: f64 = 1.0;

/// Block size (in cells) at which stripe marching moves onto the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Largest cell block (in cells) a single primitive may span.
pub const DEFAULT_MAX_BLOCK_CELLS: usize = 1 << 27;

/// Largest |index| a marked coordinate may map to. Differences of two
/// indices, and block extents, then stay inside `i32`.
pub const MAX_CELL_INDEX: i32 = 1 << 29;

/// Capacity of the marching-time rolling window.
pub const TIMING_WINDOW: usize = 128;

/// Box corner selectors, `false` = min side, `true` = max side.
///
/// Layout (binary: ZYX) matches the table above.
pub const CORNER_SIGNS: [[bool; 3]; 8] = [
  [false, false, false],
  [true, false, false],
  [false, true, false],
  [true, true, false],
  [false, false, true],
  [true, false, true],
  [false, true, true],
  [true, true, true],
];

/// The two axes orthogonal to each principal axis, in right-handed order.
pub const ORTHOGONAL_AXES: [[usize; 2]; 3] = [[1, 2], [2, 0], [0, 1]];

#[cfg(test)]
#[path = "constants_test.rs"]
mod constants_test;
