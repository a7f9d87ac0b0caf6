//! Error types for grid construction, marking and querying.

use thiserror::Error;

/// Result type alias for grid operations.
pub type GridResult<T> = Result<T, GridError>;

/// Errors surfaced at the boundary of the operation that received bad input.
///
/// None of these leave the grid partially modified: validation runs before
/// any state is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
  /// Cell size must be finite and strictly positive.
  #[error("cell size must be finite and > 0, got {0}")]
  InvalidCellSize(f64),

  /// Geometry contained NaN or an infinity.
  #[error("geometry contains a non-finite coordinate")]
  NonFiniteCoordinate,

  /// Rectangle min exceeds max on an axis.
  #[error("rect min {min:?} exceeds max {max:?}")]
  InvalidRect { min: [f64; 2], max: [f64; 2] },

  /// Rectangle corners do not form an axis-aligned rectangle.
  #[error("rect corners are not axis-aligned")]
  NotAxisAligned,

  /// Predicate tolerance must be finite and non-negative.
  #[error("epsilon must be finite and >= 0, got {0}")]
  InvalidEpsilon(f64),

  /// The block size limit must admit at least one cell.
  #[error("max block cells must be at least 1")]
  InvalidBlockLimit,

  /// A coordinate maps to a cell index beyond the representable range.
  #[error("coordinate maps outside the cell index range")]
  IndexOutOfRange,

  /// A primitive spans more cells than the configured limit.
  #[error("primitive spans {cells} cells, limit is {limit}")]
  BlockTooLarge { cells: usize, limit: usize },

  /// Sphere radius must be finite and non-negative.
  #[error("sphere radius must be finite and >= 0, got {0}")]
  InvalidRadius(f64),
}
